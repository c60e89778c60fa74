//! pdfmerge - Merge PDF files into a single document.
//!
//! Command-line host for the merge shell: the arguments are the selection,
//! running the command presses "Merge".

mod cli;

use clap::Parser;
use std::process;
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;
use pdfmerge::config::Config;
use pdfmerge::error::{PdfMergeError, Result};
use pdfmerge::io::Downloader;
use pdfmerge::output::OutputFormatter;
use pdfmerge::shell::{GATE_HINT, MergeShell};

/// Exit code for a successful run.
const EXIT_OK: i32 = 0;

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    init_tracing(cli.default_log_filter());

    // Run the application and handle errors
    match run(cli).await {
        Ok(EXIT_OK) => {}
        Ok(code) => process::exit(code),
        Err(err) => {
            eprintln!("Error: {err}");
            process::exit(err.exit_code());
        }
    }
}

/// Install the diagnostic log subscriber.
///
/// `RUST_LOG` wins over the default directive. Logs go to stderr so they
/// never mix with `--json` output.
fn init_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Main application logic.
///
/// Failures before the merge starts are returned as errors. Once the shell
/// owns the outcome, it has already been rendered as the status line and only
/// the exit code is returned.
async fn run(cli: Cli) -> Result<i32> {
    let config = cli.to_config()?;
    let formatter = OutputFormatter::from_config(&config);

    if formatter.should_print() {
        formatter.section(&format!("{} v{}", pdfmerge::NAME, pdfmerge::VERSION));
        formatter.info(
            "Combine multiple PDF files into a single document. Nothing leaves this machine.",
        );
    }

    let mut shell = MergeShell::from_config(&config);
    shell.select_paths(config.inputs()).await?;
    formatter.selection(shell.selected_files());
    formatter.blank_line();

    let Some(job) = shell.start_merge() else {
        if !config.json {
            formatter.warning(GATE_HINT);
        }
        print_json(&config, &shell)?;
        return Ok(PdfMergeError::NotEnoughInputs {
            provided: shell.selected_files().len(),
        }
        .exit_code());
    };

    formatter.status(&shell.snapshot());
    formatter.detail("Saving to", &config.output_dir.display().to_string());

    let downloader = Downloader::from_config(&config);
    let outcome = job
        .run_with_progress(&downloader, |progress| formatter.progress(&progress))
        .await;
    let exit_code = outcome.error().map_or(EXIT_OK, PdfMergeError::exit_code);

    shell.finish_merge(outcome);

    formatter.status(&shell.snapshot());
    print_json(&config, &shell)?;

    Ok(exit_code)
}

/// Print the shell snapshot as JSON when `--json` is set.
fn print_json(config: &Config, shell: &MergeShell) -> Result<()> {
    if !config.json {
        return Ok(());
    }

    let json = serde_json::to_string_pretty(&shell.snapshot())
        .map_err(|err| PdfMergeError::other(format!("Failed to encode JSON: {err}")))?;
    println!("{json}");

    Ok(())
}
