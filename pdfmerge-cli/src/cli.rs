//! CLI argument parsing for pdfmerge.
//!
//! This module defines the command-line interface structure using `clap`.
//! It handles argument parsing, glob expansion and conversion into a
//! validated [`Config`].

use clap::Parser;
use std::path::PathBuf;
use std::str::FromStr;

use pdfmerge::config::{CompressionLevel, Config, DEFAULT_FILE_NAME, OverwriteMode};
use pdfmerge::error::{PdfMergeError, Result};
use pdfmerge::utils::collect_paths_for_patterns;

/// Merge PDF files into a single document.
///
/// pdfmerge concatenates the pages of every selected PDF, in the order the
/// files are given, and saves the result as merged.pdf. Everything happens
/// on this machine; nothing is uploaded.
#[derive(Parser, Debug)]
#[command(name = "pdfmerge")]
#[command(version)]
#[command(about = "Merge PDF files into a single document", long_about = None)]
#[command(author)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// PDF files to merge, in order
    ///
    /// Glob patterns are expanded in place. At least two files are needed
    /// for the merge to run.
    ///
    /// Examples:
    ///   pdfmerge cover.pdf body.pdf appendix.pdf
    ///   pdfmerge 'chapters/*.pdf' -d out
    #[arg(required = true, value_name = "FILE")]
    pub inputs: Vec<String>,

    /// Directory the merged document is saved to
    #[arg(short = 'd', long, value_name = "DIR", default_value = ".")]
    pub output_dir: PathBuf,

    /// File name of the merged document
    #[arg(short, long, value_name = "NAME", default_value = DEFAULT_FILE_NAME)]
    pub name: String,

    /// Overwrite an existing file with the same name
    ///
    /// By default an existing merged.pdf is kept and the new document is
    /// saved as "merged (1).pdf", "merged (2).pdf", and so on.
    #[arg(short, long)]
    pub force: bool,

    /// Fail instead of saving when a file with the same name exists
    #[arg(long, conflicts_with = "force")]
    pub no_clobber: bool,

    /// Compression level for the merged document
    ///
    /// - none: streams are written as copied
    /// - standard: compress streams (default)
    /// - maximum: compress streams and drop unreachable objects
    #[arg(short, long, value_name = "LEVEL", default_value = "standard")]
    #[arg(value_parser = ["none", "standard", "maximum"])]
    pub compression: String,

    /// Verbose output - show per-document progress and diagnostics
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress all non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Print the final state as JSON instead of text
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    /// Convert CLI arguments into a validated Config.
    ///
    /// Glob patterns are expanded in the order given.
    ///
    /// # Errors
    ///
    /// Returns an error if a pattern is malformed, the compression level is
    /// unknown, or the resulting configuration fails validation.
    pub fn to_config(&self) -> Result<Config> {
        let inputs = collect_paths_for_patterns(&self.inputs)?;
        let compression = CompressionLevel::from_str(&self.compression)?;

        let overwrite_mode = if self.force {
            OverwriteMode::Force
        } else if self.no_clobber {
            OverwriteMode::NoClobber
        } else {
            OverwriteMode::Rename
        };

        let config = Config {
            inputs,
            output_dir: self.output_dir.clone(),
            file_name: self.name.clone(),
            overwrite_mode,
            compression,
            verbose: self.verbose,
            quiet: self.quiet,
            json: self.json,
        };

        config.validate().map_err(|e| {
            PdfMergeError::invalid_config(format!("Configuration validation failed: {e}"))
        })?;

        Ok(config)
    }

    /// Log filter directive used when `RUST_LOG` is not set.
    pub fn default_log_filter(&self) -> &'static str {
        if self.verbose { "debug" } else { "warn" }
    }
}
