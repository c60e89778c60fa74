//! Message formatting and display.
//!
//! Provides formatted output for the shell's status line and selection list,
//! with support for quiet and verbose modes.
//!
//! # Examples
//!
//! ```
//! use pdfmerge::output::formatter::OutputFormatter;
//!
//! let formatter = OutputFormatter::new(false, false);
//! formatter.info("Reading files...");
//! formatter.success("Merge completed");
//! formatter.error("Something went wrong");
//! ```

use crate::config::Config;
use crate::merge::MergeProgress;
use crate::shell::{EMPTY_SELECTION_HINT, MergeStatus, SelectedFile, ShellSnapshot};
use std::io::{self, IsTerminal, Write};

/// Level of output message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    /// Informational message.
    Info,
    /// Success message.
    Success,
    /// Warning message.
    Warning,
    /// Error message.
    Error,
}

impl MessageLevel {
    fn prefix(self) -> &'static str {
        match self {
            Self::Info => "",
            Self::Success => "✓ ",
            Self::Warning => "⚠ ",
            Self::Error => "✗ ",
        }
    }

    fn color_code(self) -> &'static str {
        match self {
            Self::Info => "",
            Self::Success => "\x1b[32m", // Green
            Self::Warning => "\x1b[33m", // Yellow
            Self::Error => "\x1b[31m", // Red
        }
    }
}

impl From<MergeStatus> for MessageLevel {
    fn from(status: MergeStatus) -> Self {
        match status {
            MergeStatus::Idle | MergeStatus::Merging => Self::Info,
            MergeStatus::Success => Self::Success,
            MergeStatus::Error => Self::Error,
        }
    }
}

/// Output formatter with configurable verbosity.
#[derive(Debug, Clone)]
pub struct OutputFormatter {
    /// Whether to suppress non-error output.
    quiet: bool,
    /// Whether to show verbose output.
    verbose: bool,
    /// Whether to use colored output.
    colored: bool,
}

impl OutputFormatter {
    /// Create a new output formatter.
    pub fn new(quiet: bool, verbose: bool) -> Self {
        Self {
            quiet,
            verbose,
            colored: Self::should_use_color(),
        }
    }

    /// Create a formatter from configuration.
    ///
    /// JSON mode counts as quiet: only the JSON document goes to stdout.
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.quiet || config.json, config.verbose)
    }

    /// Create a quiet formatter (only errors).
    pub fn quiet() -> Self {
        Self::new(true, false)
    }

    /// Create a verbose formatter.
    pub fn verbose() -> Self {
        Self::new(false, true)
    }

    /// Returns true if stdout is a TTY and TERM is set.
    fn should_use_color() -> bool {
        io::stdout().is_terminal() && std::env::var("TERM").is_ok()
    }

    /// Print an informational message. Suppressed in quiet mode.
    pub fn info(&self, message: &str) {
        if !self.quiet {
            self.print_message(MessageLevel::Info, message);
        }
    }

    /// Print a success message. Suppressed in quiet mode.
    pub fn success(&self, message: &str) {
        if !self.quiet {
            self.print_message(MessageLevel::Success, message);
        }
    }

    /// Print a warning message, even in quiet mode.
    pub fn warning(&self, message: &str) {
        self.print_message(MessageLevel::Warning, message);
    }

    /// Print an error message to stderr. Always displayed.
    pub fn error(&self, message: &str) {
        self.print_message(MessageLevel::Error, message);
    }

    /// Print a message with level-appropriate formatting.
    fn print_message(&self, level: MessageLevel, message: &str) {
        let line = self.paint(level, message);
        if level == MessageLevel::Error {
            eprintln!("{line}");
        } else {
            println!("{line}");
        }
    }

    /// Prefix and, when enabled, colour a message.
    fn paint(&self, level: MessageLevel, message: &str) -> String {
        let prefix = level.prefix();
        let color_code = level.color_code();

        if self.colored && !color_code.is_empty() {
            format!("{color_code}{prefix}{message}\x1b[0m")
        } else {
            format!("{prefix}{message}")
        }
    }

    /// Print a section header. Suppressed in quiet mode.
    pub fn section(&self, title: &str) {
        if !self.quiet {
            println!("\n{title}");
        }
    }

    /// Print a labelled value. Only shown in verbose mode.
    pub fn detail(&self, label: &str, value: &str) {
        if self.verbose {
            println!("  {label}: {value}");
        }
    }

    /// Print a list item. Suppressed in quiet mode.
    pub fn list_item(&self, index: usize, message: &str) {
        if !self.quiet {
            println!("  {index}. {message}");
        }
    }

    /// Print a blank line. Suppressed in quiet mode.
    pub fn blank_line(&self) {
        if !self.quiet {
            println!();
        }
    }

    /// Print the selection list, or the empty-selection hint.
    pub fn selection(&self, files: &[SelectedFile]) {
        if self.quiet {
            return;
        }

        self.section("Selected order");
        if files.is_empty() {
            println!("  {EMPTY_SELECTION_HINT}");
            return;
        }

        for (i, file) in files.iter().enumerate() {
            self.list_item(i + 1, &selection_entry(file));
        }
    }

    /// Print the status line for a snapshot.
    ///
    /// Errors always go to stderr; other statuses respect quiet mode. An
    /// idle status with no message prints nothing.
    pub fn status(&self, snapshot: &ShellSnapshot) {
        if snapshot.message.is_empty() {
            return;
        }

        match MessageLevel::from(snapshot.status) {
            MessageLevel::Error => self.error(&snapshot.message),
            MessageLevel::Success => self.success(&snapshot.message),
            _ => self.info(&snapshot.message),
        }
    }

    /// Print a merge progress indicator. Only shown in verbose mode.
    pub fn progress(&self, progress: &MergeProgress) {
        if !self.verbose {
            return;
        }

        print!(
            "\r  [{}/{}] {} page(s)",
            progress.document_index + 1,
            progress.documents_total,
            progress.pages_total
        );
        io::stdout().flush().ok();

        if progress.is_last() {
            println!();
        }
    }

    /// Check if output should be shown.
    pub fn should_print(&self) -> bool {
        !self.quiet
    }

    /// Check if verbose output should be shown.
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// Check if quiet mode is enabled.
    pub fn is_quiet(&self) -> bool {
        self.quiet
    }
}

impl Default for OutputFormatter {
    fn default() -> Self {
        Self::new(false, false)
    }
}

/// One line of the selection list: name and size.
pub fn selection_entry(file: &SelectedFile) -> String {
    format!("{}  {}", file.name, file.size_label())
}
