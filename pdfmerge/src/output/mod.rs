//! Output formatting and display for pdfmerge.
//!
//! This module handles all user-facing output including:
//! - The selection list and the empty-selection hint
//! - The status line, errors distinct and on stderr
//! - Quiet and verbose modes
//!
//! # Examples
//!
//! ```no_run
//! use pdfmerge::output::OutputFormatter;
//! use pdfmerge::config::Config;
//!
//! # fn example(config: Config) {
//! let formatter = OutputFormatter::from_config(&config);
//! formatter.info("Starting merge");
//! formatter.success("Merge completed successfully");
//! # }
//! ```

pub mod formatter;

pub use formatter::{MessageLevel, OutputFormatter, selection_entry};
