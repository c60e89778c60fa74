//! Configuration module for pdfmerge.
//!
//! This module holds the normalized settings that drive a merge run:
//! - The ordered file selection
//! - Where and under which name the merged document is delivered
//! - How an existing file with the same name is treated
//! - Output compression and verbosity

use anyhow::{Result, bail};

use crate::PdfMergeError;
use std::{path::PathBuf, str::FromStr};

/// Default file name of the merged document.
pub const DEFAULT_FILE_NAME: &str = "merged.pdf";

/// MIME type of the merged document.
pub const PDF_MIME_TYPE: &str = "application/pdf";

/// Compression level for the merged PDF.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompressionLevel {
    /// No compression - streams are written as they were copied.
    None,
    /// Flate-compress uncompressed streams.
    #[default]
    Standard,
    /// Compress streams and drop objects no page can reach.
    Maximum,
}

impl FromStr for CompressionLevel {
    type Err = PdfMergeError;

    /// Parse compression level from "none", "standard" or "maximum".
    fn from_str(s: &str) -> crate::Result<Self> {
        match s.to_lowercase().as_str() {
            "none" => Ok(Self::None),
            "standard" => Ok(Self::Standard),
            "maximum" => Ok(Self::Maximum),
            _ => Err(PdfMergeError::invalid_config(format!(
                "Invalid compression level: {s}. Must be one of: none, standard, maximum"
            ))),
        }
    }
}

/// What to do when the download directory already holds a file with the
/// merged document's name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverwriteMode {
    /// Pick the next free name, `merged (1).pdf`, `merged (2).pdf`, ...
    #[default]
    Rename,
    /// Replace the existing file.
    Force,
    /// Never overwrite, error if the file exists.
    NoClobber,
}

impl FromStr for OverwriteMode {
    type Err = PdfMergeError;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s.to_lowercase().as_str() {
            "rename" => Ok(Self::Rename),
            "force" => Ok(Self::Force),
            "no-clobber" | "noclobber" => Ok(Self::NoClobber),
            _ => Err(PdfMergeError::invalid_config(format!(
                "Invalid overwrite mode: {s}. Must be one of: rename, force, no-clobber"
            ))),
        }
    }
}

/// Complete configuration for a merge run.
///
/// Built from CLI arguments by the binary and validated before use.
#[derive(Debug, Clone)]
pub struct Config {
    /// Selected PDF files, in merge order.
    pub inputs: Vec<PathBuf>,

    /// Directory the merged document is delivered to.
    pub output_dir: PathBuf,

    /// File name of the merged document.
    pub file_name: String,

    /// Behavior when `file_name` already exists in `output_dir`.
    pub overwrite_mode: OverwriteMode,

    /// Compression level for the merged document.
    pub compression: CompressionLevel,

    /// Verbose output mode.
    pub verbose: bool,

    /// Quiet mode - suppress non-error output.
    pub quiet: bool,

    /// Print the final state as JSON instead of text.
    pub json: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            inputs: Vec::new(),
            output_dir: PathBuf::from("."),
            file_name: DEFAULT_FILE_NAME.to_string(),
            overwrite_mode: OverwriteMode::default(),
            compression: CompressionLevel::default(),
            verbose: false,
            quiet: false,
            json: false,
        }
    }
}

impl Config {
    /// Returns a reference to inputs.
    pub fn inputs(&self) -> &[PathBuf] {
        self.inputs.as_ref()
    }

    /// Validate the configuration.
    ///
    /// A selection of fewer than two files is not a configuration error; the
    /// merge action simply stays disabled for it.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No input files are specified
    /// - Verbose and quiet modes are both enabled
    /// - The file name is empty, contains a path separator or lacks `.pdf`
    pub fn validate(&self) -> Result<()> {
        if self.inputs.is_empty() {
            bail!("No input files specified");
        }

        if self.verbose && self.quiet {
            bail!("Cannot use both --verbose and --quiet");
        }

        let name = self.file_name.trim();
        if name.is_empty() {
            bail!("Output file name cannot be empty");
        }

        if name.contains(['/', '\\']) {
            bail!("Output file name must not contain a path separator: {name}");
        }

        if !name.to_lowercase().ends_with(".pdf") {
            bail!("Output file name must end with .pdf: {name}");
        }

        Ok(())
    }

    /// Check if output should be displayed.
    pub fn should_print(&self) -> bool {
        !self.quiet && !self.json
    }
}
