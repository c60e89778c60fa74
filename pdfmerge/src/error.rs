//! Error types for pdfmerge.
//!
//! Every failure the library can produce is a [`PdfMergeError`]. Errors fall
//! into three broad kinds (see [`ErrorKind`]):
//!
//! - **Validation**: the request itself is wrong (too few files, bad options).
//!   The user can fix it by changing the selection or the flags.
//! - **Decode**: one of the inputs is not readable as a PDF. The user can fix
//!   it by picking a different file.
//! - **Unknown**: anything else the document library or the host surfaced.

use std::io;
use std::path::PathBuf;

/// Message used when fewer than two documents are handed to the merge.
pub const NOT_ENOUGH_INPUTS_MESSAGE: &str = "Please provide at least two PDFs to merge.";

/// Result type alias for pdfmerge operations.
pub type Result<T> = std::result::Result<T, PdfMergeError>;

/// Coarse classification of a [`PdfMergeError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The request violates a precondition.
    Validation,
    /// An input could not be decoded as a PDF.
    Decode,
    /// Any other failure, passed through from the library or the host.
    Unknown,
}

/// Main error type for pdfmerge operations.
#[derive(Debug, thiserror::Error)]
pub enum PdfMergeError {
    /// Fewer than two documents were provided.
    #[error("{}", NOT_ENOUGH_INPUTS_MESSAGE)]
    NotEnoughInputs {
        /// Number of documents that were provided.
        provided: usize,
    },

    /// An input could not be decoded by the document library.
    ///
    /// The message is the library's own diagnostic.
    #[error("{reason}")]
    Decode {
        /// Zero-based position of the failing input.
        index: usize,
        /// Diagnostic reported by the document library.
        reason: String,
    },

    /// A selected file does not exist.
    #[error("File not found: {}", path.display())]
    FileNotFound {
        /// Path to the missing file.
        path: PathBuf,
    },

    /// A selected file exists but could not be read.
    #[error("Failed to read file: {}\n  Reason: {source}", path.display())]
    ReadFailed {
        /// Path to the unreadable file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// A page index does not exist in the source document.
    #[error("Page {index} does not exist (document has {page_count} page(s))")]
    PageNotFound {
        /// Requested zero-based page index.
        index: usize,
        /// Number of pages in the document.
        page_count: usize,
    },

    /// The download target already exists and overwriting is not allowed.
    #[error(
        "Output file already exists: {}\n  Use --force to overwrite it",
        path.display()
    )]
    OutputExists {
        /// Path to the existing file.
        path: PathBuf,
    },

    /// Writing the merged document failed.
    #[error("Failed to write output file: {}\n  Reason: {source}", path.display())]
    WriteFailed {
        /// Path being written to.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Invalid configuration.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Description of what's wrong with the configuration.
        message: String,
    },

    /// Error reported by the document library outside of decoding.
    #[error("{0}")]
    Pdf(#[from] lopdf::Error),

    /// Generic I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Generic error with a custom message.
    #[error("{message}")]
    Other {
        /// Error message.
        message: String,
    },
}

impl From<anyhow::Error> for PdfMergeError {
    fn from(err: anyhow::Error) -> Self {
        Self::other(err.to_string())
    }
}

impl PdfMergeError {
    /// Create a Decode error for the input at `index`.
    pub fn decode(index: usize, reason: impl Into<String>) -> Self {
        Self::Decode {
            index,
            reason: reason.into(),
        }
    }

    /// Create a ReadFailed error, mapping `NotFound` to [`Self::FileNotFound`].
    pub fn read_failed(path: PathBuf, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            Self::FileNotFound { path }
        } else {
            Self::ReadFailed { path, source }
        }
    }

    /// Create an OutputExists error.
    pub fn output_exists(path: PathBuf) -> Self {
        Self::OutputExists { path }
    }

    /// Create an InvalidConfig error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create an Other error with a custom message.
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }

    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotEnoughInputs { .. } | Self::InvalidConfig { .. } => ErrorKind::Validation,
            Self::Decode { .. } => ErrorKind::Decode,
            _ => ErrorKind::Unknown,
        }
    }

    /// Check if the user can fix this error by changing the selection or flags.
    pub fn is_user_correctable(&self) -> bool {
        matches!(self.kind(), ErrorKind::Validation | ErrorKind::Decode)
            || matches!(
                self,
                Self::FileNotFound { .. } | Self::OutputExists { .. }
            )
    }

    /// Get the process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::NotEnoughInputs { .. } => 1,
            Self::InvalidConfig { .. } => 1,
            Self::FileNotFound { .. } => 2,
            Self::ReadFailed { .. } => 2,
            Self::Decode { .. } => 3,
            Self::PageNotFound { .. } => 3,
            Self::Pdf(_) => 3,
            Self::OutputExists { .. } => 4,
            Self::WriteFailed { .. } => 5,
            Self::Io(_) => 5,
            Self::Other { .. } => 1,
        }
    }
}
