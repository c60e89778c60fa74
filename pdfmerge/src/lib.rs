//! pdfmerge - Merge PDF files into a single document, locally.
//!
//! This library concatenates PDF documents page by page, in the order they
//! are given, without sending anything anywhere. It provides:
//!
//! - An async merge over in-memory PDF bytes
//! - A shell that owns the file selection and the merge status, enforces the
//!   two-file minimum and delivers the result as `merged.pdf`
//! - Concurrent file reading and atomic download delivery
//!
//! # Examples
//!
//! ## Merging bytes
//!
//! ```no_run
//! use pdfmerge::merge_pdfs;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let inputs = vec![std::fs::read("a.pdf")?, std::fs::read("b.pdf")?];
//! let merged = merge_pdfs(&inputs).await?;
//! std::fs::write("merged.pdf", merged)?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Driving the shell
//!
//! ```no_run
//! use pdfmerge::{MergeShell, MergeStatus};
//! use pdfmerge::io::Downloader;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut shell = MergeShell::new();
//! shell.select_paths(&["a.pdf", "b.pdf", "c.pdf"]).await?;
//!
//! shell.merge(&Downloader::new("downloads")).await;
//! assert_ne!(shell.status(), MergeStatus::Merging);
//! println!("{}", shell.message());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod io;
pub mod merge;
pub mod output;
pub mod shell;
pub mod utils;


// Re-export commonly used types
pub use config::Config;
pub use error::{ErrorKind, PdfMergeError, Result};
pub use merge::merge_pdfs;
pub use shell::{MergeShell, MergeStatus};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
