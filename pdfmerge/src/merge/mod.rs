//! PDF merging operations.
//!
//! This module provides the core merge:
//! - [`document`]: the document model over `lopdf` (load, create, copy pages,
//!   append pages, save)
//! - [`merger`]: ordered concatenation with options, progress and statistics
//!
//! # Examples
//!
//! ```no_run
//! use pdfmerge::merge::merge_pdfs;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let first = std::fs::read("a.pdf")?;
//! let second = std::fs::read("b.pdf")?;
//!
//! let merged = merge_pdfs(&[first, second]).await?;
//! std::fs::write("merged.pdf", merged)?;
//! # Ok(())
//! # }
//! ```

pub mod document;
pub mod merger;

pub use document::{PageHandle, PageSize, PdfDocument};
pub use merger::{MergeOptions, MergeOutput, MergeProgress, MergeStatistics, Merger};

use crate::error::Result;

/// Merge PDF documents, given as encoded bytes, in order.
///
/// Convenience function that creates a default merger and performs the merge.
///
/// # Errors
///
/// Fails with the fixed validation message for fewer than two inputs, or with
/// the document library's diagnostic for the first input it cannot decode.
pub async fn merge_pdfs<B: AsRef<[u8]>>(inputs: &[B]) -> Result<Vec<u8>> {
    Merger::new().merge(inputs).await
}
