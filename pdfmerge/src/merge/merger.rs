//! Core PDF merging implementation.
//!
//! The merge takes already-read PDF bytes, never touches the file system and
//! never mutates its inputs. Pages are copied into a freshly created
//! document, so nothing from an input's catalog (outlines, forms, names)
//! leaks into the result.

use std::time::{Duration, Instant};

use tracing::debug;

use crate::config::CompressionLevel;
use crate::error::{PdfMergeError, Result};
use crate::merge::document::PdfDocument;

/// Options controlling how the merged document is written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeOptions {
    /// Compression applied when serializing the merged document.
    pub compression: CompressionLevel,
}

/// Progress report emitted after each input document is appended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergeProgress {
    /// Zero-based position of the document that was just appended.
    pub document_index: usize,

    /// Number of documents being merged.
    pub documents_total: usize,

    /// Pages appended from this document.
    pub pages_added: usize,

    /// Pages in the merged document so far.
    pub pages_total: usize,
}

impl MergeProgress {
    /// Whether this is the report for the last document.
    pub fn is_last(&self) -> bool {
        self.document_index + 1 == self.documents_total
    }
}

/// Statistics about a merge operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeStatistics {
    /// Number of documents merged.
    pub documents_merged: usize,

    /// Total number of pages in merged document.
    pub total_pages: usize,

    /// Total time taken for merge, serialization included.
    pub merge_time: Duration,
}

/// Merged document bytes together with statistics.
#[derive(Debug, Clone)]
pub struct MergeOutput {
    /// The serialized merged document.
    pub bytes: Vec<u8>,

    /// Statistics about the merge.
    pub statistics: MergeStatistics,
}

/// PDF merger that concatenates documents page by page.
#[derive(Debug, Clone, Default)]
pub struct Merger {
    options: MergeOptions,
}

impl Merger {
    /// Create a new merger with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a merger with explicit options.
    pub fn with_options(options: MergeOptions) -> Self {
        Self { options }
    }

    /// Options this merger writes with.
    pub fn options(&self) -> &MergeOptions {
        &self.options
    }

    /// Merge `inputs` in order and return the merged document's bytes.
    ///
    /// # Errors
    ///
    /// Returns [`PdfMergeError::NotEnoughInputs`] for fewer than two inputs
    /// (nothing is decoded in that case) and [`PdfMergeError::Decode`] for the
    /// first input the document library cannot read.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use pdfmerge::merge::Merger;
    /// # async fn example(a: Vec<u8>, b: Vec<u8>) -> pdfmerge::Result<()> {
    /// let merged = Merger::new().merge(&[a, b]).await?;
    /// std::fs::write("merged.pdf", merged)?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn merge<B: AsRef<[u8]>>(&self, inputs: &[B]) -> Result<Vec<u8>> {
        Ok(self.merge_with_report(inputs).await?.bytes)
    }

    /// Merge `inputs` and report statistics alongside the bytes.
    ///
    /// # Errors
    ///
    /// Same as [`Self::merge`].
    pub async fn merge_with_report<B: AsRef<[u8]>>(&self, inputs: &[B]) -> Result<MergeOutput> {
        self.merge_with_progress(inputs, |_| {}).await
    }

    /// Merge `inputs`, calling `on_progress` after each document is appended.
    ///
    /// The task yields to the scheduler after every document, so a long merge
    /// does not starve other tasks on the same runtime.
    ///
    /// # Errors
    ///
    /// Same as [`Self::merge`]. No progress is reported for a document that
    /// fails to decode, and no output is produced.
    pub async fn merge_with_progress<B, F>(
        &self,
        inputs: &[B],
        mut on_progress: F,
    ) -> Result<MergeOutput>
    where
        B: AsRef<[u8]>,
        F: FnMut(MergeProgress),
    {
        if inputs.len() < 2 {
            return Err(PdfMergeError::NotEnoughInputs {
                provided: inputs.len(),
            });
        }

        let started = Instant::now();
        let documents_total = inputs.len();
        let mut merged = PdfDocument::create();
        let mut pages_total = 0;

        for (document_index, input) in inputs.iter().enumerate() {
            let source = PdfDocument::load(input.as_ref())
                .map_err(|err| PdfMergeError::decode(document_index, err.to_string()))?;

            let copies = merged.copy_pages(&source, &source.page_indices())?;
            let pages_added = copies.len();
            for page in copies {
                merged.add_page(page)?;
            }
            pages_total += pages_added;

            debug!(
                document = document_index + 1,
                of = documents_total,
                pages = pages_added,
                version = source.version(),
                "appended document"
            );

            on_progress(MergeProgress {
                document_index,
                documents_total,
                pages_added,
                pages_total,
            });

            tokio::task::yield_now().await;
        }

        let bytes = merged.save(self.options.compression)?;
        let statistics = MergeStatistics {
            documents_merged: documents_total,
            total_pages: pages_total,
            merge_time: started.elapsed(),
        };

        debug!(
            pages = statistics.total_pages,
            bytes = bytes.len(),
            "serialized merged document"
        );

        Ok(MergeOutput { bytes, statistics })
    }
}
