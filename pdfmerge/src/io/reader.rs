//! Reading selected files.
//!
//! Files are read concurrently with `tokio::fs`; contents always come back in
//! selection order, whatever order the reads complete in.
//!
//! # Examples
//!
//! ```no_run
//! use pdfmerge::io::FileReader;
//! use std::path::PathBuf;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let reader = FileReader::new();
//! let paths = vec![PathBuf::from("a.pdf"), PathBuf::from("b.pdf")];
//! let contents = reader.read_all(&paths).await?;
//! assert_eq!(contents.len(), 2);
//! # Ok(())
//! # }
//! ```

use futures::stream::{self, StreamExt, TryStreamExt};
use std::path::Path;
use std::time::Instant;
use tracing::debug;

use crate::error::{PdfMergeError, Result};

/// Concurrency used when the host does not report its parallelism.
const DEFAULT_WORKERS: usize = 4;

/// Reader for the bytes of selected files.
#[derive(Debug, Clone)]
pub struct FileReader {
    /// Maximum number of reads in flight.
    workers: usize,
}

impl FileReader {
    /// Create a reader sized to the machine's parallelism.
    pub fn new() -> Self {
        let workers = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(DEFAULT_WORKERS);
        Self::with_workers(workers)
    }

    /// Create a reader with at most `workers` reads in flight.
    pub fn with_workers(workers: usize) -> Self {
        Self {
            workers: workers.max(1),
        }
    }

    /// Maximum number of concurrent reads.
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Read a single file.
    ///
    /// # Errors
    ///
    /// Returns [`PdfMergeError::FileNotFound`] if the file does not exist and
    /// [`PdfMergeError::ReadFailed`] for any other I/O failure.
    pub async fn read(&self, path: &Path) -> Result<Vec<u8>> {
        tokio::fs::read(path)
            .await
            .map_err(|err| PdfMergeError::read_failed(path.to_path_buf(), err))
    }

    /// Read every file, returning their contents in the order given.
    ///
    /// # Errors
    ///
    /// The first failing read aborts the whole operation; the error names the
    /// file that could not be read.
    pub async fn read_all<P: AsRef<Path>>(&self, paths: &[P]) -> Result<Vec<Vec<u8>>> {
        let start = Instant::now();

        let reads = paths.iter().map(|path| self.read(path.as_ref()));
        let contents: Vec<Vec<u8>> = stream::iter(reads)
            .buffered(self.workers)
            .try_collect()
            .await?;

        debug!(
            files = contents.len(),
            bytes = contents.iter().map(Vec::len).sum::<usize>(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "read selected files"
        );

        Ok(contents)
    }
}

impl Default for FileReader {
    fn default() -> Self {
        Self::new()
    }
}
