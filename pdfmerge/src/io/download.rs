//! Delivering the merged document as a local download.
//!
//! Writes are atomic: bytes go to a temporary file next to the target, are
//! flushed to disk and only then renamed into place. A reader of the download
//! directory never sees a half-written `merged.pdf`.
//!
//! # Examples
//!
//! ```no_run
//! use pdfmerge::io::Downloader;
//!
//! # async fn example(bytes: Vec<u8>) -> Result<(), Box<dyn std::error::Error>> {
//! let downloader = Downloader::new("downloads");
//! let delivery = downloader.deliver(bytes, "merged.pdf").await?;
//! println!("Saved {}", delivery.path.display());
//! # Ok(())
//! # }
//! ```

use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::task;
use tracing::info;

use crate::config::{Config, OverwriteMode, PDF_MIME_TYPE};
use crate::error::{PdfMergeError, Result};

/// Upper bound on `name (n).pdf` candidates tried in rename mode.
const MAX_RENAME_ATTEMPTS: u32 = 10_000;

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// A completed download.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Delivery {
    /// Where the file was saved.
    pub path: PathBuf,

    /// Size of the saved file in bytes.
    pub size: u64,

    /// MIME type of the saved file.
    pub mime_type: &'static str,
}

impl Delivery {
    /// File name the document was saved under.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// Saves merged documents into a download directory.
#[derive(Debug, Clone)]
pub struct Downloader {
    directory: PathBuf,
    overwrite_mode: OverwriteMode,
}

impl Downloader {
    /// Create a downloader for `directory` using the default overwrite mode.
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            overwrite_mode: OverwriteMode::default(),
        }
    }

    /// Create a downloader from configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.output_dir).with_overwrite_mode(config.overwrite_mode)
    }

    /// Set how an existing file with the same name is treated.
    pub fn with_overwrite_mode(mut self, overwrite_mode: OverwriteMode) -> Self {
        self.overwrite_mode = overwrite_mode;
        self
    }

    /// The download directory.
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// The overwrite mode in effect.
    pub fn overwrite_mode(&self) -> OverwriteMode {
        self.overwrite_mode
    }

    /// Save `bytes` as `file_name` in the download directory.
    ///
    /// The buffer is consumed and released once the file is written.
    ///
    /// # Errors
    ///
    /// Returns [`PdfMergeError::OutputExists`] in no-clobber mode when the
    /// target exists, and [`PdfMergeError::WriteFailed`] if the file cannot
    /// be written (missing directory, permissions, disk full).
    pub async fn deliver(&self, bytes: Vec<u8>, file_name: &str) -> Result<Delivery> {
        let directory = self.directory.clone();
        let file_name = file_name.to_string();
        let overwrite_mode = self.overwrite_mode;

        let delivery = task::spawn_blocking(move || {
            let target = resolve_target(&directory, &file_name, overwrite_mode)?;
            write_atomically(&directory, &target, &bytes)?;

            Ok::<_, PdfMergeError>(Delivery {
                size: bytes.len() as u64,
                path: target,
                mime_type: PDF_MIME_TYPE,
            })
        })
        .await
        .map_err(|e| PdfMergeError::other(format!("Write task failed: {e}")))??;

        info!(
            path = %delivery.path.display(),
            size = delivery.size,
            "delivered merged document"
        );

        Ok(delivery)
    }
}

/// Pick the path the download is written to.
fn resolve_target(directory: &Path, file_name: &str, mode: OverwriteMode) -> Result<PathBuf> {
    let target = directory.join(file_name);

    match mode {
        OverwriteMode::Force => Ok(target),
        OverwriteMode::NoClobber if target.exists() => Err(PdfMergeError::output_exists(target)),
        OverwriteMode::NoClobber => Ok(target),
        OverwriteMode::Rename => {
            if !target.exists() {
                return Ok(target);
            }
            (1..=MAX_RENAME_ATTEMPTS)
                .map(|n| directory.join(numbered_name(file_name, n)))
                .find(|candidate| !candidate.exists())
                .ok_or_else(|| PdfMergeError::output_exists(target))
        }
    }
}

/// `merged.pdf` becomes `merged (n).pdf`.
fn numbered_name(file_name: &str, n: u32) -> String {
    let path = Path::new(file_name);
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| file_name.to_string());

    match path.extension() {
        Some(ext) => format!("{stem} ({n}).{}", ext.to_string_lossy()),
        None => format!("{stem} ({n})"),
    }
}

fn write_atomically(directory: &Path, target: &Path, bytes: &[u8]) -> Result<()> {
    let temp_path = directory.join(format!(
        ".pdfmerge-{}-{}.part",
        std::process::id(),
        TEMP_COUNTER.fetch_add(1, Ordering::Relaxed)
    ));

    let written = write_file(&temp_path, bytes).and_then(|()| {
        std::fs::rename(&temp_path, target).map_err(|e| PdfMergeError::WriteFailed {
            path: target.to_path_buf(),
            source: e,
        })
    });

    if written.is_err() {
        let _ = std::fs::remove_file(&temp_path);
    }

    written
}

fn write_file(path: &Path, bytes: &[u8]) -> Result<()> {
    let to_write_error = |source| PdfMergeError::WriteFailed {
        path: path.to_path_buf(),
        source,
    };

    let mut file = std::fs::File::create(path).map_err(to_write_error)?;
    file.write_all(bytes).map_err(to_write_error)?;
    file.sync_all().map_err(to_write_error)?;

    Ok(())
}
