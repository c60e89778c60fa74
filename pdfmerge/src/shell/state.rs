//! State of the merge shell.

use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::{PdfMergeError, Result};
use crate::utils::format_file_size;

/// Minimum number of selected files for the merge action to be enabled.
pub const MIN_FILES: usize = 2;

/// Informational message shown while a merge runs.
pub const MERGING_MESSAGE: &str = concat!(
    "Merging… please wait. ",
    "Large files may take a moment because everything stays on this machine."
);

/// Message used when a failure carries no text of its own.
pub const FALLBACK_ERROR_MESSAGE: &str = "Something went wrong while merging the PDFs.";

/// Hint shown instead of the file list when nothing is selected.
pub const EMPTY_SELECTION_HINT: &str =
    "No files selected yet. Choose at least two PDFs to enable merging.";

/// Hint shown when too few files are selected to merge.
pub const GATE_HINT: &str = "Choose at least two PDFs to enable merging.";

/// Lifecycle of the merge action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum MergeStatus {
    /// Nothing has happened since the last selection.
    #[default]
    Idle,
    /// A merge is in flight.
    Merging,
    /// The last merge was delivered.
    Success,
    /// The last merge failed.
    Error,
}

impl MergeStatus {
    /// Lowercase name of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Merging => "merging",
            Self::Success => "success",
            Self::Error => "error",
        }
    }

    /// Whether a merge has settled, one way or the other.
    pub fn is_settled(&self) -> bool {
        matches!(self, Self::Success | Self::Error)
    }
}

impl fmt::Display for MergeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A file chosen by the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectedFile {
    /// Display name, the last path component.
    pub name: String,

    /// Location of the file.
    pub path: PathBuf,

    /// Size in bytes at selection time.
    pub size: u64,
}

impl SelectedFile {
    /// Describe a file without touching the file system.
    pub fn new(path: impl Into<PathBuf>, size: u64) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        Self { name, path, size }
    }

    /// Describe a file from its metadata.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be stat'ed or is not a regular file.
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let metadata = tokio::fs::metadata(path)
            .await
            .map_err(|err| PdfMergeError::read_failed(path.to_path_buf(), err))?;

        if !metadata.is_file() {
            return Err(PdfMergeError::other(format!(
                "Not a file: {}",
                path.display()
            )));
        }

        Ok(Self::new(path, metadata.len()))
    }

    /// Size as shown in the selection list, e.g. `12.3 KB`.
    pub fn size_label(&self) -> String {
        format_file_size(self.size)
    }
}

/// Everything the shell knows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShellState {
    /// Selected files, in the order the host reported them.
    pub selected_files: Vec<SelectedFile>,

    /// Status of the merge action.
    pub status: MergeStatus,

    /// Text shown next to the status.
    pub message: String,

    /// Bumped on every selection; merges started under an older value are stale.
    pub generation: u64,
}

impl ShellState {
    /// Whether the merge action is enabled.
    pub fn can_merge(&self) -> bool {
        self.selected_files.len() >= MIN_FILES && self.status != MergeStatus::Merging
    }

    /// Label of the merge button.
    pub fn merge_button_label(&self) -> &'static str {
        if self.status == MergeStatus::Merging {
            "Merging…"
        } else {
            "Merge"
        }
    }

    /// Serializable view of the state.
    pub fn snapshot(&self) -> ShellSnapshot {
        ShellSnapshot {
            selected_files: self.selected_files.clone(),
            status: self.status,
            message: self.message.clone(),
            can_merge: self.can_merge(),
            merge_button_label: self.merge_button_label(),
        }
    }
}

/// What a host renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShellSnapshot {
    /// Selected files, in order.
    pub selected_files: Vec<SelectedFile>,
    /// Status of the merge action.
    pub status: MergeStatus,
    /// Status text.
    pub message: String,
    /// Whether the merge action is enabled.
    pub can_merge: bool,
    /// Label of the merge button.
    pub merge_button_label: &'static str,
}
