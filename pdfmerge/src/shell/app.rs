//! The merge shell: selection, gating, merge, delivery.

use futures::future::try_join_all;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use super::intent::ShellIntent;
use super::reducer::{Reducer, ShellReducer};
use super::state::{MergeStatus, SelectedFile, ShellSnapshot, ShellState};
use crate::config::{Config, DEFAULT_FILE_NAME};
use crate::error::{PdfMergeError, Result};
use crate::io::{Delivery, Downloader, FileReader};
use crate::merge::{MergeOptions, MergeProgress, Merger};

/// Owns the selection and status and drives merges.
///
/// A host reports selections, asks whether the action is enabled and invokes
/// it. Invoking it while disabled does nothing.
///
/// # Examples
///
/// ```no_run
/// use pdfmerge::io::Downloader;
/// use pdfmerge::shell::MergeShell;
///
/// # async fn example() -> pdfmerge::Result<()> {
/// let mut shell = MergeShell::new();
/// shell.select_paths(&["a.pdf", "b.pdf"]).await?;
///
/// if shell.can_merge() {
///     shell.merge(&Downloader::new(".")).await;
/// }
/// println!("{}: {}", shell.status(), shell.message());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct MergeShell {
    state: ShellState,
    reader: FileReader,
    merger: Merger,
    file_name: String,
}

impl MergeShell {
    /// Create a shell with nothing selected.
    pub fn new() -> Self {
        Self {
            state: ShellState::default(),
            reader: FileReader::new(),
            merger: Merger::new(),
            file_name: DEFAULT_FILE_NAME.to_string(),
        }
    }

    /// Create a shell using the configured compression and file name.
    pub fn from_config(config: &Config) -> Self {
        Self {
            merger: Merger::with_options(MergeOptions {
                compression: config.compression,
            }),
            file_name: config.file_name.trim().to_string(),
            ..Self::new()
        }
    }

    /// Current state.
    pub fn state(&self) -> &ShellState {
        &self.state
    }

    /// Serializable view of the current state.
    pub fn snapshot(&self) -> ShellSnapshot {
        self.state.snapshot()
    }

    /// Selected files, in order.
    pub fn selected_files(&self) -> &[SelectedFile] {
        &self.state.selected_files
    }

    /// Current status.
    pub fn status(&self) -> MergeStatus {
        self.state.status
    }

    /// Current status text.
    pub fn message(&self) -> &str {
        &self.state.message
    }

    /// Whether the merge action is enabled.
    pub fn can_merge(&self) -> bool {
        self.state.can_merge()
    }

    /// Label of the merge button.
    pub fn merge_button_label(&self) -> &'static str {
        self.state.merge_button_label()
    }

    /// Name the merged document is delivered under.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Replace the selection. Status returns to idle and the message clears.
    pub fn select_files(&mut self, files: Vec<SelectedFile>) {
        debug!(files = files.len(), "selection changed");
        self.dispatch(ShellIntent::FilesSelected(files));
    }

    /// Replace the selection with the files at `paths`, in order.
    ///
    /// # Errors
    ///
    /// Fails if any file cannot be stat'ed; the previous selection and status
    /// are kept in that case.
    pub async fn select_paths<P: AsRef<Path>>(&mut self, paths: &[P]) -> Result<()> {
        let files = try_join_all(paths.iter().map(SelectedFile::from_path)).await?;
        self.select_files(files);
        Ok(())
    }

    /// Invoke the merge action.
    ///
    /// Returns `None` and leaves the state untouched when the action is
    /// disabled. Otherwise the status becomes merging and the returned job
    /// carries everything needed to finish the merge without the shell.
    pub fn start_merge(&mut self) -> Option<MergeJob> {
        if !self.can_merge() {
            debug!(
                files = self.state.selected_files.len(),
                status = %self.state.status,
                "merge action disabled"
            );
            return None;
        }

        self.dispatch(ShellIntent::MergeStarted);

        Some(MergeJob {
            generation: self.state.generation,
            paths: self
                .state
                .selected_files
                .iter()
                .map(|file| file.path.clone())
                .collect(),
            reader: self.reader.clone(),
            merger: self.merger.clone(),
            file_name: self.file_name.clone(),
        })
    }

    /// Apply the outcome of a job started by [`Self::start_merge`].
    ///
    /// Returns `false` if the selection changed since the job started; the
    /// outcome is discarded and the status is left alone.
    pub fn finish_merge(&mut self, outcome: MergeOutcome) -> bool {
        let intent = settle_intent(&outcome.result);
        self.settle(outcome.generation, intent)
    }

    /// Run the merge action to completion.
    ///
    /// Returns `None` if the action was disabled, otherwise the delivery or
    /// the failure that was recorded in the status.
    pub async fn merge(&mut self, downloader: &Downloader) -> Option<Result<Delivery>> {
        let job = self.start_merge()?;
        let MergeOutcome { generation, result } = job.run(downloader).await;
        self.settle(generation, settle_intent(&result));
        Some(result)
    }

    fn settle(&mut self, generation: u64, intent: ShellIntent) -> bool {
        if generation != self.state.generation {
            debug!(
                job = generation,
                current = self.state.generation,
                "discarding stale merge outcome"
            );
            return false;
        }

        self.dispatch(intent);
        true
    }

    fn dispatch(&mut self, intent: ShellIntent) {
        let state = std::mem::take(&mut self.state);
        self.state = ShellReducer::reduce(state, intent);
    }
}

impl Default for MergeShell {
    fn default() -> Self {
        Self::new()
    }
}

/// A merge in flight, detached from the shell.
#[derive(Debug, Clone)]
pub struct MergeJob {
    generation: u64,
    paths: Vec<PathBuf>,
    reader: FileReader,
    merger: Merger,
    file_name: String,
}

impl MergeJob {
    /// Files being merged, in order.
    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    /// Read, merge and deliver.
    pub async fn run(self, downloader: &Downloader) -> MergeOutcome {
        self.run_with_progress(downloader, |_| {}).await
    }

    /// Read, merge and deliver, reporting progress after each document.
    pub async fn run_with_progress<F>(self, downloader: &Downloader, on_progress: F) -> MergeOutcome
    where
        F: FnMut(MergeProgress),
    {
        let result = self.execute(downloader, on_progress).await;

        if let Err(err) = &result {
            warn!(error = %err, kind = ?err.kind(), "merge failed");
        }

        MergeOutcome {
            generation: self.generation,
            result,
        }
    }

    async fn execute<F>(&self, downloader: &Downloader, on_progress: F) -> Result<Delivery>
    where
        F: FnMut(MergeProgress),
    {
        let contents = self.reader.read_all(&self.paths).await?;
        let output = self.merger.merge_with_progress(&contents, on_progress).await?;
        drop(contents);

        info!(
            documents = output.statistics.documents_merged,
            pages = output.statistics.total_pages,
            elapsed_ms = output.statistics.merge_time.as_millis() as u64,
            "merged documents"
        );

        downloader.deliver(output.bytes, &self.file_name).await
    }
}

/// Result of a [`MergeJob`], to be handed back to [`MergeShell::finish_merge`].
#[derive(Debug)]
pub struct MergeOutcome {
    /// Selection generation the job was started under.
    pub generation: u64,

    /// The delivery, or why there is none.
    pub result: Result<Delivery>,
}

impl MergeOutcome {
    /// Whether the merged document was delivered.
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }

    /// The failure, if any.
    pub fn error(&self) -> Option<&PdfMergeError> {
        self.result.as_ref().err()
    }
}

fn settle_intent(result: &Result<Delivery>) -> ShellIntent {
    match result {
        Ok(delivery) => ShellIntent::MergeSucceeded {
            message: format!(
                "Success! Your {} download is ready: {}",
                delivery.file_name(),
                delivery.path.display()
            ),
        },
        Err(err) => ShellIntent::MergeFailed {
            message: err.to_string(),
        },
    }
}
