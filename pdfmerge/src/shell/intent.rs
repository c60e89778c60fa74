//! Events that change the shell state.

use super::state::SelectedFile;

/// Something that happened to the shell.
///
/// Intents are processed by [`super::ShellReducer`] to produce new states.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellIntent {
    /// The host reported a new selection, in order.
    FilesSelected(Vec<SelectedFile>),

    /// The merge action was invoked while enabled.
    MergeStarted,

    /// The merged document was delivered.
    MergeSucceeded {
        /// Confirmation shown to the user.
        message: String,
    },

    /// The merge or its delivery failed.
    MergeFailed {
        /// The failure's message, possibly empty.
        message: String,
    },
}
