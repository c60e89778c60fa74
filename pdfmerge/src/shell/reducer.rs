//! Pure state transitions of the shell.

use super::intent::ShellIntent;
use super::state::{FALLBACK_ERROR_MESSAGE, MERGING_MESSAGE, MergeStatus, ShellState};

/// Transforms state based on intents.
///
/// The reducer is the only place where state transitions happen.
/// It must be a pure function: (State, Intent) -> State
pub trait Reducer {
    /// The state type this reducer operates on.
    type State;

    /// The intent type this reducer handles.
    type Intent;

    /// Process an intent and return the new state.
    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State;
}

/// Reducer for the merge shell.
pub struct ShellReducer;

impl Reducer for ShellReducer {
    type State = ShellState;
    type Intent = ShellIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            ShellIntent::FilesSelected(selected_files) => ShellState {
                selected_files,
                status: MergeStatus::Idle,
                message: String::new(),
                generation: state.generation.wrapping_add(1),
            },

            // Gating happens before the intent is dispatched; a disabled
            // action leaves the state as it was.
            ShellIntent::MergeStarted if !state.can_merge() => state,
            ShellIntent::MergeStarted => ShellState {
                status: MergeStatus::Merging,
                message: MERGING_MESSAGE.to_string(),
                ..state
            },

            ShellIntent::MergeSucceeded { message } => ShellState {
                status: MergeStatus::Success,
                message,
                ..state
            },

            ShellIntent::MergeFailed { message } => {
                let message = if message.trim().is_empty() {
                    FALLBACK_ERROR_MESSAGE.to_string()
                } else {
                    message
                };
                ShellState {
                    status: MergeStatus::Error,
                    message,
                    ..state
                }
            }
        }
    }
}
