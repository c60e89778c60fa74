//! The merge shell.
//!
//! The shell owns the ordered file selection and the status of the merge
//! action, enforces the two-file minimum and turns every failure into an
//! error status. Hosts (the CLI, or anything else) only report selections and
//! invoke the action.
//!
//! # Architecture
//!
//! ```text
//! ShellIntent ──→ ShellReducer ──→ ShellState ──→ host renders
//!      ↑                                               │
//!      └────────────── select / merge ─────────────────┘
//! ```
//!
//! State changes go through the pure [`ShellReducer`]; [`MergeShell`] wraps
//! it with the side effects (stat, read, merge, deliver).
//!
//! Status lifecycle: `idle → merging → success | error`, and back to `idle`
//! on every new selection.

mod app;
mod intent;
mod reducer;
mod state;

pub use app::{MergeJob, MergeOutcome, MergeShell};
pub use intent::ShellIntent;
pub use reducer::{Reducer, ShellReducer};
pub use state::{
    EMPTY_SELECTION_HINT, FALLBACK_ERROR_MESSAGE, GATE_HINT, MERGING_MESSAGE, MIN_FILES,
    MergeStatus, SelectedFile, ShellSnapshot, ShellState,
};
