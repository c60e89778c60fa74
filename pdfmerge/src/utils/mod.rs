//! Utilities for path collection and size display.

use crate::{Result, error::PdfMergeError};
use std::path::PathBuf;

/// Expand multiple glob patterns into filesystem paths.
///
/// Accepts anything iterable with items that convert to `&str`, e.g.:
/// `&[&str]`, `Vec<String>`, or `Vec<&str>`.
///
/// Patterns are expanded in the order given; a pattern that matches nothing
/// contributes nothing. Plain paths without wildcards pass through unchanged
/// even if they do not exist, so the caller can report them.
///
/// Errors:
/// - Propagates `glob` parse errors.
/// - Propagates filesystem errors from glob iterator.
pub fn collect_paths_for_patterns<T>(patterns: T) -> Result<Vec<PathBuf>>
where
    T: IntoIterator,
    T::Item: AsRef<str>,
{
    let mut resolved_paths = Vec::new();

    for pattern in patterns {
        let pattern = pattern.as_ref();
        if is_glob(pattern) {
            resolved_paths.extend(collect_paths_for_pattern(pattern)?);
        } else {
            resolved_paths.push(PathBuf::from(pattern));
        }
    }

    Ok(resolved_paths)
}

/// Expand a single glob pattern into filesystem paths.
///
/// Pattern examples:
/// - `"**/*.pdf"`
/// - `"./docs/*.pdf"`
fn collect_paths_for_pattern(pattern: &str) -> Result<Vec<PathBuf>> {
    let paths = glob::glob(pattern).map_err(|err| PdfMergeError::invalid_config(format!(
        "Invalid pattern {pattern}: {err}"
    )))?;

    paths
        .map(|entry| entry.map_err(|err| PdfMergeError::other(err.to_string())))
        .collect()
}

fn is_glob(pattern: &str) -> bool {
    pattern.contains(['*', '?', '['])
}

/// Format a byte count the way the selection list shows it: kilobytes with
/// one decimal.
pub fn format_file_size(size: u64) -> String {
    format!("{:.1} KB", size as f64 / 1024.0)
}
