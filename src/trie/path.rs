//! Path syntax validation for slash-separated repository paths

use crate::error::ReconcileError;

/// Validate the path syntax contract
///
/// A path is valid iff it is non-empty, does not start or end with `/`, and
/// contains no empty segment (`//`). Invalid paths are rejected before any
/// reconciliation occurs and are fatal regardless of mode.
pub fn validate_path(path: &str) -> Result<(), ReconcileError> {
    let reason = if path.is_empty() {
        "path is empty"
    } else if path.starts_with('/') {
        "path must not start with '/'"
    } else if path.ends_with('/') {
        "path must not end with '/'"
    } else if path.contains("//") {
        "path must not contain an empty segment"
    } else {
        return Ok(());
    };

    Err(ReconcileError::InvalidPath {
        path: path.to_string(),
        reason,
    })
}
