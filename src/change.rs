//! Change records
//!
//! The input model: per-path change records as reported, in order, by the
//! version-control server. Revision tokens are opaque strings; renames are
//! represented upstream as delete+add pairs, never as a distinct kind.

use serde::{Deserialize, Serialize};

/// Kind of a per-path version-control change
///
/// A closed union: unknown kinds fail at deserialization, before any
/// reconciliation starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChangeKind {
    FileAdded,
    FileChanged,
    FileRemoved,
    DirAdded,
    DirRemoved,
}

/// One per-path change reported by the version-control server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeRecord {
    pub kind: ChangeKind,
    /// Current path of the changed object
    pub path: String,
    /// Previous path; equal to `path` for every served change
    #[serde(default)]
    pub prev_path: String,
    /// Revision token before the change (opaque)
    #[serde(default)]
    pub before_version: String,
    /// Revision token after the change (opaque)
    #[serde(default)]
    pub after_version: String,
}

impl ChangeRecord {
    /// Build a record whose previous path mirrors the current one
    pub fn new(
        kind: ChangeKind,
        path: impl Into<String>,
        before_version: impl Into<String>,
        after_version: impl Into<String>,
    ) -> Self {
        let path = path.into();
        Self {
            kind,
            prev_path: path.clone(),
            path,
            before_version: before_version.into(),
            after_version: after_version.into(),
        }
    }
}
