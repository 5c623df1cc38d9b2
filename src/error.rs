//! Error types for the Graft change-reconciliation engine.

use thiserror::Error;

/// Structural errors raised by the path trie
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TrieError {
    #[error("'{0}' is a file and cannot contain entries")]
    NotADirectory(String),
}

/// Reconciliation conflicts: a change record is structurally inconsistent
/// with the state accumulated from prior records.
///
/// Conflicts are fatal in strict mode and skipped with a log entry in
/// lenient mode. The trie and the namespace views always raise; only the
/// reconciler consults the mode.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConflictError {
    #[error(transparent)]
    Structure(#[from] TrieError),

    #[error("file already exists: {0}")]
    FileExists(String),

    #[error("entry already exists: {0}")]
    EntryExists(String),

    #[error("no such file: {0}")]
    NoSuchFile(String),

    #[error("no such directory: {0}")]
    NoSuchDirectory(String),

    #[error("parent directory of '{0}' already deleted")]
    ParentDeleted(String),

    #[error("cannot modify deleted file: {0}")]
    ModifyDeleted(String),

    #[error("directory already deleted: {0}")]
    AlreadyDeleted(String),
}

/// Content-lookup collaborator errors
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("content not found for {path}@{version}")]
    NotFound { path: String, version: String },

    #[error("content retrieval I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Top-level reconciliation errors
#[derive(Debug, Error)]
pub enum ReconcileError {
    #[error("invalid path '{path}': {reason}")]
    InvalidPath { path: String, reason: &'static str },

    #[error("reconciliation conflict: {0}")]
    Conflict(#[from] ConflictError),

    #[error("internal invariant violated: {0}")]
    Invariant(String),

    #[error("content retrieval failed: {0}")]
    Content(#[from] ContentError),

    #[error("patch sink I/O error: {0}")]
    Sink(#[from] std::io::Error),
}
