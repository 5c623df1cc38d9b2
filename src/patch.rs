//! Patch operations and collaborator boundaries
//!
//! The reconciler's output is a `PatchPlan`: an ordered list of operations,
//! create/write annotated with the resolved version. Applying a plan is the
//! only phase that performs I/O; it drives a `PatchSink` in plan order,
//! fetching content bytes from a `ContentSource` per create/write.

use crate::error::{ContentError, ReconcileError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

/// One filesystem patch operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PatchOp {
    DeleteFile { path: String },
    DeleteDirectory { path: String },
    CreateDirectory { path: String },
    CreateFile { path: String, version: String },
    WriteFile { path: String, version: String },
}

impl PatchOp {
    pub fn path(&self) -> &str {
        match self {
            PatchOp::DeleteFile { path }
            | PatchOp::DeleteDirectory { path }
            | PatchOp::CreateDirectory { path }
            | PatchOp::CreateFile { path, .. }
            | PatchOp::WriteFile { path, .. } => path,
        }
    }
}

/// Ordered operation list produced by a reconciliation run
///
/// Operations appear in the fixed emission order: delete files, delete
/// directories, create directories, create files, write files; within each
/// group, deterministic trie-traversal order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatchPlan {
    pub ops: Vec<PatchOp>,
}

impl PatchPlan {
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Realize the plan: drive `sink` in plan order, fetching content bytes
    /// for each create/write from `source`
    ///
    /// Content and sink failures are fatal; a patch cannot be completed
    /// without them. Content lookups never re-enter reconciler state.
    pub fn apply<C, S>(&self, source: &C, sink: &mut S) -> Result<(), ReconcileError>
    where
        C: ContentSource + ?Sized,
        S: PatchSink + ?Sized,
    {
        for op in &self.ops {
            debug!(op = ?op, "applying patch operation");
            match op {
                PatchOp::DeleteFile { path } => sink.delete_file(path)?,
                PatchOp::DeleteDirectory { path } => sink.delete_directory(path)?,
                PatchOp::CreateDirectory { path } => sink.create_directory(path)?,
                PatchOp::CreateFile { path, version } => {
                    let content = source.fetch(path, version)?;
                    sink.create_file(path, version, &content)?;
                }
                PatchOp::WriteFile { path, version } => {
                    let content = source.fetch(path, version)?;
                    sink.write_file(path, version, &content)?;
                }
            }
        }
        Ok(())
    }
}

/// Content-lookup collaborator
///
/// Returns the readable content of the object at `path` and `version`, or a
/// not-found condition. Retrieval may block but must not mutate engine
/// state.
pub trait ContentSource {
    fn fetch(&self, path: &str, version: &str) -> Result<Vec<u8>, ContentError>;
}

/// Patch sink collaborator
///
/// Physically realizes each operation. The engine guarantees the correct
/// operation set and order; the sink owns everything below that boundary.
pub trait PatchSink {
    fn delete_file(&mut self, path: &str) -> std::io::Result<()>;
    fn delete_directory(&mut self, path: &str) -> std::io::Result<()>;
    fn create_directory(&mut self, path: &str) -> std::io::Result<()>;
    fn create_file(&mut self, path: &str, version: &str, content: &[u8]) -> std::io::Result<()>;
    fn write_file(&mut self, path: &str, version: &str, content: &[u8]) -> std::io::Result<()>;
}

/// In-memory content source keyed by `(path, version)`
///
/// The reference collaborator for tests and for callers that prefetch
/// content before applying a plan.
#[derive(Debug, Clone, Default)]
pub struct MemoryContentSource {
    objects: HashMap<(String, String), Vec<u8>>,
}

impl MemoryContentSource {
    pub fn new() -> Self {
        Self {
            objects: HashMap::new(),
        }
    }

    pub fn insert(
        &mut self,
        path: impl Into<String>,
        version: impl Into<String>,
        content: impl Into<Vec<u8>>,
    ) {
        self.objects
            .insert((path.into(), version.into()), content.into());
    }
}

impl ContentSource for MemoryContentSource {
    fn fetch(&self, path: &str, version: &str) -> Result<Vec<u8>, ContentError> {
        self.objects
            .get(&(path.to_string(), version.to_string()))
            .cloned()
            .ok_or_else(|| ContentError::NotFound {
                path: path.to_string(),
                version: version.to_string(),
            })
    }
}
