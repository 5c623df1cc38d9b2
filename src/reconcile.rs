//! Change Reconciler
//!
//! Folds an ordered list of change records into two namespace views (the
//! positive view accumulating net creations and writes, the negative view
//! accumulating net deletions) and projects both into a deterministic,
//! apply-safe patch plan. The whole reconciler is constructed fresh per
//! batch and consumed by the run; there is no cross-call state.

use crate::change::{ChangeKind, ChangeRecord};
use crate::error::{ConflictError, ReconcileError};
use crate::ledger::VersionLedger;
use crate::patch::{PatchOp, PatchPlan};
use crate::trie::path;
use crate::view::NamespaceView;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// Conflict policy for a reconciliation run
///
/// Strict aborts the whole batch on the first conflict. Lenient logs the
/// conflicting record and skips it, for callers that must tolerate partial
/// inconsistency in upstream history; such callers should document the
/// choice. Path-syntax and internal-invariant errors are fatal in both
/// modes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReconcileMode {
    #[default]
    Strict,
    Lenient,
}

/// Reconciliation state machine
///
/// Owns the positive and negative namespace views plus the version ledger.
/// `reconcile` consumes the instance: one reconciler per change batch.
#[derive(Debug, Default)]
pub struct Reconciler {
    positive: NamespaceView,
    negative: NamespaceView,
    ledger: VersionLedger,
    mode: ReconcileMode,
}

impl Reconciler {
    pub fn new(mode: ReconcileMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    /// Fold the ordered change batch and project the final patch plan
    ///
    /// Every record's path is validated before any trie mutation. Conflicts
    /// are mode-gated here and nowhere else; the views always raise.
    #[instrument(skip(self, changes), fields(records = changes.len(), mode = ?self.mode))]
    pub fn reconcile(mut self, changes: &[ChangeRecord]) -> Result<PatchPlan, ReconcileError> {
        for record in changes {
            path::validate_path(&record.path)?;
            if let Err(conflict) = self.transition(record) {
                match self.mode {
                    ReconcileMode::Strict => return Err(conflict.into()),
                    ReconcileMode::Lenient => {
                        warn!(
                            kind = ?record.kind,
                            path = %record.path,
                            %conflict,
                            "skipping conflicting change record"
                        );
                    }
                }
            }
        }
        self.project()
    }

    fn transition(&mut self, record: &ChangeRecord) -> Result<(), ConflictError> {
        debug!(kind = ?record.kind, path = %record.path, "processing change record");
        match record.kind {
            ChangeKind::FileAdded => self.file_added(record),
            ChangeKind::FileChanged => self.file_changed(record),
            ChangeKind::FileRemoved => self.file_removed(record),
            ChangeKind::DirAdded => self.dir_added(record),
            ChangeKind::DirRemoved => self.dir_removed(record),
        }
    }

    /// A directory on the way to `path` was deleted and not re-created
    fn parent_deleted(&self, path: &str) -> bool {
        self.negative.contains_ancestor(path) && !self.positive.contains_ancestor(path)
    }

    fn file_added(&mut self, record: &ChangeRecord) -> Result<(), ConflictError> {
        let path = record.path.as_str();
        if self.parent_deleted(path) {
            return Err(ConflictError::ParentDeleted(path.to_string()));
        }

        if self.negative.contains_file(path) {
            // deleted then recreated nets to an overwrite
            self.negative.delete_file(path)?;
            self.positive.write_file(path)?;
        } else {
            self.positive.create_file(path)?;
        }

        self.ledger.record(path, &record.after_version);
        Ok(())
    }

    fn file_changed(&mut self, record: &ChangeRecord) -> Result<(), ConflictError> {
        let path = record.path.as_str();
        if self.parent_deleted(path) {
            return Err(ConflictError::ParentDeleted(path.to_string()));
        }
        if self.negative.contains_file(path) {
            return Err(ConflictError::ModifyDeleted(path.to_string()));
        }

        // first touch counts as an implicit write; repeated changes coalesce
        if !self.positive.contains_file(path) {
            self.positive.write_file(path)?;
        }

        self.ledger.record(path, &record.after_version);
        Ok(())
    }

    fn file_removed(&mut self, record: &ChangeRecord) -> Result<(), ConflictError> {
        let path = record.path.as_str();
        if self.parent_deleted(path) {
            return Err(ConflictError::ParentDeleted(path.to_string()));
        }

        // a file created in this batch nets out without a deletion
        let brand_new = self.positive.contains_new_file(path);
        if !brand_new {
            self.negative.create_file(path).map_err(|err| match err {
                ConflictError::FileExists(p) => ConflictError::AlreadyDeleted(p),
                other => other,
            })?;
        }
        if self.positive.contains_file(path) {
            self.positive.delete_file(path)?;
        }

        self.ledger.forget(path);
        Ok(())
    }

    fn dir_added(&mut self, record: &ChangeRecord) -> Result<(), ConflictError> {
        let path = record.path.as_str();
        if self.parent_deleted(path) {
            return Err(ConflictError::ParentDeleted(path.to_string()));
        }

        if self.negative.contains_directory(path) {
            // deleted then re-added: the directory never left the filesystem
            self.negative.delete_directory(path)
        } else {
            self.positive.create_directory(path)
        }
    }

    fn dir_removed(&mut self, record: &ChangeRecord) -> Result<(), ConflictError> {
        let path = record.path.as_str();

        if self.positive.contains_node(path) {
            // cancels the pending creations beneath it wholesale; a marked
            // file at the path surfaces as a kind mismatch
            return self.positive.delete_directory(path);
        }
        if self.negative.contains_ancestor(path) {
            return Err(ConflictError::ParentDeleted(path.to_string()));
        }
        if self.negative.contains_directory(path) {
            return Err(ConflictError::AlreadyDeleted(path.to_string()));
        }
        if self.negative.contains_node(path) {
            // deeper deletions are subsumed by deleting this directory
            self.negative.delete_directory(path)?;
        }
        self.negative.create_directory(path)
    }

    /// Project both views into the ordered operation list
    ///
    /// Fixed emission order: delete files, delete directories, create
    /// directories, create files, write files. On the deletion side the
    /// new/modified distinction is meaningless; both file buckets are
    /// deletions. A positive file without a ledger entry is an internal
    /// defect, never a normal conflict.
    fn project(self) -> Result<PatchPlan, ReconcileError> {
        let created = self.positive.collect();
        let deleted = self.negative.collect();

        let mut ops = Vec::new();
        for file_path in deleted.new_files.into_iter().chain(deleted.modified_files) {
            ops.push(PatchOp::DeleteFile { path: file_path });
        }
        for dir_path in deleted.directories {
            ops.push(PatchOp::DeleteDirectory { path: dir_path });
        }
        for dir_path in created.directories {
            ops.push(PatchOp::CreateDirectory { path: dir_path });
        }
        for file_path in created.new_files {
            let version = resolve_version(&self.ledger, &file_path)?;
            ops.push(PatchOp::CreateFile {
                path: file_path,
                version,
            });
        }
        for file_path in created.modified_files {
            let version = resolve_version(&self.ledger, &file_path)?;
            ops.push(PatchOp::WriteFile {
                path: file_path,
                version,
            });
        }

        info!(ops = ops.len(), "projected patch plan");
        Ok(PatchPlan { ops })
    }
}

fn resolve_version(ledger: &VersionLedger, path: &str) -> Result<String, ReconcileError> {
    ledger
        .resolve(path)
        .map(str::to_string)
        .ok_or_else(|| ReconcileError::Invariant(format!("no version recorded for '{}'", path)))
}
