//! End-to-end reconciliation scenarios over the public API

use graft::change::{ChangeKind, ChangeRecord};
use graft::error::{ConflictError, ReconcileError};
use graft::patch::{PatchOp, PatchPlan};
use graft::reconcile::{ReconcileMode, Reconciler};

fn record(kind: ChangeKind, path: &str, version: &str) -> ChangeRecord {
    ChangeRecord::new(kind, path, "", version)
}

fn reconcile(changes: &[ChangeRecord]) -> Result<PatchPlan, ReconcileError> {
    Reconciler::new(ReconcileMode::Strict).reconcile(changes)
}

fn create(path: &str, version: &str) -> PatchOp {
    PatchOp::CreateFile {
        path: path.to_string(),
        version: version.to_string(),
    }
}

fn write(path: &str, version: &str) -> PatchOp {
    PatchOp::WriteFile {
        path: path.to_string(),
        version: version.to_string(),
    }
}

#[test]
fn test_single_add() {
    let plan = reconcile(&[record(ChangeKind::FileAdded, "foo/bar", "1")]).unwrap();
    assert_eq!(plan.ops, vec![create("foo/bar", "1")]);
}

#[test]
fn test_add_then_remove_cancels() {
    let plan = reconcile(&[
        record(ChangeKind::FileAdded, "foo/bar", "1"),
        record(ChangeKind::FileRemoved, "foo/bar", "2"),
    ])
    .unwrap();
    assert!(plan.is_empty());
}

#[test]
fn test_mixed_batch_emission_order() {
    let plan = reconcile(&[
        record(ChangeKind::DirAdded, "foo", "1"),
        record(ChangeKind::FileAdded, "foo/bar", "2"),
        record(ChangeKind::FileRemoved, "foobar", "3"),
    ])
    .unwrap();
    assert_eq!(
        plan.ops,
        vec![
            PatchOp::DeleteFile {
                path: "foobar".to_string(),
            },
            PatchOp::CreateDirectory {
                path: "foo".to_string(),
            },
            create("foo/bar", "2"),
        ]
    );
}

#[test]
fn test_file_cannot_contain_children() {
    let err = reconcile(&[
        record(ChangeKind::FileAdded, "foo", "1"),
        record(ChangeKind::FileAdded, "foo/bar", "2"),
    ])
    .unwrap_err();
    assert!(matches!(
        err,
        ReconcileError::Conflict(ConflictError::Structure(_))
    ));
}

#[test]
fn test_dir_remove_add_remove_nets_to_single_delete() {
    let plan = reconcile(&[
        record(ChangeKind::DirRemoved, "foo", "1"),
        record(ChangeKind::DirAdded, "foo", "2"),
        record(ChangeKind::DirRemoved, "foo", "3"),
    ])
    .unwrap();
    assert_eq!(
        plan.ops,
        vec![PatchOp::DeleteDirectory {
            path: "foo".to_string(),
        }]
    );
}

#[test]
fn test_delete_recreate_becomes_write() {
    let plan = reconcile(&[
        record(ChangeKind::FileRemoved, "foo", "1"),
        record(ChangeKind::FileAdded, "foo", "2"),
    ])
    .unwrap();
    assert_eq!(plan.ops, vec![write("foo", "2")]);
}

#[test]
fn test_changes_coalesce() {
    let plan = reconcile(&[
        record(ChangeKind::FileChanged, "foo", "4"),
        record(ChangeKind::FileChanged, "foo", "9"),
    ])
    .unwrap();
    assert_eq!(plan.ops, vec![write("foo", "9")]);
}

#[test]
fn test_create_absorbs_modify() {
    let plan = reconcile(&[
        record(ChangeKind::FileAdded, "foo", "1"),
        record(ChangeKind::FileChanged, "foo", "2"),
    ])
    .unwrap();
    assert_eq!(plan.ops, vec![create("foo", "2")]);
}

#[test]
fn test_directories_emitted_before_contained_files() {
    let plan = reconcile(&[
        record(ChangeKind::DirAdded, "app", "1"),
        record(ChangeKind::DirAdded, "app/src", "1"),
        record(ChangeKind::FileAdded, "app/src/main.c", "2"),
        record(ChangeKind::FileAdded, "app/readme", "2"),
    ])
    .unwrap();

    let dir_positions: Vec<usize> = plan
        .ops
        .iter()
        .enumerate()
        .filter(|(_, op)| matches!(op, PatchOp::CreateDirectory { .. }))
        .map(|(i, _)| i)
        .collect();
    let file_positions: Vec<usize> = plan
        .ops
        .iter()
        .enumerate()
        .filter(|(_, op)| matches!(op, PatchOp::CreateFile { .. }))
        .map(|(i, _)| i)
        .collect();

    assert_eq!(dir_positions.len(), 2);
    assert_eq!(file_positions.len(), 2);
    assert!(dir_positions.iter().max() < file_positions.iter().min());
}

#[test]
fn test_ancestor_deletion_conflicts() {
    for kind in [
        ChangeKind::FileAdded,
        ChangeKind::FileChanged,
        ChangeKind::FileRemoved,
    ] {
        let err = reconcile(&[
            record(ChangeKind::DirRemoved, "gone", "1"),
            record(kind, "gone/file", "2"),
        ])
        .unwrap_err();
        assert!(
            matches!(
                err,
                ReconcileError::Conflict(ConflictError::ParentDeleted(_))
            ),
            "kind {:?} did not raise a parent-deleted conflict",
            kind
        );
    }
}

#[test]
fn test_dir_add_under_deleted_parent_conflicts() {
    let err = reconcile(&[
        record(ChangeKind::DirRemoved, "gone", "1"),
        record(ChangeKind::DirAdded, "gone/sub", "2"),
    ])
    .unwrap_err();
    assert!(matches!(
        err,
        ReconcileError::Conflict(ConflictError::ParentDeleted(_))
    ));
}

#[test]
fn test_same_input_yields_identical_plans() {
    let changes = vec![
        record(ChangeKind::DirAdded, "b", "1"),
        record(ChangeKind::FileAdded, "b/z", "2"),
        record(ChangeKind::FileAdded, "b/a", "2"),
        record(ChangeKind::FileChanged, "top", "3"),
        record(ChangeKind::FileRemoved, "old", "4"),
        record(ChangeKind::DirRemoved, "legacy", "4"),
    ];

    let first = reconcile(&changes).unwrap();
    let second = reconcile(&changes).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_siblings_emitted_lexicographically() {
    let plan = reconcile(&[
        record(ChangeKind::FileAdded, "zeta", "1"),
        record(ChangeKind::FileAdded, "alpha", "1"),
        record(ChangeKind::FileAdded, "mu", "1"),
    ])
    .unwrap();
    assert_eq!(
        plan.ops,
        vec![create("alpha", "1"), create("mu", "1"), create("zeta", "1")]
    );
}

#[test]
fn test_invalid_paths_rejected_before_reconciliation() {
    for bad in ["", "/abs", "trail/", "a//b"] {
        let err = reconcile(&[record(ChangeKind::FileAdded, bad, "1")]).unwrap_err();
        assert!(
            matches!(err, ReconcileError::InvalidPath { .. }),
            "path {:?} was not rejected",
            bad
        );
    }
}

#[test]
fn test_records_deserialized_from_json_batch() {
    let raw = r#"[
        {"kind": "DirAdded", "path": "foo", "before_version": "", "after_version": "1"},
        {"kind": "FileAdded", "path": "foo/bar", "before_version": "", "after_version": "2"}
    ]"#;
    let changes: Vec<ChangeRecord> = serde_json::from_str(raw).unwrap();
    let plan = reconcile(&changes).unwrap();
    assert_eq!(
        plan.ops,
        vec![
            PatchOp::CreateDirectory {
                path: "foo".to_string(),
            },
            create("foo/bar", "2"),
        ]
    );
}
