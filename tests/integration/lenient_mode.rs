//! Lenient-mode behavior: conflicting records are skipped, fatal errors are not

use graft::change::{ChangeKind, ChangeRecord};
use graft::error::ReconcileError;
use graft::patch::PatchOp;
use graft::reconcile::{ReconcileMode, Reconciler};

fn record(kind: ChangeKind, path: &str, version: &str) -> ChangeRecord {
    ChangeRecord::new(kind, path, "", version)
}

#[test]
fn test_conflicting_record_is_skipped() {
    let plan = Reconciler::new(ReconcileMode::Lenient)
        .reconcile(&[
            record(ChangeKind::FileAdded, "keep", "1"),
            record(ChangeKind::FileAdded, "keep", "2"),
        ])
        .unwrap();
    assert_eq!(
        plan.ops,
        vec![PatchOp::CreateFile {
            path: "keep".to_string(),
            version: "1".to_string(),
        }]
    );
}

#[test]
fn test_batch_continues_past_skipped_record() {
    let plan = Reconciler::new(ReconcileMode::Lenient)
        .reconcile(&[
            record(ChangeKind::DirRemoved, "gone", "1"),
            // conflicts: parent deleted
            record(ChangeKind::FileAdded, "gone/file", "2"),
            record(ChangeKind::FileAdded, "kept", "3"),
        ])
        .unwrap();
    assert_eq!(
        plan.ops,
        vec![
            PatchOp::DeleteDirectory {
                path: "gone".to_string(),
            },
            PatchOp::CreateFile {
                path: "kept".to_string(),
                version: "3".to_string(),
            },
        ]
    );
}

#[test]
fn test_path_syntax_errors_stay_fatal() {
    let err = Reconciler::new(ReconcileMode::Lenient)
        .reconcile(&[record(ChangeKind::FileAdded, "bad//path", "1")])
        .unwrap_err();
    assert!(matches!(err, ReconcileError::InvalidPath { .. }));
}

#[test]
fn test_strict_and_lenient_agree_on_clean_batches() {
    let changes = vec![
        record(ChangeKind::DirAdded, "dir", "1"),
        record(ChangeKind::FileAdded, "dir/a", "2"),
        record(ChangeKind::FileChanged, "other", "3"),
    ];

    let strict = Reconciler::new(ReconcileMode::Strict)
        .reconcile(&changes)
        .unwrap();
    let lenient = Reconciler::new(ReconcileMode::Lenient)
        .reconcile(&changes)
        .unwrap();
    assert_eq!(strict, lenient);
}
