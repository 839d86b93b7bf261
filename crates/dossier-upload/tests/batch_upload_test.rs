mod helpers;

use std::sync::Arc;
use std::time::Duration;

use helpers::{batch_file, ScriptedIssuer, ScriptedTransfer};

use dossier_core::models::UploadStatus;
use dossier_upload::{UploadBatch, UploadCoordinator, UploadError};

fn coordinator(
    issuer: Arc<ScriptedIssuer>,
    transfer: Arc<ScriptedTransfer>,
    max_concurrent: usize,
) -> UploadCoordinator {
    UploadCoordinator::new(issuer, transfer, max_concurrent)
}

#[tokio::test]
async fn batch_returns_one_outcome_per_file_matched_by_correlation_id() {
    let issuer = Arc::new(ScriptedIssuer::accepting(&["a", "b", "d"]));
    let transfer = Arc::new(ScriptedTransfer::succeeding());
    let coordinator = coordinator(issuer, transfer, 4);

    let files = vec![
        batch_file("a.pdf", "a"),
        batch_file("b.pdf", "b"),
        batch_file("c.pdf", "c"),
        batch_file("d.pdf", "d"),
    ];
    let outcome = coordinator.submit_batch(files).await.unwrap();

    assert_eq!(outcome.outcomes.len(), 4);
    let ids: Vec<_> = outcome
        .outcomes
        .iter()
        .map(|s| s.correlation_id.as_str())
        .collect();
    assert_eq!(ids, vec!["a", "b", "c", "d"]);
}

#[tokio::test]
async fn partial_issuance_fails_omitted_files_without_transfer_attempts() {
    // Scenario A: three files, the issuer omits "b". Siblings settle
    // normally and keep their document ids; the batch signal is advisory.
    let issuer = Arc::new(ScriptedIssuer::accepting(&["a", "c"]));
    let transfer = Arc::new(ScriptedTransfer::succeeding());
    let coordinator = coordinator(issuer, Arc::clone(&transfer), 4);

    let files = vec![
        batch_file("a.pdf", "a"),
        batch_file("b.pdf", "b"),
        batch_file("c.pdf", "c"),
    ];
    let outcome = coordinator.submit_batch(files).await.unwrap();

    assert!(!outcome.overall_success);

    let by_id = |id: &str| {
        outcome
            .outcomes
            .iter()
            .find(|s| s.correlation_id == id)
            .unwrap()
    };

    assert_eq!(by_id("a").status, UploadStatus::Completed);
    assert_eq!(by_id("a").document_id.as_deref(), Some("doc-a"));
    assert_eq!(by_id("c").status, UploadStatus::Completed);
    assert_eq!(by_id("c").document_id.as_deref(), Some("doc-c"));

    let b = by_id("b");
    assert_eq!(b.status, UploadStatus::Failed);
    assert!(b.document_id.is_none());
    assert!(b.error.is_some());

    // The omitted file never reached the storage backend.
    let attempts = transfer.attempts();
    assert_eq!(attempts.len(), 2);
    assert!(!attempts.contains(&"b".to_string()));
}

#[tokio::test]
async fn failed_transfer_marks_only_that_file() {
    // Scenario B: a single file whose PUT returns 500 goes
    // Pending -> InProgress -> Failed.
    let issuer = Arc::new(ScriptedIssuer::accepting(&["a"]));
    let transfer = Arc::new(ScriptedTransfer::failing_for(&["a"]));
    let coordinator = coordinator(issuer, transfer, 4);

    let outcome = coordinator
        .submit_batch(vec![batch_file("a.pdf", "a")])
        .await
        .unwrap();

    assert!(!outcome.overall_success);
    let state = &outcome.outcomes[0];
    assert_eq!(state.status, UploadStatus::Failed);
    // Progress was recorded before the failure, so the transfer was in flight.
    assert_eq!(state.progress_percent, 25);
    assert!(state.error.as_deref().unwrap().contains("500"));
}

#[tokio::test]
async fn sibling_success_survives_a_failed_transfer() {
    let issuer = Arc::new(ScriptedIssuer::accepting(&["a", "b"]));
    let transfer = Arc::new(ScriptedTransfer::failing_for(&["b"]));
    let coordinator = coordinator(issuer, transfer, 4);

    let outcome = coordinator
        .submit_batch(vec![batch_file("a.pdf", "a"), batch_file("b.pdf", "b")])
        .await
        .unwrap();

    assert!(!outcome.overall_success);
    assert_eq!(outcome.outcomes[0].status, UploadStatus::Completed);
    assert_eq!(outcome.outcomes[1].status, UploadStatus::Failed);
}

#[tokio::test]
async fn issuance_failure_aborts_before_any_transfer() {
    // Scenario E: the credential call itself fails; nothing is attempted and
    // no file ever leaves Pending.
    let issuer = Arc::new(ScriptedIssuer::unreachable());
    let transfer = Arc::new(ScriptedTransfer::succeeding());
    let coordinator = coordinator(issuer, Arc::clone(&transfer), 4);

    let batch = UploadBatch::new(vec![batch_file("a.pdf", "a"), batch_file("b.pdf", "b")]).unwrap();
    let result = coordinator.run(&batch).await;

    assert!(matches!(result, Err(UploadError::Issuance(_))));
    assert!(transfer.attempts().is_empty());
    assert!(batch
        .tracker()
        .snapshot()
        .iter()
        .all(|s| s.status == UploadStatus::Pending));
}

#[tokio::test]
async fn overall_success_requires_every_file_completed() {
    let issuer = Arc::new(ScriptedIssuer::accepting(&["a", "b", "c"]));
    let transfer = Arc::new(ScriptedTransfer::succeeding());
    let coordinator = coordinator(issuer, transfer, 4);

    let outcome = coordinator
        .submit_batch(vec![
            batch_file("a.pdf", "a"),
            batch_file("b.pdf", "b"),
            batch_file("c.pdf", "c"),
        ])
        .await
        .unwrap();

    assert!(outcome.overall_success);
    assert!(outcome
        .outcomes
        .iter()
        .all(|s| s.status == UploadStatus::Completed && s.progress_percent == 100));
}

#[tokio::test]
async fn empty_batch_is_rejected_before_issuance() {
    let issuer = Arc::new(ScriptedIssuer::accepting(&[]));
    let transfer = Arc::new(ScriptedTransfer::succeeding());
    let coordinator = coordinator(Arc::clone(&issuer), transfer, 4);

    let result = coordinator.submit_batch(Vec::new()).await;
    assert!(matches!(result, Err(UploadError::EmptyBatch)));
    assert_eq!(issuer.calls.load(std::sync::atomic::Ordering::SeqCst), 0);
}

#[tokio::test]
async fn duplicate_correlation_ids_are_rejected() {
    let issuer = Arc::new(ScriptedIssuer::accepting(&["a"]));
    let transfer = Arc::new(ScriptedTransfer::succeeding());
    let coordinator = coordinator(issuer, transfer, 4);

    let result = coordinator
        .submit_batch(vec![batch_file("a.pdf", "a"), batch_file("a2.pdf", "a")])
        .await;
    assert!(matches!(result, Err(UploadError::DuplicateCorrelationId(_))));
}

#[tokio::test]
async fn fan_out_respects_the_concurrency_cap() {
    let ids = ["a", "b", "c", "d", "e", "f"];
    let issuer = Arc::new(ScriptedIssuer::accepting(&ids));
    let transfer = Arc::new(ScriptedTransfer::with_delay(Duration::from_millis(20)));
    let coordinator = coordinator(issuer, Arc::clone(&transfer), 2);

    let files = ids
        .iter()
        .map(|id| batch_file(&format!("{id}.pdf"), id))
        .collect();
    let outcome = coordinator.submit_batch(files).await.unwrap();

    assert!(outcome.overall_success);
    let peak = transfer
        .peak_concurrency
        .load(std::sync::atomic::Ordering::SeqCst);
    assert!(peak <= 2, "peak concurrency {peak} exceeded the cap");
}

#[tokio::test]
async fn batch_is_closable_once_every_file_settles() {
    let issuer = Arc::new(ScriptedIssuer::accepting(&["a"]));
    let transfer = Arc::new(ScriptedTransfer::failing_for(&["a"]));
    let coordinator = coordinator(issuer, transfer, 4);

    let batch = UploadBatch::new(vec![batch_file("a.pdf", "a"), batch_file("b.pdf", "b")]).unwrap();
    assert!(!batch.is_closable());

    let outcome = coordinator.run(&batch).await.unwrap();
    assert!(batch.is_closable());
    assert!(!outcome.overall_success);
}
