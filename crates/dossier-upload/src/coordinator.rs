//! Batch orchestration: one issuance call, concurrent fan-out, settle-all
//! aggregation.

use futures::future::join_all;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Semaphore;

use dossier_core::models::{BatchFile, IntentMatch, UploadState, UploadStatus};

use crate::batch::UploadBatch;
use crate::error::UploadError;
use crate::traits::{IntentIssuer, ProgressFn, TransferExecutor};

/// Aggregated result of one batch: every per-file outcome plus the advisory
/// batch-level signal.
#[derive(Debug)]
pub struct BatchOutcome {
    /// One state per submitted file, in submission order.
    pub outcomes: Vec<UploadState>,
    /// True iff every file completed. Advisory, not transactional: completed
    /// siblings of a failed file stay valid and addressable.
    pub overall_success: bool,
}

/// Orchestrates credential issuance, concurrent transfers, and outcome
/// aggregation for one batch at a time.
pub struct UploadCoordinator {
    issuer: Arc<dyn IntentIssuer>,
    executor: Arc<dyn TransferExecutor>,
    max_concurrent_transfers: usize,
}

impl UploadCoordinator {
    pub fn new(
        issuer: Arc<dyn IntentIssuer>,
        executor: Arc<dyn TransferExecutor>,
        max_concurrent_transfers: usize,
    ) -> Self {
        Self {
            issuer,
            executor,
            max_concurrent_transfers: max_concurrent_transfers.max(1),
        }
    }

    /// Submit a set of files as one batch and wait for every outcome.
    pub async fn submit_batch(&self, files: Vec<BatchFile>) -> Result<BatchOutcome, UploadError> {
        let batch = UploadBatch::new(files)?;
        self.run(&batch).await
    }

    /// Run a prepared batch to completion.
    ///
    /// The issuance call is the commitment point: if it fails no transfer is
    /// attempted for any file. After it, every file settles independently;
    /// the join waits for all transfers and never cancels siblings of a
    /// failed file.
    #[tracing::instrument(skip(self, batch), fields(batch_size = batch.files().len()))]
    pub async fn run(&self, batch: &UploadBatch) -> Result<BatchOutcome, UploadError> {
        let tracker = Arc::clone(batch.tracker());
        let descriptors = batch.descriptors();

        let intents = self.issuer.issue_intents(&descriptors).await.map_err(|e| {
            tracing::error!(error = %e, "Credential issuance failed, aborting batch");
            UploadError::Issuance(e)
        })?;

        // Single keyed pass over the response; the array may be shorter than
        // the request and is not ordered.
        let mut by_correlation: HashMap<String, _> = intents
            .into_iter()
            .map(|intent| (intent.correlation_id.clone(), intent))
            .collect();

        let semaphore = Arc::new(Semaphore::new(self.max_concurrent_transfers));
        let mut transfers = Vec::new();

        for file in batch.files() {
            let correlation_id = file.descriptor.correlation_id.clone();
            let matched = match by_correlation.remove(&correlation_id) {
                Some(intent) => IntentMatch::Matched(intent),
                None => IntentMatch::Unmatched,
            };

            let intent = match matched {
                IntentMatch::Unmatched => {
                    tracing::warn!(
                        correlation_id = %correlation_id,
                        name = %file.descriptor.name,
                        "No upload intent issued for file"
                    );
                    tracker.mark_failed(&correlation_id, "no signed url issued for this file");
                    continue;
                }
                IntentMatch::Matched(intent) => intent,
            };

            tracker.assign_document(&correlation_id, &intent.document_id);

            let executor = Arc::clone(&self.executor);
            let tracker = Arc::clone(&tracker);
            let semaphore = Arc::clone(&semaphore);
            let payload = file.payload.clone();
            let content_type = file.descriptor.content_type.clone();

            transfers.push(async move {
                let _permit = match semaphore.acquire_owned().await {
                    Ok(permit) => permit,
                    Err(_) => {
                        tracker.mark_failed(&correlation_id, "transfer slot unavailable");
                        return;
                    }
                };

                tracker.mark_started(&correlation_id);

                let progress_tracker = Arc::clone(&tracker);
                let progress_id = correlation_id.clone();
                let on_progress: ProgressFn =
                    Arc::new(move |percent| progress_tracker.update(&progress_id, percent));

                match executor
                    .transfer(&intent, payload, &content_type, on_progress)
                    .await
                {
                    Ok(()) => {
                        tracing::debug!(correlation_id = %correlation_id, "File transfer completed");
                        tracker.mark_completed(&correlation_id);
                    }
                    Err(e) => {
                        tracing::warn!(
                            correlation_id = %correlation_id,
                            error = %e,
                            "File transfer failed"
                        );
                        tracker.mark_failed(&correlation_id, &e.to_string());
                    }
                }
            });
        }

        // Settle-all join: collect every outcome before aggregating.
        join_all(transfers).await;

        let outcomes = tracker.snapshot();
        let overall_success = outcomes
            .iter()
            .all(|state| state.status == UploadStatus::Completed);

        tracing::info!(
            batch_size = outcomes.len(),
            overall_success,
            failed = outcomes
                .iter()
                .filter(|s| s.status == UploadStatus::Failed)
                .count(),
            "Batch settled"
        );

        Ok(BatchOutcome {
            outcomes,
            overall_success,
        })
    }
}
