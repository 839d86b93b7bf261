//! Reconciles removal of a file from its batch, before or after a persisted
//! metadata record exists.

use std::sync::Arc;

use crate::error::DeletionError;
use crate::progress::ProgressTracker;
use crate::traits::DocumentDeleter;

/// Removes files from a batch, involving the deletion collaborator only when
/// a metadata record was actually created.
#[derive(Clone)]
pub struct CleanupManager {
    deleter: Arc<dyn DocumentDeleter>,
}

impl CleanupManager {
    pub fn new(deleter: Arc<dyn DocumentDeleter>) -> Self {
        Self { deleter }
    }

    /// Remove one file from the batch.
    ///
    /// With no document id the transfer never produced a persisted record, so
    /// removal is local-only: the tracked entry is dropped and no remote call
    /// is made. With a document id the deletion collaborator must confirm
    /// first; on failure the entry is left unchanged so the file stays
    /// visible rather than silently orphaned.
    #[tracing::instrument(skip(self, tracker))]
    pub async fn remove(
        &self,
        tracker: &ProgressTracker,
        correlation_id: &str,
        document_id: Option<&str>,
    ) -> Result<(), DeletionError> {
        let document_id = match document_id {
            None => {
                tracker.remove(correlation_id);
                tracing::debug!(correlation_id, "Removed file with no persisted record");
                return Ok(());
            }
            Some(id) => id,
        };

        match self.deleter.delete_document(document_id).await {
            Ok(()) => {
                tracker.remove(correlation_id);
                tracing::info!(correlation_id, document_id, "Removed uploaded file");
                Ok(())
            }
            Err(e) => {
                tracing::warn!(
                    correlation_id,
                    document_id,
                    error = %e,
                    "Deletion not confirmed, keeping file entry"
                );
                Err(e)
            }
        }
    }
}
