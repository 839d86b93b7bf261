//! Collaborator traits at the subsystem's seams.
//!
//! The control plane (credential issuer, deletion endpoint) and the raw byte
//! transfer are reached only through these traits, so callers can swap the
//! HTTP implementations for scripted ones in tests.

use async_trait::async_trait;
use bytes::Bytes;
use std::sync::Arc;

use dossier_core::models::{FileDescriptor, UploadIntent};

use crate::error::{DeletionError, IssueError, TransferError};

/// Progress callback: invoked with percent sent (0-100), non-decreasing
/// within a single transfer.
pub type ProgressFn = Arc<dyn Fn(u8) + Send + Sync>;

/// Issues time-limited write credentials for a batch of files.
///
/// The response may legitimately cover fewer files than the request (files
/// rejected by server-side policy are omitted) and carries no ordering
/// guarantee; consumers index by correlation id, never by position.
#[async_trait]
pub trait IntentIssuer: Send + Sync {
    async fn issue_intents(
        &self,
        files: &[FileDescriptor],
    ) -> Result<Vec<UploadIntent>, IssueError>;
}

/// Performs one direct write of a payload to a signed URL.
///
/// Exactly one attempt; any 2xx response is success. Progress callbacks are
/// emitted as bytes are handed to the transport and are monotonic within the
/// call. No side effects beyond the remote write.
#[async_trait]
pub trait TransferExecutor: Send + Sync {
    async fn transfer(
        &self,
        intent: &UploadIntent,
        payload: Bytes,
        content_type: &str,
        on_progress: ProgressFn,
    ) -> Result<(), TransferError>;
}

/// Deletes the persisted metadata record (and backing object) for a document.
#[async_trait]
pub trait DocumentDeleter: Send + Sync {
    async fn delete_document(&self, document_id: &str) -> Result<(), DeletionError>;
}
