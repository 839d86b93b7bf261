//! Error types for the upload subsystem.
//!
//! One enum per failure domain, matching the blast radius of each: issuance
//! failures abort a whole batch, transfer failures stay local to one file,
//! and deletion failures leave local state untouched. A file omitted from the
//! issuer response is not an error at all; the coordinator records it as an
//! unmatched outcome.

use thiserror::Error;

/// Failure of the batched credential-issuance call. Batch-fatal: no transfer
/// is attempted for any file.
#[derive(Debug, Error)]
pub enum IssueError {
    #[error("Control plane unreachable: {0}")]
    Transport(String),

    #[error("Control plane returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Malformed issuance response: {0}")]
    InvalidResponse(String),
}

/// Failure of one direct byte transfer. File-local: siblings keep their
/// outcomes.
#[derive(Debug, Error)]
pub enum TransferError {
    #[error("Transfer failed: {0}")]
    Network(String),

    #[error("Storage returned status {0}")]
    Status(u16),
}

/// Failure of the deletion collaborator. The caller decides what to do; the
/// file's tracked state is never dropped on an unconfirmed deletion.
#[derive(Debug, Error)]
pub enum DeletionError {
    #[error("Deletion collaborator unreachable: {0}")]
    Transport(String),

    #[error("Deletion collaborator returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Deletion rejected: {0}")]
    Rejected(String),
}

/// Batch-level errors returned by the coordinator.
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("Cannot submit an empty batch")]
    EmptyBatch,

    #[error("Duplicate correlation id in batch: {0}")]
    DuplicateCorrelationId(String),

    #[error("Credential issuance failed: {0}")]
    Issuance(#[from] IssueError),
}

/// Result type for batch operations.
pub type UploadResult<T> = Result<T, UploadError>;
