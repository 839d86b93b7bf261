//! Dossier Upload Library
//!
//! Direct-to-object-storage upload subsystem: credentials are issued in one
//! batched control-plane call, file bytes go straight to storage over
//! pre-signed URLs, and per-file state is tracked for the life of the batch.
//!
//! The application server never sees the payload; it only issues credentials
//! and records metadata. Batches are ephemeral: all tracked state is scoped to
//! one user-initiated upload action and discarded with it.

pub mod batch;
pub mod cleanup;
pub mod coordinator;
pub mod error;
pub mod progress;
pub mod traits;
pub mod transfer;

// Re-export commonly used types
pub use batch::UploadBatch;
pub use cleanup::CleanupManager;
pub use coordinator::{BatchOutcome, UploadCoordinator};
pub use error::{DeletionError, IssueError, TransferError, UploadError, UploadResult};
pub use progress::ProgressTracker;
pub use traits::{DocumentDeleter, IntentIssuer, ProgressFn, TransferExecutor};
pub use transfer::HttpTransferExecutor;
