//! One user-initiated upload action: the selected files plus their tracked
//! states. Exists only for the duration of the action and is discarded with
//! it; nothing is persisted across batches.

use std::collections::HashSet;
use std::sync::Arc;

use dossier_core::models::{BatchFile, FileDescriptor};

use crate::error::UploadError;
use crate::progress::ProgressTracker;

/// The files submitted together plus the tracker holding their states.
///
/// Owning workflows keep the batch alive while transfers are in flight: the
/// tracker feeds progress UI, gates dismissal on [`UploadBatch::is_closable`],
/// and is handed to [`crate::CleanupManager`] when the user removes a file.
#[derive(Debug)]
pub struct UploadBatch {
    files: Vec<BatchFile>,
    tracker: Arc<ProgressTracker>,
}

impl UploadBatch {
    /// Validate the submission and create one Pending state per file.
    ///
    /// Rejects empty submissions and duplicate correlation ids; size/type
    /// policy is the caller's responsibility and is expected to have been
    /// applied already.
    pub fn new(files: Vec<BatchFile>) -> Result<Self, UploadError> {
        if files.is_empty() {
            return Err(UploadError::EmptyBatch);
        }

        let mut seen = HashSet::new();
        for file in &files {
            if !seen.insert(file.descriptor.correlation_id.as_str()) {
                return Err(UploadError::DuplicateCorrelationId(
                    file.descriptor.correlation_id.clone(),
                ));
            }
        }

        let descriptors: Vec<FileDescriptor> =
            files.iter().map(|f| f.descriptor.clone()).collect();
        let tracker = Arc::new(ProgressTracker::new(&descriptors));

        Ok(Self { files, tracker })
    }

    pub fn files(&self) -> &[BatchFile] {
        &self.files
    }

    pub fn descriptors(&self) -> Vec<FileDescriptor> {
        self.files.iter().map(|f| f.descriptor.clone()).collect()
    }

    pub fn tracker(&self) -> &Arc<ProgressTracker> {
        &self.tracker
    }

    /// True once every file has settled; the owning workflow must not tear
    /// the batch down before this.
    pub fn is_closable(&self) -> bool {
        self.tracker.is_batch_closable()
    }
}
