//! Per-batch upload state tracking.
//!
//! One `UploadState` per submitted file, created at batch construction and
//! mutated only through this tracker. Writes are monotonic compare-and-set
//! operations under a single mutex, so concurrent progress callbacks from
//! parallel transfers cannot lose updates or move a file backwards.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use dossier_core::models::{FileDescriptor, UploadState, UploadStatus};

/// Tracks the state of every file in one batch.
///
/// Scoped to a single upload action; never shared across batches. Terminal
/// entries (Completed/Failed) are frozen: any later update or transition for
/// that id is a no-op.
#[derive(Debug)]
pub struct ProgressTracker {
    states: Mutex<HashMap<String, UploadState>>,
    /// Correlation ids in submission order, fixed at construction.
    order: Vec<String>,
}

impl ProgressTracker {
    /// Create a tracker with one Pending entry per descriptor.
    pub fn new(descriptors: &[FileDescriptor]) -> Self {
        let mut states = HashMap::with_capacity(descriptors.len());
        let mut order = Vec::with_capacity(descriptors.len());
        for descriptor in descriptors {
            order.push(descriptor.correlation_id.clone());
            states.insert(
                descriptor.correlation_id.clone(),
                UploadState::pending(descriptor),
            );
        }
        Self {
            states: Mutex::new(states),
            order,
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, UploadState>> {
        // A panicked progress callback must not wedge the rest of the batch.
        self.states.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Transition Pending -> InProgress. No-op for any other current status.
    pub fn mark_started(&self, correlation_id: &str) {
        let mut states = self.lock();
        if let Some(state) = states.get_mut(correlation_id) {
            if state.status == UploadStatus::Pending {
                state.status = UploadStatus::InProgress;
            }
        }
    }

    /// Record transfer progress. Regressions and updates to terminal entries
    /// are no-ops; percent is clamped to 100.
    pub fn update(&self, correlation_id: &str, percent: u8) {
        let mut states = self.lock();
        if let Some(state) = states.get_mut(correlation_id) {
            if state.status.is_terminal() {
                return;
            }
            let percent = percent.min(100);
            if percent < state.progress_percent {
                return;
            }
            state.progress_percent = percent;
            if state.status == UploadStatus::Pending {
                state.status = UploadStatus::InProgress;
            }
        }
    }

    /// Attach the metadata record id issued for this file.
    pub fn assign_document(&self, correlation_id: &str, document_id: &str) {
        let mut states = self.lock();
        if let Some(state) = states.get_mut(correlation_id) {
            state.document_id = Some(document_id.to_string());
        }
    }

    /// Transition to Completed. No-op if the entry is already terminal.
    pub fn mark_completed(&self, correlation_id: &str) {
        let mut states = self.lock();
        if let Some(state) = states.get_mut(correlation_id) {
            if state.status.is_terminal() {
                return;
            }
            state.status = UploadStatus::Completed;
            state.progress_percent = 100;
        }
    }

    /// Transition to Failed with a reason. No-op if the entry is already
    /// terminal.
    pub fn mark_failed(&self, correlation_id: &str, reason: &str) {
        let mut states = self.lock();
        if let Some(state) = states.get_mut(correlation_id) {
            if state.status.is_terminal() {
                return;
            }
            state.status = UploadStatus::Failed;
            state.error = Some(reason.to_string());
        }
    }

    /// True iff every tracked file has reached a terminal status.
    pub fn is_batch_closable(&self) -> bool {
        self.lock().values().all(|state| state.status.is_terminal())
    }

    /// Drop a file's entry, returning its last state.
    pub fn remove(&self, correlation_id: &str) -> Option<UploadState> {
        self.lock().remove(correlation_id)
    }

    /// Current state of one file.
    pub fn state_of(&self, correlation_id: &str) -> Option<UploadState> {
        self.lock().get(correlation_id).cloned()
    }

    /// All tracked states in submission order. Removed entries are skipped.
    pub fn snapshot(&self) -> Vec<UploadState> {
        let states = self.lock();
        self.order
            .iter()
            .filter_map(|id| states.get(id).cloned())
            .collect()
    }
}
