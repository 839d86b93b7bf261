//! Test helpers: fixtures and scripted collaborators for batch tests.

#![allow(dead_code)]

use async_trait::async_trait;
use bytes::Bytes;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use dossier_core::models::{BatchFile, FileDescriptor, UploadIntent};
use dossier_upload::error::{DeletionError, IssueError, TransferError};
use dossier_upload::{DocumentDeleter, IntentIssuer, ProgressFn, TransferExecutor};

pub fn descriptor(name: &str, correlation_id: &str) -> FileDescriptor {
    FileDescriptor {
        name: name.to_string(),
        content_type: "application/pdf".to_string(),
        size_bytes: 4,
        correlation_id: correlation_id.to_string(),
    }
}

pub fn batch_file(name: &str, correlation_id: &str) -> BatchFile {
    BatchFile::new(descriptor(name, correlation_id), Bytes::from_static(b"data"))
}

pub fn intent_for(correlation_id: &str) -> UploadIntent {
    UploadIntent {
        correlation_id: correlation_id.to_string(),
        signed_url: format!("https://storage.test/put/{correlation_id}"),
        storage_key: format!("uploads/{correlation_id}"),
        document_id: format!("doc-{correlation_id}"),
    }
}

/// Issuer scripted with the correlation ids it accepts. Files outside the
/// accept list are omitted from the response, like server-side policy
/// rejections. Responses come back in reverse order to exercise the
/// no-ordering contract.
pub struct ScriptedIssuer {
    accept: Vec<String>,
    fail: bool,
    pub calls: AtomicUsize,
}

impl ScriptedIssuer {
    pub fn accepting(ids: &[&str]) -> Self {
        Self {
            accept: ids.iter().map(|s| s.to_string()).collect(),
            fail: false,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn unreachable() -> Self {
        Self {
            accept: Vec::new(),
            fail: true,
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl IntentIssuer for ScriptedIssuer {
    async fn issue_intents(
        &self,
        files: &[FileDescriptor],
    ) -> Result<Vec<UploadIntent>, IssueError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(IssueError::Transport("connection refused".to_string()));
        }

        let mut intents: Vec<UploadIntent> = files
            .iter()
            .filter(|f| self.accept.contains(&f.correlation_id))
            .map(|f| intent_for(&f.correlation_id))
            .collect();
        intents.reverse();
        Ok(intents)
    }
}

/// Transfer executor scripted with the correlation ids whose PUT should fail
/// with a 500. Records every attempt and the peak number of concurrent
/// transfers.
pub struct ScriptedTransfer {
    fail_ids: Vec<String>,
    delay: Duration,
    pub attempted: Mutex<Vec<String>>,
    in_flight: AtomicUsize,
    pub peak_concurrency: AtomicUsize,
}

impl ScriptedTransfer {
    pub fn succeeding() -> Self {
        Self::failing_for(&[])
    }

    pub fn failing_for(ids: &[&str]) -> Self {
        Self {
            fail_ids: ids.iter().map(|s| s.to_string()).collect(),
            delay: Duration::ZERO,
            attempted: Mutex::new(Vec::new()),
            in_flight: AtomicUsize::new(0),
            peak_concurrency: AtomicUsize::new(0),
        }
    }

    pub fn with_delay(delay: Duration) -> Self {
        Self {
            delay,
            ..Self::succeeding()
        }
    }

    pub fn attempts(&self) -> Vec<String> {
        self.attempted.lock().unwrap().clone()
    }
}

#[async_trait]
impl TransferExecutor for ScriptedTransfer {
    async fn transfer(
        &self,
        intent: &UploadIntent,
        _payload: Bytes,
        _content_type: &str,
        on_progress: ProgressFn,
    ) -> Result<(), TransferError> {
        self.attempted
            .lock()
            .unwrap()
            .push(intent.correlation_id.clone());

        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_concurrency.fetch_max(current, Ordering::SeqCst);

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        on_progress(25);

        let result = if self.fail_ids.contains(&intent.correlation_id) {
            Err(TransferError::Status(500))
        } else {
            on_progress(50);
            on_progress(100);
            Ok(())
        };

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        result
    }
}

/// Deletion collaborator scripted to succeed or stay unreachable.
pub struct ScriptedDeleter {
    fail: bool,
    pub deleted: Mutex<Vec<String>>,
}

impl ScriptedDeleter {
    pub fn succeeding() -> Self {
        Self {
            fail: false,
            deleted: Mutex::new(Vec::new()),
        }
    }

    pub fn unreachable() -> Self {
        Self {
            fail: true,
            deleted: Mutex::new(Vec::new()),
        }
    }

    pub fn deleted_ids(&self) -> Vec<String> {
        self.deleted.lock().unwrap().clone()
    }
}

#[async_trait]
impl DocumentDeleter for ScriptedDeleter {
    async fn delete_document(&self, document_id: &str) -> Result<(), DeletionError> {
        if self.fail {
            return Err(DeletionError::Transport(
                "deletion service unreachable".to_string(),
            ));
        }
        self.deleted.lock().unwrap().push(document_id.to_string());
        Ok(())
    }
}
