use bytes::Bytes;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// A file selected for upload, described before any network call is made.
///
/// The correlation id is minted on the client and follows the file through
/// credential issuance, the byte transfer, and any later metadata record.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct FileDescriptor {
    /// Original filename
    #[validate(length(
        min = 1,
        max = 255,
        message = "Filename must be between 1 and 255 characters"
    ))]
    pub name: String,
    /// Content type (MIME type)
    #[validate(length(
        min = 1,
        max = 255,
        message = "Content type must be between 1 and 255 characters"
    ))]
    pub content_type: String,
    /// File size in bytes
    #[validate(range(min = 1, message = "File size must be at least 1 byte"))]
    pub size_bytes: u64,
    /// Opaque client-generated id, unique within a batch
    pub correlation_id: String,
}

impl FileDescriptor {
    /// Build a descriptor with a freshly minted correlation id.
    pub fn new(name: impl Into<String>, content_type: impl Into<String>, size_bytes: u64) -> Self {
        Self {
            name: name.into(),
            content_type: content_type.into(),
            size_bytes,
            correlation_id: Uuid::new_v4().to_string(),
        }
    }
}

/// A descriptor paired with the raw bytes to transfer.
#[derive(Debug, Clone)]
pub struct BatchFile {
    pub descriptor: FileDescriptor,
    pub payload: Bytes,
}

impl BatchFile {
    pub fn new(descriptor: FileDescriptor, payload: Bytes) -> Self {
        Self {
            descriptor,
            payload,
        }
    }
}

/// Write credentials and metadata issued by the control plane for one file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadIntent {
    pub correlation_id: String,
    /// Time-limited URL accepting a direct PUT of the file bytes
    pub signed_url: String,
    /// Object-storage key the file will land under
    pub storage_key: String,
    /// Id of the metadata record created alongside the credentials
    pub document_id: String,
}

/// Per-request result of matching issued intents back to descriptors.
///
/// The issuer may omit files rejected by server-side policy, and its response
/// order is not guaranteed, so consumers match by correlation id and never by
/// position.
#[derive(Debug, Clone)]
pub enum IntentMatch {
    Matched(UploadIntent),
    Unmatched,
}

/// Lifecycle of a single file within its batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UploadStatus {
    Pending,
    InProgress,
    Completed,
    Failed,
}

impl UploadStatus {
    /// Completed and Failed admit no further transitions.
    pub fn is_terminal(&self) -> bool {
        matches!(self, UploadStatus::Completed | UploadStatus::Failed)
    }
}

/// Tracked state of one file for the life of its batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadState {
    pub correlation_id: String,
    pub name: String,
    pub content_type: String,
    pub size_bytes: u64,
    /// 0-100, non-decreasing until a terminal status is reached
    pub progress_percent: u8,
    pub status: UploadStatus,
    /// Set once the control plane has issued a metadata record for the file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_id: Option<String>,
    /// Failure detail, present only when status is Failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl UploadState {
    pub fn pending(descriptor: &FileDescriptor) -> Self {
        Self {
            correlation_id: descriptor.correlation_id.clone(),
            name: descriptor.name.clone(),
            content_type: descriptor.content_type.clone(),
            size_bytes: descriptor.size_bytes,
            progress_percent: 0,
            status: UploadStatus::Pending,
            document_id: None,
            error: None,
        }
    }
}
