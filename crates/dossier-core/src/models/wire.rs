//! Wire types for the control-plane endpoints consumed by the upload
//! subsystem. Field names follow the endpoint contract, so everything here is
//! camelCase on the wire.

use serde::{Deserialize, Serialize};

use super::upload::{FileDescriptor, UploadIntent};

/// One element of the batched issue-intents request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignedUrlRequestItem {
    pub name: String,
    #[serde(rename = "type")]
    pub content_type: String,
    pub size: u64,
    pub correlation_id: String,
}

impl From<&FileDescriptor> for SignedUrlRequestItem {
    fn from(descriptor: &FileDescriptor) -> Self {
        Self {
            name: descriptor.name.clone(),
            content_type: descriptor.content_type.clone(),
            size: descriptor.size_bytes,
            correlation_id: descriptor.correlation_id.clone(),
        }
    }
}

/// One issued credential in the issue-intents response. The response array may
/// be shorter than the request array and is not ordered.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignedUrlEntry {
    pub signed_url: String,
    pub key: String,
    pub correlation_id: String,
    pub document_id: String,
}

impl From<SignedUrlEntry> for UploadIntent {
    fn from(entry: SignedUrlEntry) -> Self {
        Self {
            correlation_id: entry.correlation_id,
            signed_url: entry.signed_url,
            storage_key: entry.key,
            document_id: entry.document_id,
        }
    }
}

/// Issue-intents response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignedUrlsResponse {
    pub signed_urls: Vec<SignedUrlEntry>,
}

/// Deletion collaborator request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteDocumentRequest {
    pub document_id: String,
}

/// Deletion collaborator response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteDocumentResponse {
    pub success: bool,
    pub message: String,
}
