//! Control-plane operations: signed-url issuance and document deletion.
//!
//! Both speak the wire contract from `dossier_core::models::wire` and map
//! failures onto the upload subsystem's typed errors, keeping transport
//! failures distinct from policy rejections.

use async_trait::async_trait;

use dossier_core::models::{
    DeleteDocumentRequest, DeleteDocumentResponse, FileDescriptor, SignedUrlRequestItem,
    SignedUrlsResponse, UploadIntent,
};
use dossier_upload::error::{DeletionError, IssueError};
use dossier_upload::{DocumentDeleter, IntentIssuer};

use crate::{api_prefix, ApiClient};

#[async_trait]
impl IntentIssuer for ApiClient {
    /// One batched request for the whole set of files. The server may omit
    /// files rejected by policy; that is not an error here.
    #[tracing::instrument(skip(self, files), fields(file_count = files.len()))]
    async fn issue_intents(
        &self,
        files: &[FileDescriptor],
    ) -> Result<Vec<UploadIntent>, IssueError> {
        let body: Vec<SignedUrlRequestItem> =
            files.iter().map(SignedUrlRequestItem::from).collect();

        let url = self.build_url(&format!("{}/documents/signed-urls", api_prefix()));
        let request = self.apply_auth(self.client().post(&url).json(&body));

        let response = request
            .send()
            .await
            .map_err(|e| IssueError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(IssueError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: SignedUrlsResponse = response
            .json()
            .await
            .map_err(|e| IssueError::InvalidResponse(e.to_string()))?;

        tracing::debug!(
            issued = parsed.signed_urls.len(),
            "Received signed urls for batch"
        );

        Ok(parsed
            .signed_urls
            .into_iter()
            .map(UploadIntent::from)
            .collect())
    }
}

#[async_trait]
impl DocumentDeleter for ApiClient {
    #[tracing::instrument(skip(self))]
    async fn delete_document(&self, document_id: &str) -> Result<(), DeletionError> {
        let url = self.build_url(&format!("{}/documents/delete", api_prefix()));
        let body = DeleteDocumentRequest {
            document_id: document_id.to_string(),
        };
        let request = self.apply_auth(self.client().post(&url).json(&body));

        let response = request
            .send()
            .await
            .map_err(|e| DeletionError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(DeletionError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: DeleteDocumentResponse = response
            .json()
            .await
            .map_err(|e| DeletionError::Transport(format!("Malformed response: {}", e)))?;

        if parsed.success {
            tracing::debug!(document_id, "Document deleted");
            Ok(())
        } else {
            Err(DeletionError::Rejected(parsed.message))
        }
    }
}
