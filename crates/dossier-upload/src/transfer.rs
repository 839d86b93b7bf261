//! Direct byte transfer to object storage.
//!
//! One HTTP PUT per file, straight to the pre-signed URL. The body is
//! streamed in fixed-size chunks through a counting adapter so progress can
//! be reported as bytes are handed to the transport.

use anyhow::{Context, Result};
use async_trait::async_trait;
use bytes::Bytes;
use futures::StreamExt;
use reqwest::header::{CONTENT_LENGTH, CONTENT_TYPE};
use reqwest::Client;
use std::time::Duration;

use dossier_core::models::UploadIntent;
use dossier_core::UploadConfig;

use crate::error::TransferError;
use crate::traits::{ProgressFn, TransferExecutor};

/// Percent of `total` covered by `sent`, clamped to 0-100.
pub(crate) fn percent_sent(sent: u64, total: u64) -> u8 {
    if total == 0 {
        return 100;
    }
    ((sent.min(total) * 100) / total) as u8
}

/// Transfers file bytes to storage with a single-attempt HTTP PUT.
pub struct HttpTransferExecutor {
    client: Client,
    chunk_bytes: usize,
}

impl HttpTransferExecutor {
    pub fn new(timeout: Duration, chunk_bytes: usize) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .pool_max_idle_per_host(10)
            .pool_idle_timeout(Duration::from_secs(90))
            .build()
            .context("Failed to create HTTP client for transfers")?;

        Ok(Self {
            client,
            chunk_bytes: chunk_bytes.max(1),
        })
    }

    pub fn from_config(config: &UploadConfig) -> Result<Self> {
        Self::new(
            Duration::from_secs(config.transfer_timeout_secs),
            config.transfer_chunk_bytes,
        )
    }

    fn chunked(&self, payload: &Bytes) -> Vec<Bytes> {
        let mut chunks = Vec::with_capacity(payload.len() / self.chunk_bytes + 1);
        let mut offset = 0;
        while offset < payload.len() {
            let end = (offset + self.chunk_bytes).min(payload.len());
            chunks.push(payload.slice(offset..end));
            offset = end;
        }
        chunks
    }
}

#[async_trait]
impl TransferExecutor for HttpTransferExecutor {
    #[tracing::instrument(
        skip(self, intent, payload, on_progress),
        fields(
            correlation_id = %intent.correlation_id,
            storage_key = %intent.storage_key,
            size_bytes = payload.len()
        )
    )]
    async fn transfer(
        &self,
        intent: &UploadIntent,
        payload: Bytes,
        content_type: &str,
        on_progress: ProgressFn,
    ) -> Result<(), TransferError> {
        let total = payload.len() as u64;
        let mut sent: u64 = 0;

        let counted = futures::stream::iter(
            self.chunked(&payload)
                .into_iter()
                .map(Ok::<Bytes, std::io::Error>),
        )
        .inspect(move |chunk| {
            if let Ok(chunk) = chunk {
                sent += chunk.len() as u64;
                on_progress(percent_sent(sent, total));
            }
        });

        let response = self
            .client
            .put(&intent.signed_url)
            .header(CONTENT_TYPE, content_type)
            .header(CONTENT_LENGTH, total)
            .body(reqwest::Body::wrap_stream(counted))
            .send()
            .await
            .map_err(|e| TransferError::Network(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            tracing::debug!(status = status.as_u16(), "Transfer completed");
            Ok(())
        } else {
            Err(TransferError::Status(status.as_u16()))
        }
    }
}
