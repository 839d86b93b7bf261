//! Configuration module
//!
//! Tuning knobs for the upload subsystem: transfer concurrency, timeouts, and
//! the chunk size used to report transfer progress.

use std::env;

const MAX_CONCURRENT_TRANSFERS: usize = 4;
const TRANSFER_TIMEOUT_SECS: u64 = 300;
const TRANSFER_CHUNK_KB: usize = 64;

/// Upload subsystem configuration.
#[derive(Clone, Debug)]
pub struct UploadConfig {
    /// Upper bound on simultaneous byte transfers within one batch.
    pub max_concurrent_transfers: usize,
    /// Timeout for a single direct transfer, in seconds.
    pub transfer_timeout_secs: u64,
    /// Size of the body chunks streamed to storage; each chunk handed to the
    /// transport advances the progress callback.
    pub transfer_chunk_bytes: usize,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_concurrent_transfers: MAX_CONCURRENT_TRANSFERS,
            transfer_timeout_secs: TRANSFER_TIMEOUT_SECS,
            transfer_chunk_bytes: TRANSFER_CHUNK_KB * 1024,
        }
    }
}

impl UploadConfig {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let config = UploadConfig {
            max_concurrent_transfers: env::var("MAX_CONCURRENT_TRANSFERS")
                .unwrap_or_else(|_| MAX_CONCURRENT_TRANSFERS.to_string())
                .parse()
                .unwrap_or(MAX_CONCURRENT_TRANSFERS),
            transfer_timeout_secs: env::var("TRANSFER_TIMEOUT_SECS")
                .unwrap_or_else(|_| TRANSFER_TIMEOUT_SECS.to_string())
                .parse()
                .unwrap_or(TRANSFER_TIMEOUT_SECS),
            transfer_chunk_bytes: env::var("TRANSFER_CHUNK_KB")
                .unwrap_or_else(|_| TRANSFER_CHUNK_KB.to_string())
                .parse::<usize>()
                .unwrap_or(TRANSFER_CHUNK_KB)
                * 1024,
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.max_concurrent_transfers == 0 {
            return Err(anyhow::anyhow!(
                "MAX_CONCURRENT_TRANSFERS must be at least 1"
            ));
        }

        if self.transfer_timeout_secs == 0 {
            return Err(anyhow::anyhow!("TRANSFER_TIMEOUT_SECS must be at least 1"));
        }

        if self.transfer_chunk_bytes == 0 {
            return Err(anyhow::anyhow!("TRANSFER_CHUNK_KB must be at least 1"));
        }

        Ok(())
    }
}
