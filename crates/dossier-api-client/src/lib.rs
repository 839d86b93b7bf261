//! Shared HTTP client for the Dossier control plane.
//!
//! Provides a minimal client with configurable auth (Bearer token or
//! X-API-Key) and the two control-plane operations the upload subsystem
//! consumes: batched signed-url issuance and document deletion. The file
//! payload itself never flows through this client.

pub mod api;

use anyhow::{Context, Result};
use reqwest::Client;
use std::time::Duration;

const REQUEST_TIMEOUT_SECS: u64 = 60;

/// Authentication strategy for the control plane.
#[derive(Clone, Debug)]
pub enum Auth {
    /// `Authorization: Bearer {token}`
    Bearer(String),
    /// `X-API-Key: {key}`
    XApiKey(String),
}

/// API version prefix (e.g. "/api/v1"). Set DOSSIER_API_VERSION to match the
/// server.
pub fn api_prefix() -> String {
    let version = std::env::var("DOSSIER_API_VERSION").unwrap_or_else(|_| "v1".to_string());
    format!("/api/{}", version)
}

/// HTTP client for the Dossier control plane with configurable auth.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    auth: Auth,
}

impl ApiClient {
    pub fn new(base_url: String, auth: Auth) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            auth,
        })
    }

    /// Create client from environment: DOSSIER_API_URL (or API_URL),
    /// DOSSIER_API_KEY (or API_KEY). Uses X-API-Key auth.
    pub fn from_env() -> Result<Self> {
        let base_url = std::env::var("DOSSIER_API_URL")
            .or_else(|_| std::env::var("API_URL"))
            .unwrap_or_else(|_| "http://localhost:3000".to_string());

        let api_key = std::env::var("DOSSIER_API_KEY")
            .or_else(|_| std::env::var("API_KEY"))
            .context("Missing API key. Set DOSSIER_API_KEY or API_KEY")?;

        Self::new(base_url, Auth::XApiKey(api_key))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub(crate) fn apply_auth(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.auth {
            Auth::Bearer(token) => request.header("Authorization", format!("Bearer {}", token)),
            Auth::XApiKey(key) => request.header("X-API-Key", key.as_str()),
        }
    }

    /// Raw client for custom requests.
    pub fn client(&self) -> &Client {
        &self.client
    }
}
