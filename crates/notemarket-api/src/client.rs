//! Marketplace API client
//!
//! Provides a typed HTTP client for the marketplace backend. Handles base
//! URL construction, per-request authentication headers, and extraction of
//! backend error payloads.
//!
//! The bearer token is read from the [`CredentialStore`] at the moment each
//! request is built, never captured at client construction, so a token
//! refresh between flow steps is honored automatically.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use tracing::debug;

use notemarket_core::config::ApiConfig;
use notemarket_core::domain::netloc::host_of_url;
use notemarket_core::ports::credentials::CredentialStore;

/// HTTP client for marketplace backend calls
pub struct ApiClient {
    /// The underlying HTTP client
    client: Client,
    /// Base URL for API requests, without a trailing slash
    base_url: String,
    /// Source of the current bearer token, consulted per request
    credentials: Arc<dyn CredentialStore>,
}

impl ApiClient {
    /// Creates a client from configuration
    pub fn new(config: &ApiConfig, credentials: Arc<dyn CredentialStore>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: config.trimmed_base_url(),
            credentials,
        })
    }

    /// Creates a client with a custom base URL (useful for testing)
    pub fn with_base_url(
        base_url: impl Into<String>,
        credentials: Arc<dyn CredentialStore>,
    ) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            credentials,
        }
    }

    /// Returns the base URL for API requests
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Lowercase host of the configured base URL, if it parses
    ///
    /// This is the "API host" input to the upload-target mismatch check and
    /// to the preflight skip decision.
    pub fn api_host(&self) -> Option<String> {
        host_of_url(&self.base_url)
    }

    /// Creates an authenticated request builder for the given method and path
    ///
    /// Prepends the base URL and attaches `Authorization: Bearer <token>`
    /// when a session token is available. The token is resolved fresh on
    /// every call.
    pub fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let builder = self.client.request(method, &url);
        match self.credentials.access_token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Creates an unauthenticated request builder (for public endpoints such
    /// as the connectivity status check)
    pub fn request_public(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, "Building unauthenticated request");
        self.client.request(method, &url)
    }

    /// Returns a reference to the underlying HTTP client
    ///
    /// Used by the upload executor, which targets absolute presigned URLs
    /// rather than paths under the base URL.
    pub(crate) fn http_client(&self) -> &Client {
        &self.client
    }
}

/// Picks a human-readable message out of a backend error payload
///
/// Backend error bodies carry the message under `message`, `error`, or
/// `detail` depending on the handler; the first non-blank one wins. Falls
/// back to a bare status line when the body is empty or unparsable.
pub(crate) fn api_error_message(body: &str, status: StatusCode) -> String {
    if let Ok(payload) = serde_json::from_str::<serde_json::Value>(body) {
        for field in ["message", "error", "detail"] {
            if let Some(text) = payload.get(field).and_then(|v| v.as_str()) {
                if !text.trim().is_empty() {
                    return text.trim().to_string();
                }
            }
        }
    }
    format!("Request failed ({})", status.as_u16())
}
