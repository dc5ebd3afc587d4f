//! Connectivity preflight
//!
//! Before spending an upload attempt, ask the backend whether its own path
//! to object storage is healthy. The check is skipped when the device is on
//! the same local network as the backend: during local development the
//! backend may report its storage endpoint under a name only containers can
//! resolve, and a failed check there would be a false negative.

use reqwest::Method;
use tracing::{debug, info};

use notemarket_core::domain::errors::PublishError;
use notemarket_core::domain::netloc::{classify_host, HostClass};
use notemarket_core::ports::marketplace::{ConnectivityStatus, Preflight};

use crate::client::{api_error_message, ApiClient};

const CONNECTIVITY_PATH: &str = "/api/v1/system/connectivity";

/// Fetches the raw connectivity status from the backend
///
/// A transport failure or non-2xx here is a failure of the check itself and
/// is reported as such, never as a storage-unreachable verdict.
pub async fn fetch_status(client: &ApiClient) -> Result<ConnectivityStatus, PublishError> {
    debug!("GET {CONNECTIVITY_PATH}");

    let response = client
        .request_public(Method::GET, CONNECTIVITY_PATH)
        .send()
        .await
        .map_err(|e| {
            PublishError::Connectivity(format!("Connectivity status request failed. {e}"))
        })?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(PublishError::Connectivity(format!(
            "Connectivity status request failed. {}",
            api_error_message(&body, status)
        )));
    }

    response.json::<ConnectivityStatus>().await.map_err(|e| {
        PublishError::Connectivity(format!("Could not parse connectivity status. {e}"))
    })
}

/// Turns a reported status into a pass/fail verdict
///
/// Fails unless the backend can reach its object storage; the failure
/// message combines the backend-supplied reason (or a generic fallback) with
/// the reported endpoint so a misconfiguration can be correlated to a
/// specific address.
pub fn verdict_from_status(status: &ConnectivityStatus) -> Result<(), PublishError> {
    if status.minio_reachable {
        return Ok(());
    }

    let reason = match status.message.as_deref().map(str::trim) {
        Some(text) if !text.is_empty() => text.to_string(),
        _ => "Backend cannot reach MinIO.".to_string(),
    };
    let endpoint_text = match status.endpoint.as_deref().map(str::trim) {
        Some(endpoint) if !endpoint.is_empty() => format!(" Endpoint: {endpoint}."),
        _ => String::new(),
    };

    Err(PublishError::Connectivity(format!("{reason}{endpoint_text}")))
}

/// Runs the preflight, skipping it unconditionally for local API hosts
///
/// The skip is surfaced as [`Preflight::SkippedLocal`] rather than silently
/// swallowed, so callers can tell the user why no check ran.
pub async fn ensure_storage_reachable(client: &ApiClient) -> Result<Preflight, PublishError> {
    if let Some(api_host) = client.api_host() {
        if classify_host(&api_host) == HostClass::Internal {
            info!(%api_host, "Local usage detected; skipping connectivity preflight");
            return Ok(Preflight::SkippedLocal { api_host });
        }
    }

    let status = fetch_status(client).await?;
    verdict_from_status(&status)?;
    info!("Connectivity preflight passed");
    Ok(Preflight::Verified)
}
