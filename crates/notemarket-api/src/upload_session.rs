//! Presigned upload-session client
//!
//! Requests a short-lived, pre-authorized upload target from the backend for
//! one asset kind, scoped under a note. Every call is a fresh network
//! request: presigned URLs may have narrow expiry windows and single-use
//! semantics on the storage side, so nothing here is ever cached or reused
//! between attempts.

use chrono::{DateTime, Utc};
use reqwest::Method;
use serde::{Deserialize, Serialize};
use tracing::debug;

use notemarket_core::domain::asset::{AssetKind, PickedAsset};
use notemarket_core::domain::errors::PublishError;
use notemarket_core::domain::newtypes::{FileKey, NoteId};
use notemarket_core::ports::marketplace::UploadSession;

use crate::client::{api_error_message, ApiClient};

/// Request body for session issuance
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct UploadSessionRequest {
    content_type: String,
    /// Forwarded so the backend can enforce size limits before issuing the
    /// URL; an unknown size is omitted, not coerced to zero
    #[serde(skip_serializing_if = "Option::is_none")]
    file_size: Option<u64>,
}

/// Wire response from the session-issuance endpoints
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UploadSessionResponse {
    upload_url: String,
    file_key: String,
    /// ISO 8601 timestamp; parsed tolerantly, absent or unparsable becomes None
    expires_at: Option<String>,
}

/// Builds the session-issuance endpoint path for one asset kind
fn session_endpoint(note_id: &NoteId, kind: AssetKind) -> String {
    format!(
        "/api/v1/seller/notes/{}/{}",
        note_id.as_str(),
        kind.session_suffix()
    )
}

/// Requests a fresh upload session for the given note and asset kind
///
/// The declared content type is taken from the picked file when present and
/// non-blank, else the kind-specific default. Failures carry the endpoint
/// that was being called: this is the first point at which a storage or
/// backend misconfiguration becomes visible to the user.
pub async fn request_upload_session(
    client: &ApiClient,
    note_id: &NoteId,
    kind: AssetKind,
    asset: &PickedAsset,
) -> Result<UploadSession, PublishError> {
    let endpoint = session_endpoint(note_id, kind);
    let body = UploadSessionRequest {
        content_type: asset.resolved_content_type(kind),
        file_size: asset.declared_size(),
    };

    debug!(%endpoint, content_type = %body.content_type, "Requesting upload session");

    let response = client
        .request(Method::POST, &endpoint)
        .json(&body)
        .send()
        .await
        .map_err(|e| PublishError::SessionRequest {
            endpoint: endpoint.clone(),
            reason: e.to_string(),
        })?;

    let status = response.status();
    let text = response
        .text()
        .await
        .map_err(|e| PublishError::SessionRequest {
            endpoint: endpoint.clone(),
            reason: e.to_string(),
        })?;

    if !status.is_success() {
        return Err(PublishError::SessionRequest {
            endpoint,
            reason: api_error_message(&text, status),
        });
    }

    let wire: UploadSessionResponse =
        serde_json::from_str(&text).map_err(|e| PublishError::SessionRequest {
            endpoint: endpoint.clone(),
            reason: format!("Could not parse upload session response. {e}"),
        })?;

    let file_key = FileKey::new(wire.file_key).map_err(|_| PublishError::SessionRequest {
        endpoint: endpoint.clone(),
        reason: "Upload session response carried an empty file key.".to_string(),
    })?;

    let expires_at = wire
        .expires_at
        .as_deref()
        .and_then(|s| s.parse::<DateTime<Utc>>().ok());

    debug!(file_key = %file_key, "Upload session issued");

    Ok(UploadSession {
        upload_url: wire.upload_url,
        file_key,
        expires_at,
    })
}
