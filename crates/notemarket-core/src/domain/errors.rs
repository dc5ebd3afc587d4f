//! Publication error taxonomy
//!
//! Every failure in the guided publication flow is classified here. Each
//! variant renders as a single human-readable message suitable for direct
//! display; the orchestrator stores the rendered message in the flow state
//! so the user can retry without losing captured identifiers or files.

use thiserror::Error;

/// Errors that can occur during the guided publication flow
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PublishError {
    /// Local validation failure; no network call was made
    #[error("{0}")]
    Validation(String),

    /// The connectivity preflight failed, or the check itself was unreachable
    #[error("{0}")]
    Connectivity(String),

    /// The backend rejected or could not issue an upload session
    #[error("Upload session request failed at {endpoint}. {reason}")]
    SessionRequest {
        /// The session-issuance endpoint that was being called
        endpoint: String,
        /// Backend- or transport-supplied failure reason
        reason: String,
    },

    /// The presigned upload target is on a network the device cannot reach.
    /// Detected before any transfer attempt; zero HTTP requests are made.
    #[error(
        "Upload host ({upload_host}) is not reachable from this device. \
         Configure backend S3_PUBLIC_ENDPOINT to your API host (for example {api_host})."
    )]
    HostMismatch {
        /// Host of the presigned upload URL
        upload_host: String,
        /// Host of the configured API base URL
        api_host: String,
    },

    /// DNS/connect/timeout failure during the actual transfer
    #[error(
        "Network error while uploading to {host}. {reason} \
         Check S3_PUBLIC_ENDPOINT/backend upload host config."
    )]
    Transport {
        /// Host of the presigned upload URL
        host: String,
        /// Underlying transport error text
        reason: String,
    },

    /// The transfer reached the storage service but it rejected the request
    #[error("{summary}")]
    StorageService {
        /// HTTP status returned by the storage service
        status: u16,
        /// Status-coded summary extracted from the error body
        summary: String,
    },

    /// The backend rejected a metadata or listing call
    #[error("{0}")]
    Api(String),
}

impl PublishError {
    /// Short category name, used for logging
    pub fn kind(&self) -> &'static str {
        match self {
            PublishError::Validation(_) => "validation",
            PublishError::Connectivity(_) => "connectivity",
            PublishError::SessionRequest { .. } => "session_request",
            PublishError::HostMismatch { .. } => "host_mismatch",
            PublishError::Transport { .. } => "transport",
            PublishError::StorageService { .. } => "storage_service",
            PublishError::Api(_) => "api",
        }
    }

    /// Returns true if the failure happened before any network call
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            PublishError::Validation(_) | PublishError::HostMismatch { .. }
        )
    }
}
