//! Marketplace backend port (driven/secondary port)
//!
//! Interface for the remote marketplace backend: note metadata creation,
//! presigned upload-session issuance, the connectivity preflight, the direct
//! upload itself, and the seller listing.
//!
//! ## Design Notes
//!
//! - Methods return [`PublishError`] rather than `anyhow::Error` because the
//!   orchestrator routes on the error class (validation vs. connectivity vs.
//!   transport vs. storage) when composing user-facing messages.
//! - The DTOs here are port-level types; adapters own their wire formats and
//!   map into these.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::asset::{AssetKind, PickedAsset};
use crate::domain::errors::PublishError;
use crate::domain::newtypes::{CourseId, FileKey, NicheId, NoteId};

/// Request body for note metadata creation
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateNotePayload {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub price: f64,
    pub tags: Vec<String>,
    pub niche_id: NicheId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub course_id: Option<CourseId>,
}

/// Server-issued, short-lived upload target
///
/// Never cached across asset kinds or notes: presigned URLs may have narrow
/// expiry windows and single-use semantics on the storage side, so a fresh
/// session is requested for every upload attempt, including retries.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadSession {
    /// Presigned URL to PUT the payload to
    pub upload_url: String,
    /// Storage object key the upload will land under
    pub file_key: FileKey,
    /// When the presigned URL stops being valid, if the backend says
    pub expires_at: Option<DateTime<Utc>>,
}

/// Backend-reported connectivity to its object storage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectivityStatus {
    #[serde(default)]
    pub backend_reachable: bool,
    #[serde(default)]
    pub storage_enabled: bool,
    #[serde(default)]
    pub minio_reachable: bool,
    #[serde(default)]
    pub endpoint: Option<String>,
    #[serde(default)]
    pub bucket: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Outcome of the connectivity preflight
///
/// The skip is surfaced as a value, not silently swallowed, so the
/// orchestrator can tell the user why no check ran.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Preflight {
    /// The API host is on the local network; the check was skipped because
    /// local development is assumed self-consistent
    SkippedLocal {
        /// The host that classified as internal
        api_host: String,
    },
    /// The backend confirmed it can reach object storage
    Verified,
}

/// One note in the seller's listing
///
/// Every field is tolerant of absence; the backend omits what a note does
/// not have yet (e.g. cover before the cover upload).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SellerNote {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub cover_image_url: Option<String>,
}

/// Interface to the remote marketplace backend
#[async_trait]
pub trait MarketplaceApi {
    /// Creates note metadata and returns the assigned note identifier
    async fn create_note(&self, payload: &CreateNotePayload) -> Result<NoteId, PublishError>;

    /// Requests a fresh presigned upload session for one asset kind
    ///
    /// Every call must hit the network; sessions are never reused between
    /// attempts.
    async fn request_upload_session(
        &self,
        note_id: &NoteId,
        kind: AssetKind,
        asset: &PickedAsset,
    ) -> Result<UploadSession, PublishError>;

    /// Verifies (or deliberately skips) the backend-to-storage path before
    /// an upload
    async fn preflight_storage(&self) -> Result<Preflight, PublishError>;

    /// Transfers the asset payload directly to the presigned target
    async fn upload_asset(
        &self,
        session: &UploadSession,
        asset: &PickedAsset,
        kind: AssetKind,
    ) -> Result<(), PublishError>;

    /// Fetches the seller's note listing
    async fn list_seller_notes(&self) -> Result<Vec<SellerNote>, PublishError>;
}
