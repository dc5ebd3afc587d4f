//! Marketplace port implementation
//!
//! Binds the HTTP modules of this crate to the core's [`MarketplaceApi`]
//! port so use cases stay independent of reqwest and wire formats.

use async_trait::async_trait;

use notemarket_core::domain::asset::{AssetKind, PickedAsset};
use notemarket_core::domain::errors::PublishError;
use notemarket_core::domain::newtypes::NoteId;
use notemarket_core::ports::marketplace::{
    CreateNotePayload, MarketplaceApi, Preflight, SellerNote, UploadSession,
};

use crate::client::ApiClient;
use crate::{connectivity, notes, transfer, upload_session};

/// Adapter implementing the marketplace port over HTTP
pub struct MarketplaceProvider {
    client: ApiClient,
}

impl MarketplaceProvider {
    /// Wraps an API client as the port implementation
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Access to the underlying client (e.g. for standalone diagnostics)
    pub fn client(&self) -> &ApiClient {
        &self.client
    }
}

#[async_trait]
impl MarketplaceApi for MarketplaceProvider {
    async fn create_note(&self, payload: &CreateNotePayload) -> Result<NoteId, PublishError> {
        notes::create_note(&self.client, payload).await
    }

    async fn request_upload_session(
        &self,
        note_id: &NoteId,
        kind: AssetKind,
        asset: &PickedAsset,
    ) -> Result<UploadSession, PublishError> {
        upload_session::request_upload_session(&self.client, note_id, kind, asset).await
    }

    async fn preflight_storage(&self) -> Result<Preflight, PublishError> {
        connectivity::ensure_storage_reachable(&self.client).await
    }

    async fn upload_asset(
        &self,
        session: &UploadSession,
        asset: &PickedAsset,
        kind: AssetKind,
    ) -> Result<(), PublishError> {
        transfer::upload_to_presigned(&self.client, session, asset, kind).await
    }

    async fn list_seller_notes(&self) -> Result<Vec<SellerNote>, PublishError> {
        notes::list_seller_notes(&self.client).await
    }
}
