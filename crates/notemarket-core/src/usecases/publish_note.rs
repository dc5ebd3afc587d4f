//! Guided note publication use case
//!
//! Orchestrates the three-step publication flow against the marketplace
//! port: metadata creation, optional cover upload, mandatory content upload.
//! For each upload the chain is strictly preflight -> fresh session ->
//! transfer; the steps are awaited one after another and never reordered or
//! parallelized. Any failure halts progression, is annotated with the phase
//! it occurred in, and leaves all captured state (note identifier, picked
//! files) intact so the user can retry without redoing earlier steps.

use std::sync::Arc;

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::domain::asset::{AssetKind, PickedAsset};
use crate::domain::draft::NoteDraft;
use crate::domain::errors::PublishError;
use crate::domain::flow::{FlowStep, PublishFlow};
use crate::domain::newtypes::NoteId;
use crate::ports::marketplace::{MarketplaceApi, Preflight, SellerNote};

/// Orchestrator for one guided publication session
pub struct PublishNoteUseCase {
    api: Arc<dyn MarketplaceApi + Send + Sync>,
    flow: PublishFlow,
    seller_notes: Vec<SellerNote>,
}

impl PublishNoteUseCase {
    /// Creates a use case over the given backend adapter
    pub fn new(api: Arc<dyn MarketplaceApi + Send + Sync>) -> Self {
        Self {
            api,
            flow: PublishFlow::new(),
            seller_notes: Vec::new(),
        }
    }

    /// Read access to the flow state (step, messages, busy flags)
    pub fn flow(&self) -> &PublishFlow {
        &self.flow
    }

    /// The seller listing as of the last refresh
    pub fn seller_notes(&self) -> &[SellerNote] {
        &self.seller_notes
    }

    /// Edits the draft while it is still editable
    pub fn edit_draft(
        &mut self,
        edit: impl FnOnce(&mut NoteDraft),
    ) -> Result<(), PublishError> {
        edit(self.flow.draft_mut()?);
        Ok(())
    }

    /// Stages an asset for one of the upload slots
    pub fn pick_asset(&mut self, kind: AssetKind, asset: PickedAsset) {
        self.flow.pick_asset(kind, asset);
    }

    /// Step 1: validates the draft locally and creates the note metadata
    ///
    /// Validation failures never contact the backend. On success the
    /// assigned note identifier is captured and the flow advances to the
    /// Cover step.
    pub async fn submit_details(&mut self) -> Result<NoteId, PublishError> {
        self.flow.clear_messages();

        let payload = match self.flow.draft().to_payload() {
            Ok(payload) => payload,
            Err(err) => {
                self.flow.set_error(err.to_string());
                return Err(err);
            }
        };

        debug!(title = %payload.title, niche = %payload.niche_id, "Creating note metadata");

        let note_id = match self.api.create_note(&payload).await {
            Ok(id) => id,
            Err(err) => {
                self.flow.set_error(err.to_string());
                return Err(err);
            }
        };

        info!(note_id = %note_id, "Note metadata created");
        self.flow.attach_note_id(note_id.clone())?;
        self.flow
            .set_info("Details saved. Add a cover picture or skip to continue.");
        Ok(note_id)
    }

    /// Step 2, skip path: advances to the Content step without any network
    /// call
    pub fn skip_cover(&mut self) -> Result<(), PublishError> {
        self.require_step(FlowStep::Cover)?;
        self.flow.transition_to(FlowStep::Content)?;
        self.flow
            .set_info("Cover skipped. Final step: upload the note file.");
        Ok(())
    }

    /// Step 2, upload path: preflight, fresh session, transfer
    ///
    /// Any failure keeps the flow in the Cover step with the phase-annotated
    /// error surfaced.
    pub async fn upload_cover(&mut self) -> Result<(), PublishError> {
        self.flow.clear_messages();
        if let Err(err) =
            self.guard_upload(FlowStep::Cover, AssetKind::Cover, "Pick a cover image or skip this step.")
        {
            self.flow.set_error(err.to_string());
            return Err(err);
        }

        self.flow.begin_upload(AssetKind::Cover)?;
        let result = self.run_upload_chain(AssetKind::Cover).await;
        self.flow.finish_upload(AssetKind::Cover);

        match result {
            Ok(()) => {
                self.flow.transition_to(FlowStep::Content)?;
                self.flow
                    .set_info("Cover uploaded. Final step: upload the note file.");
                Ok(())
            }
            Err(err) => {
                warn!(error_kind = err.kind(), "Cover upload failed");
                self.flow.set_error(err.to_string());
                Err(err)
            }
        }
    }

    /// Step 3: uploads the content file, refreshes the seller listing, and
    /// resets the flow
    ///
    /// On success all draft and picked-asset state is cleared; the note
    /// identifier is never reused across two submissions.
    pub async fn upload_content_and_finish(&mut self) -> Result<(), PublishError> {
        self.flow.clear_messages();
        if let Err(err) = self.guard_upload(
            FlowStep::Content,
            AssetKind::Content,
            "Pick the note file (PDF) to finish.",
        ) {
            self.flow.set_error(err.to_string());
            return Err(err);
        }

        self.flow.begin_upload(AssetKind::Content)?;
        let result = self.run_upload_chain(AssetKind::Content).await;
        self.flow.finish_upload(AssetKind::Content);

        match result {
            Ok(()) => {
                self.refresh_listing().await;
                self.flow.transition_to(FlowStep::Details)?;
                self.flow.set_info("Note published successfully.");
                Ok(())
            }
            Err(err) => {
                warn!(error_kind = err.kind(), "Content upload failed");
                self.flow.set_error(err.to_string());
                Err(err)
            }
        }
    }

    /// Returns from the Content step to re-attempt the cover
    pub fn back_to_cover(&mut self) -> Result<(), PublishError> {
        self.require_step(FlowStep::Content)?;
        self.flow.transition_to(FlowStep::Cover)
    }

    /// Abandons the session and resets the flow to an empty Details step
    pub fn reset(&mut self) {
        // any -> Details is always a valid transition
        let _ = self.flow.transition_to(FlowStep::Details);
    }

    /// Re-fetches the seller listing; failures are logged, not fatal, since
    /// the publication itself already succeeded
    async fn refresh_listing(&mut self) {
        match self.api.list_seller_notes().await {
            Ok(notes) => self.seller_notes = notes,
            Err(err) => warn!(error = %err, "Seller listing refresh failed after publish"),
        }
    }

    /// The preflight -> session -> transfer chain for one asset kind
    ///
    /// Always requests a fresh session, even on retries: presigned URLs may
    /// be single-use or already expired.
    async fn run_upload_chain(&mut self, kind: AssetKind) -> Result<(), PublishError> {
        let note_id = self.require_note_id()?;
        let asset = self
            .flow
            .asset(kind)
            .cloned()
            .ok_or_else(|| PublishError::Validation(format!("No {kind} file picked.")))?;

        let attempt = Uuid::new_v4();
        debug!(%attempt, kind = %kind, note_id = %note_id, "Starting upload chain");

        match self.api.preflight_storage().await {
            Ok(Preflight::SkippedLocal { api_host }) => {
                debug!(%attempt, api_host, "Connectivity preflight skipped for local usage");
                self.flow.set_info(format!(
                    "Local usage detected ({api_host}); skipping connectivity preflight."
                ));
            }
            Ok(Preflight::Verified) => {
                debug!(%attempt, "Connectivity preflight passed");
                self.flow
                    .set_info("Connectivity check passed: client -> backend -> storage.");
            }
            Err(err) => {
                return Err(PublishError::Connectivity(format!(
                    "Connectivity preflight failed. {err}"
                )));
            }
        }

        let session = self
            .api
            .request_upload_session(&note_id, kind, &asset)
            .await?;
        debug!(%attempt, file_key = %session.file_key, "Upload session issued");

        self.api.upload_asset(&session, &asset, kind).await?;
        info!(%attempt, kind = %kind, note_id = %note_id, "Upload completed");
        Ok(())
    }

    /// Local checks shared by both upload actions; violations never reach
    /// the network
    fn guard_upload(
        &self,
        expected: FlowStep,
        kind: AssetKind,
        missing_asset_message: &str,
    ) -> Result<(), PublishError> {
        self.require_step(expected)?;
        self.require_note_id()?;
        if self.flow.asset(kind).is_none() {
            return Err(PublishError::Validation(missing_asset_message.to_string()));
        }
        Ok(())
    }

    fn require_step(&self, expected: FlowStep) -> Result<(), PublishError> {
        if self.flow.step() != expected {
            return Err(PublishError::Validation(format!(
                "This action requires the {} step (currently in {}).",
                expected,
                self.flow.step()
            )));
        }
        Ok(())
    }

    fn require_note_id(&self) -> Result<NoteId, PublishError> {
        self.flow
            .note_id()
            .cloned()
            .ok_or_else(|| PublishError::Validation("Create note details first.".to_string()))
    }
}
