//! Note metadata operations
//!
//! Metadata creation is the first step of the guided publication flow; the
//! seller listing is re-fetched after a successful publication.

use reqwest::Method;
use serde::Deserialize;
use tracing::debug;

use notemarket_core::domain::errors::PublishError;
use notemarket_core::domain::newtypes::NoteId;
use notemarket_core::ports::marketplace::{CreateNotePayload, SellerNote};

use crate::client::{api_error_message, ApiClient};

const NOTES_PATH: &str = "/api/v1/seller/notes";

/// Response from note metadata creation
#[derive(Debug, Deserialize)]
struct CreatedNoteResponse {
    id: Option<String>,
}

/// Seller listing response: either a bare array or a page object
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SellerNotesResponse {
    Page { content: Vec<SellerNote> },
    List(Vec<SellerNote>),
}

/// Creates note metadata and returns the backend-assigned identifier
///
/// A 2xx response without an `id` is an error: the flow cannot continue to
/// the upload steps without the identifier.
pub async fn create_note(
    client: &ApiClient,
    payload: &CreateNotePayload,
) -> Result<NoteId, PublishError> {
    debug!(title = %payload.title, "POST {NOTES_PATH}");

    let response = client
        .request(Method::POST, NOTES_PATH)
        .json(payload)
        .send()
        .await
        .map_err(|e| PublishError::Api(format!("Could not create note. {e}")))?;

    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| PublishError::Api(format!("Could not read create-note response. {e}")))?;

    if !status.is_success() {
        return Err(PublishError::Api(api_error_message(&body, status)));
    }

    let created: CreatedNoteResponse = serde_json::from_str(&body)
        .map_err(|e| PublishError::Api(format!("Could not parse create-note response. {e}")))?;

    match created.id.as_deref().map(str::trim) {
        Some(id) if !id.is_empty() => NoteId::new(id),
        _ => Err(PublishError::Api(
            "Note was created but no note ID was returned.".to_string(),
        )),
    }
}

/// Fetches the seller's note listing
pub async fn list_seller_notes(client: &ApiClient) -> Result<Vec<SellerNote>, PublishError> {
    debug!("GET {NOTES_PATH}");

    let response = client
        .request(Method::GET, NOTES_PATH)
        .send()
        .await
        .map_err(|e| PublishError::Api(format!("Could not load seller notes. {e}")))?;

    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| PublishError::Api(format!("Could not read seller notes response. {e}")))?;

    if !status.is_success() {
        return Err(PublishError::Api(api_error_message(&body, status)));
    }

    let parsed: SellerNotesResponse = serde_json::from_str(&body)
        .map_err(|e| PublishError::Api(format!("Could not parse seller notes response. {e}")))?;

    Ok(match parsed {
        SellerNotesResponse::Page { content } => content,
        SellerNotesResponse::List(notes) => notes,
    })
}
