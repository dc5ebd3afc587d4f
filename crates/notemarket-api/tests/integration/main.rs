//! Integration tests for the marketplace API adapter
//!
//! Uses wiremock to stand in for the backend and the storage service.

mod test_connectivity;
mod test_notes;
mod test_transfer;
mod test_upload_sessions;
