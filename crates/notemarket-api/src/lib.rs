//! Notemarket API - HTTP adapter for the marketplace backend
//!
//! Implements the core's marketplace port against the remote backend:
//! - [`client::ApiClient`] - typed HTTP client with per-request bearer auth
//! - [`notes`] - note metadata creation and the seller listing
//! - [`upload_session`] - presigned upload-session issuance
//! - [`connectivity`] - the backend-to-storage preflight
//! - [`transfer`] - the direct-to-storage upload executor
//! - [`provider::MarketplaceProvider`] - the port implementation gluing the
//!   above together

pub mod client;
pub mod connectivity;
pub mod notes;
pub mod provider;
pub mod transfer;
pub mod upload_session;

pub use client::ApiClient;
pub use provider::MarketplaceProvider;
