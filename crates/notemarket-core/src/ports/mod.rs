//! Port definitions (trait interfaces for adapters)
//!
//! Ports define the boundaries between the domain core and external
//! adapters, following the dependency inversion principle. The core depends
//! on these abstractions; the HTTP adapter crate provides the
//! implementations.

pub mod credentials;
pub mod marketplace;

pub use credentials::{CredentialStore, StaticCredentials};
pub use marketplace::{
    ConnectivityStatus, CreateNotePayload, MarketplaceApi, Preflight, SellerNote, UploadSession,
};
