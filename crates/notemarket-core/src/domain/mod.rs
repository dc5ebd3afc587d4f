//! Domain module - core business entities and logic
//!
//! Contains the publication-flow entities and the pure host-classification
//! layer. Everything in this module is synchronous and free of I/O.

pub mod asset;
pub mod draft;
pub mod errors;
pub mod flow;
pub mod netloc;
pub mod newtypes;

pub use asset::{AssetKind, PickedAsset};
pub use draft::NoteDraft;
pub use errors::PublishError;
pub use flow::{FlowStep, PublishFlow};
pub use netloc::{classify_host, compare_hosts, host_of_url, HostClass, HostVerdict};
pub use newtypes::{CourseId, FileKey, NicheId, NoteId};
