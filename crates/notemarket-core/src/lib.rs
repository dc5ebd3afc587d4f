//! Notemarket Core - Domain logic and business rules
//!
//! This crate contains the hexagonal architecture core with:
//! - **Domain entities** - `NoteDraft`, `PickedAsset`, `PublishFlow`
//! - **Host classification** - internal/public network topology checks
//! - **Use cases** - `PublishNoteUseCase`, the guided publication orchestrator
//! - **Port definitions** - Traits for adapters: `MarketplaceApi`, `CredentialStore`
//!
//! # Architecture
//!
//! This crate follows the hexagonal (ports & adapters) architecture pattern.
//! The domain module contains pure business logic with no HTTP dependencies.
//! Ports define trait interfaces that adapter crates implement.
//! Use cases orchestrate domain entities through port interfaces.

pub mod config;
pub mod domain;
pub mod ports;
pub mod usecases;
