//! # Amino Client Library
//!
//! This crate provides a synchronous client for the Amino community API with:
//! - Session-authenticated HTTP access over a pluggable transport
//! - Member, thread and message entities mapped from the wire records
//! - A per-community cache that keeps one shared instance per remote id
//! - Thread messaging and moderation actions
//!
//! ## Architecture
//!
//! The crate follows Clean Architecture principles:
//!
//! - **Domain Layer**: Entities, wire records and the seams they depend on
//! - **Application Layer**: The session `Client` and per-community contexts
//! - **Infrastructure Layer**: HTTP transport, repository and entity cache
//!
//! ## Module Structure
//!
//! ```text
//! amino_client/
//! +-- config/         Configuration management
//! +-- domain/         Entities, records and service traits
//! +-- application/    Client and Community services
//! +-- infrastructure/ HTTP, repository and cache implementations
//! +-- shared/         Common utilities (errors, validation)
//! ```
//!
//! ## Example
//!
//! ```rust,ignore
//! use amino_client::{config::Settings, Client};
//!
//! let client = Client::from_settings(&Settings::load()?)?;
//! let community = client.community("42");
//! let threads = community.joined_threads(25)?;
//! for thread in &threads {
//!     println!("{:?}", thread.read().title);
//! }
//! ```

// Configuration module
pub mod config;

// Domain layer - Entities and service seams
pub mod domain;

// Application layer - Session services
pub mod application;

// Infrastructure layer - External implementations
pub mod infrastructure;

// Shared utilities
pub mod shared;

// Telemetry and observability
pub mod telemetry;

#[cfg(test)]
mod fixtures;

pub use application::{Client, Community};
pub use shared::error::ClientError;
