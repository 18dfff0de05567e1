//! # Domain Layer
//!
//! The domain layer models what a community exposes to a client.
//! It never performs I/O itself.
//!
//! ## Structure
//!
//! - **entities**: Member, Thread and Message plus their wire records
//! - **services**: Seams for fetching and resolving entities, and moderation rules
//!
//! ## Design Principles
//!
//! - Entities hydrate from records and serialize back into them
//! - Network access is injected through the traits in `services`
//! - Shared handles give every holder the same live instance

pub mod entities;
pub mod services;

// Re-export commonly used types
pub use entities::*;
pub use services::*;
