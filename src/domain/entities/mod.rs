//! # Domain Entities
//!
//! Client-side models of the remote objects a community exposes.
//! Each entity pairs with a wire record type carrying the exact JSON field
//! names of the service; entities are hydrated from records and can be
//! serialized back into them.
//!
//! ## Entities
//!
//! - **Member**: A user profile scoped to a community
//! - **Thread**: A chat conversation (private, group or public) with a creator
//! - **Message**: A single chat message inside a thread
//!
//! ## Sharing
//!
//! Cached entities are handed out as [`Shared`] handles. Hydrating or
//! refreshing through one handle is observed by every other holder, which is
//! how a thread's `creator` stays in sync with the community member cache.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::shared::error::ClientError;

mod member;
mod message;
mod thread;

// Re-export Member entity and related types
pub use member::{Member, MemberRecord, SharedMember};

// Re-export Thread entity and related types
pub use thread::{SharedThread, Thread, ThreadRecord, ThreadType};

// Re-export Message entity and related types
pub use message::{Message, MessageRecord, OutgoingMessage, CLIENT_REF_ID};

/// Shared, mutable handle to a cached entity.
pub type Shared<T> = Arc<RwLock<T>>;

/// Entities addressable by their remote identifier.
pub trait Identified {
    /// Remote identifier used for cache lookups.
    fn entity_id(&self) -> &str;
}

/// Fail when a fetched record names a different entity than the one requested.
pub(crate) fn ensure_same_id(
    kind: &str,
    requested: &str,
    received: Option<&str>,
) -> Result<(), ClientError> {
    match received {
        Some(received) if received != requested => Err(ClientError::schema(format!(
            "{} {} answered with id {}",
            kind, requested, received
        ))),
        _ => Ok(()),
    }
}

/// Wrap an entity into a shared handle.
pub fn share<T>(entity: T) -> Shared<T> {
    Arc::new(RwLock::new(entity))
}
