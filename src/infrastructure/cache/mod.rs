//! Cache Module
//!
//! In-memory caching of community entities for the lifetime of a session.
//!
//! This module provides:
//! - A generic `Storage` collection holding shared entity handles
//! - A `CommunityCache` acting as the per-community deduplication authority
//! - Reconciliation of raw member and thread batches against that cache
//!
//! # Architecture
//!
//! ```text
//! +---------------------+
//! |   raw record batch  |
//! +---------------------+
//!          |
//!          v
//! +---------------------+
//! |   reconcile()       |  <-- search before construct
//! +---------------------+
//!          |  miss: shell + refresh via EntitySource
//!          v
//! +---------------------+
//! |   CommunityCache    |  <-- one instance per id
//! +---------------------+
//!          |
//!          v
//! +---------------------+
//! |   batch Storage     |  <-- same handles, input order
//! +---------------------+
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use amino_client::infrastructure::cache::{CommunityCache, ThreadStorage};
//!
//! let cache = CommunityCache::new();
//! let threads = ThreadStorage::reconcile(&cache, &gateway, &records)?;
//! let again = ThreadStorage::reconcile(&cache, &gateway, &records)?; // no requests
//! ```

mod community_cache;
mod member_storage;
mod storage;
mod thread_storage;

pub use community_cache::{CachedSource, CommunityCache};
pub use member_storage::MemberStorage;
pub use storage::Storage;
pub use thread_storage::ThreadStorage;

use crate::domain::entities::Message;

/// Ordered collection of messages, as returned by a thread's message list.
pub type MessageStorage = Storage<Message>;
