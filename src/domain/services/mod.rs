//! # Domain Services
//!
//! Seams between the entities and whatever answers for a community.
//! Entities never talk to the network directly: they fetch records through
//! an [`EntitySource`], resolve referenced members through a
//! [`MemberResolver`], and post thread actions through a [`ChatChannel`].
//! The application layer's `Community` implements all three; tests plug in
//! in-memory fakes.
//!
//! ## Services
//!
//! - **PermissionService**: Thread moderation rules

mod permission_service;

pub use permission_service::*;

use serde_json::Value;

use crate::domain::entities::{MemberRecord, MessageRecord, SharedMember, ThreadRecord};
use crate::shared::error::ClientError;

/// Fetches canonical records for entities of one community.
pub trait EntitySource {
    /// Fetch the `userProfile` record of a member.
    fn fetch_member(&self, id: &str) -> Result<MemberRecord, ClientError>;

    /// Fetch the `thread` record of a thread.
    fn fetch_thread(&self, id: &str) -> Result<ThreadRecord, ClientError>;
}

/// Maps a member id onto the member instance that should be referenced.
pub trait MemberResolver {
    fn resolve_member(&self, id: &str) -> Result<SharedMember, ClientError>;
}

/// Chat operations scoped to one community, on behalf of one session.
pub trait ChatChannel {
    /// The authenticated member, when known.
    fn me(&self) -> Option<SharedMember>;

    /// Client reference id attached to outgoing messages.
    fn client_ref_id(&self) -> i64;

    /// Fetch the latest `count` messages of a thread.
    fn list_messages(&self, thread_id: &str, count: u32) -> Result<Vec<MessageRecord>, ClientError>;

    /// Post a message body to a thread.
    fn post_message(&self, thread_id: &str, payload: &Value) -> Result<(), ClientError>;

    /// Remove a member from a thread. `allow_rejoin` is only sent for bans.
    fn remove_member(
        &self,
        thread_id: &str,
        member_id: &str,
        allow_rejoin: Option<bool>,
    ) -> Result<(), ClientError>;
}
