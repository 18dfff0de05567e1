//! Thread moderation rules.

use crate::domain::entities::{SharedMember, Thread};
use crate::shared::error::ClientError;

/// Message returned when a moderation action is refused.
pub const INSUFFICIENT_PERMISSIONS: &str =
    "You do not have sufficient permissions to perform this operation.";

/// Domain service for checking who may moderate a thread.
pub struct PermissionService;

impl PermissionService {
    /// Check if `me` is the creator of `thread`.
    ///
    /// An unknown identity or a thread without a creator never qualifies.
    pub fn is_thread_host(thread: &Thread, me: Option<&SharedMember>) -> bool {
        match (thread.creator_id(), me) {
            (Some(creator_id), Some(me)) => me.read().id == creator_id,
            _ => false,
        }
    }

    /// Fail with `Forbidden` unless `me` hosts `thread`.
    pub fn ensure_thread_host(thread: &Thread, me: Option<&SharedMember>) -> Result<(), ClientError> {
        if Self::is_thread_host(thread, me) {
            Ok(())
        } else {
            Err(ClientError::Forbidden(INSUFFICIENT_PERMISSIONS.to_string()))
        }
    }
}
