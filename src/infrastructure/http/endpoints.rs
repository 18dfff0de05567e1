//! Endpoint paths of the community API.
//!
//! Use these helpers to ensure consistent URL construction across the crate.
//! Every helper takes the API base URL (e.g. `https://service.narvii.com/api/v1`)
//! and the community id, and returns an absolute URL.
//!
//! # Example
//! ```rust,ignore
//! use amino_client::infrastructure::http::endpoints;
//!
//! let url = endpoints::thread(DEFAULT_BASE_URL, "42", "T1");
//! assert_eq!(url, "https://service.narvii.com/api/v1/x42/s/chat/thread/T1");
//! ```

use std::fmt::Display;

/// Default API root
pub const DEFAULT_BASE_URL: &str = "https://service.narvii.com/api/v1";

/// Header carrying the session
pub const AUTH_HEADER: &str = "NDCAUTH";

/// Prefix of the session header value (e.g. "sid=<token>")
pub const SESSION_PREFIX: &str = "sid=";

/// Community-scoped root (e.g. "<base>/x42/s")
#[inline]
pub fn community_root(base: &str, community_id: impl Display) -> String {
    format!("{}/x{}/s", base.trim_end_matches('/'), community_id)
}

/// Member profile, fetched as a visit
#[inline]
pub fn user_profile(base: &str, community_id: impl Display, member_id: impl Display) -> String {
    format!(
        "{}/user-profile/{}?action=visit",
        community_root(base, community_id),
        member_id
    )
}

/// Thread resource
#[inline]
pub fn thread(base: &str, community_id: impl Display, thread_id: impl Display) -> String {
    format!("{}/chat/thread/{}", community_root(base, community_id), thread_id)
}

/// Message collection of a thread (POST target)
#[inline]
pub fn thread_messages(base: &str, community_id: impl Display, thread_id: impl Display) -> String {
    format!("{}/message", thread(base, community_id, thread_id))
}

/// Latest `size` messages of a thread
#[inline]
pub fn message_page(
    base: &str,
    community_id: impl Display,
    thread_id: impl Display,
    size: u32,
) -> String {
    format!(
        "{}?v=2&pagingType=t&size={}",
        thread_messages(base, community_id, thread_id),
        size
    )
}

/// Membership of one member in a thread (DELETE target)
#[inline]
pub fn thread_member(
    base: &str,
    community_id: impl Display,
    thread_id: impl Display,
    member_id: impl Display,
) -> String {
    format!("{}/member/{}", thread(base, community_id, thread_id), member_id)
}

/// Ban of one member from a thread
#[inline]
pub fn thread_ban(
    base: &str,
    community_id: impl Display,
    thread_id: impl Display,
    member_id: impl Display,
    allow_rejoin: bool,
) -> String {
    format!(
        "{}?allowRejoin={}",
        thread_member(base, community_id, thread_id, member_id),
        u8::from(allow_rejoin)
    )
}

/// First page of the threads the session has joined
#[inline]
pub fn joined_threads(base: &str, community_id: impl Display, size: u32) -> String {
    format!(
        "{}/chat/thread?type=joined-me&start=0&size={}",
        community_root(base, community_id),
        size
    )
}

/// First page of the members currently online
#[inline]
pub fn online_members(base: &str, community_id: impl Display, size: u32) -> String {
    format!(
        "{}/live-layer?topic=ndtopic:x{}:online-members&start=0&size={}",
        community_root(base, &community_id),
        community_id,
        size
    )
}
