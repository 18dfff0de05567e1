//! Community Cache
//!
//! Session-lifetime cache of the members and threads seen in one community.
//!
//! The cache is the deduplication authority: it never holds two entities
//! with the same id, and [`CommunityCache::insert_member`] /
//! [`CommunityCache::insert_thread`] hand back the canonical instance when
//! an id is already present. Nothing is ever evicted.

use parking_lot::RwLock;
use tracing::{debug, instrument};

use super::{MemberStorage, ThreadStorage};
use crate::domain::entities::{Member, MemberRecord, SharedMember, SharedThread, ThreadRecord};
use crate::domain::services::{EntitySource, MemberResolver};
use crate::shared::error::ClientError;

/// Per-community cache of members and threads.
#[derive(Debug, Default)]
pub struct CommunityCache {
    members: RwLock<MemberStorage>,
    threads: RwLock<ThreadStorage>,
}

impl CommunityCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up a cached member by id.
    pub fn find_member(&self, id: &str) -> Option<SharedMember> {
        self.members.read().find(id)
    }

    /// Looks up a cached thread by id.
    pub fn find_thread(&self, id: &str) -> Option<SharedThread> {
        self.threads.read().find(id)
    }

    /// Adds a member unless its id is already cached.
    ///
    /// Returns the instance the cache holds for that id afterwards.
    pub fn insert_member(&self, member: SharedMember) -> SharedMember {
        let id = member.read().id.clone();
        let mut members = self.members.write();
        if let Some(existing) = members.find(&id) {
            return existing;
        }
        members.push(member.clone());
        member
    }

    /// Adds a thread unless its id is already cached.
    ///
    /// Returns the instance the cache holds for that id afterwards.
    pub fn insert_thread(&self, thread: SharedThread) -> SharedThread {
        let id = thread.read().id.clone();
        let mut threads = self.threads.write();
        if let Some(existing) = threads.find(&id) {
            return existing;
        }
        threads.push(thread.clone());
        thread
    }

    /// Returns the cached member for `id`, fetching and caching it on a miss.
    #[instrument(skip(self, source), level = "debug")]
    pub fn resolve_member<S>(&self, id: &str, source: &S) -> Result<SharedMember, ClientError>
    where
        S: EntitySource + ?Sized,
    {
        if let Some(member) = self.find_member(id) {
            debug!(member_id = %id, "Member cache hit");
            return Ok(member);
        }

        debug!(member_id = %id, "Member cache miss");
        let mut member = Member::new(id);
        member.refresh(source)?;
        Ok(self.insert_member(member.into_shared()))
    }

    /// Snapshot of the cached members, in insertion order.
    pub fn members(&self) -> MemberStorage {
        self.members.read().clone()
    }

    /// Snapshot of the cached threads, in insertion order.
    pub fn threads(&self) -> ThreadStorage {
        self.threads.read().clone()
    }

    pub fn member_count(&self) -> usize {
        self.members.read().len()
    }

    pub fn thread_count(&self) -> usize {
        self.threads.read().len()
    }
}

/// An [`EntitySource`] whose member resolution goes through a
/// [`CommunityCache`].
///
/// Used as the hydration context for threads so that a creator always
/// resolves to the cached member instance.
pub struct CachedSource<'a, S: ?Sized> {
    cache: &'a CommunityCache,
    source: &'a S,
}

impl<'a, S: ?Sized> CachedSource<'a, S> {
    pub fn new(cache: &'a CommunityCache, source: &'a S) -> Self {
        Self { cache, source }
    }
}

impl<S> EntitySource for CachedSource<'_, S>
where
    S: EntitySource + ?Sized,
{
    fn fetch_member(&self, id: &str) -> Result<MemberRecord, ClientError> {
        self.source.fetch_member(id)
    }

    fn fetch_thread(&self, id: &str) -> Result<ThreadRecord, ClientError> {
        self.source.fetch_thread(id)
    }
}

impl<S> MemberResolver for CachedSource<'_, S>
where
    S: EntitySource + ?Sized,
{
    fn resolve_member(&self, id: &str) -> Result<SharedMember, ClientError> {
        self.cache.resolve_member(id, self.source)
    }
}
