//! Community Service
//!
//! Session-scoped context of one community: owns the entity cache, knows
//! the authenticated member and routes entity and thread operations to the
//! community repository.

use serde_json::Value;
use tracing::{debug, info, instrument};

use crate::config::DEFAULT_MESSAGE_PAGE_SIZE;
use crate::domain::entities::{
    MemberRecord, MessageRecord, SharedMember, SharedThread, Thread, ThreadRecord, CLIENT_REF_ID,
};
use crate::domain::services::{ChatChannel, EntitySource, MemberResolver};
use crate::infrastructure::cache::{
    CachedSource, CommunityCache, MemberStorage, MessageStorage, ThreadStorage,
};
use crate::infrastructure::repositories::HttpCommunityRepository;
use crate::shared::error::ClientError;

/// One community as seen by one session.
///
/// Entities obtained through a `Community` are deduplicated by id: asking
/// twice for the same member or thread yields the same shared instance.
#[derive(Debug)]
pub struct Community {
    repository: HttpCommunityRepository,
    cache: CommunityCache,
    me: Option<SharedMember>,
    client_ref_id: i64,
    message_page_size: u32,
}

impl Community {
    /// Creates a community context with an empty cache and no identity.
    pub fn new(repository: HttpCommunityRepository) -> Self {
        Self {
            repository,
            cache: CommunityCache::new(),
            me: None,
            client_ref_id: CLIENT_REF_ID,
            message_page_size: DEFAULT_MESSAGE_PAGE_SIZE,
        }
    }

    /// Sets the authenticated member.
    pub fn with_me(mut self, me: SharedMember) -> Self {
        self.set_me(me);
        self
    }

    /// Overrides the client reference id sent with messages.
    pub fn with_client_ref_id(mut self, client_ref_id: i64) -> Self {
        self.client_ref_id = client_ref_id;
        self
    }

    /// Overrides the default message listing size.
    pub fn with_message_page_size(mut self, size: u32) -> Self {
        self.message_page_size = size;
        self
    }

    /// Sets the authenticated member.
    ///
    /// When the id is already cached the cached instance is used instead.
    /// Otherwise `me` is kept as given and stays out of the cache, which only
    /// holds hydrated members; use [`Community::identify`] to fetch and cache
    /// the identity.
    pub fn set_me(&mut self, me: SharedMember) {
        let id = me.read().id.clone();
        self.me = Some(self.cache.find_member(&id).unwrap_or(me));
    }

    /// Resolves `member_id` through the cache and makes it the
    /// authenticated member.
    #[instrument(skip(self))]
    pub fn identify(&mut self, member_id: &str) -> Result<SharedMember, ClientError> {
        let me = self.member(member_id)?;
        self.me = Some(me.clone());
        info!(member_id = %member_id, community_id = %self.id(), "Session identity set");
        Ok(me)
    }

    pub fn id(&self) -> &str {
        self.repository.community_id()
    }

    pub fn cache(&self) -> &CommunityCache {
        &self.cache
    }

    pub fn repository(&self) -> &HttpCommunityRepository {
        &self.repository
    }

    /// Member by id: cached instance, or fetched and cached on first use.
    ///
    /// Cache lookups never lock cached entities, so this may be called while
    /// holding a guard on another cached member.
    pub fn member(&self, id: &str) -> Result<SharedMember, ClientError> {
        self.cache.resolve_member(id, &self.repository)
    }

    /// Thread by id: cached instance, or fetched and cached on first use.
    #[instrument(skip(self))]
    pub fn thread(&self, id: &str) -> Result<SharedThread, ClientError> {
        if let Some(thread) = self.cache.find_thread(id) {
            debug!(thread_id = %id, "Thread cache hit");
            return Ok(thread);
        }

        let mut thread = Thread::new(id);
        thread.refresh(&self.context())?;
        Ok(self.cache.insert_thread(thread.into_shared()))
    }

    /// Map raw member records onto cached members.
    pub fn reconcile_members(&self, records: &[MemberRecord]) -> Result<MemberStorage, ClientError> {
        MemberStorage::reconcile(&self.cache, &self.repository, records)
    }

    /// Map raw thread records onto cached threads.
    pub fn reconcile_threads(&self, records: &[ThreadRecord]) -> Result<ThreadStorage, ClientError> {
        ThreadStorage::reconcile(&self.cache, &self.repository, records)
    }

    /// Re-fetch every member of `members`, in order.
    pub fn refresh_members(&self, members: &MemberStorage) -> Result<(), ClientError> {
        members.refresh(&self.repository)
    }

    /// Re-fetch every thread of `threads`, in order.
    pub fn refresh_threads(&self, threads: &ThreadStorage) -> Result<(), ClientError> {
        threads.refresh(&self.context())
    }

    /// First page of the threads the session has joined.
    #[instrument(skip(self))]
    pub fn joined_threads(&self, size: u32) -> Result<ThreadStorage, ClientError> {
        let records = self.repository.joined_thread_records(size)?;
        self.reconcile_threads(&records)
    }

    /// First page of the members currently online.
    #[instrument(skip(self))]
    pub fn online_members(&self, size: u32) -> Result<MemberStorage, ClientError> {
        let records = self.repository.online_member_records(size)?;
        self.reconcile_members(&records)
    }

    /// Latest messages of `thread`, using the configured page size.
    pub fn recent_messages(&self, thread: &Thread) -> Result<MessageStorage, ClientError> {
        thread.get_message_list(self, self.message_page_size)
    }

    fn context(&self) -> CachedSource<'_, HttpCommunityRepository> {
        CachedSource::new(&self.cache, &self.repository)
    }
}

impl EntitySource for Community {
    fn fetch_member(&self, id: &str) -> Result<MemberRecord, ClientError> {
        self.repository.fetch_member(id)
    }

    fn fetch_thread(&self, id: &str) -> Result<ThreadRecord, ClientError> {
        self.repository.fetch_thread(id)
    }
}

impl MemberResolver for Community {
    fn resolve_member(&self, id: &str) -> Result<SharedMember, ClientError> {
        self.member(id)
    }
}

impl ChatChannel for Community {
    fn me(&self) -> Option<SharedMember> {
        self.me.clone()
    }

    fn client_ref_id(&self) -> i64 {
        self.client_ref_id
    }

    fn list_messages(&self, thread_id: &str, count: u32) -> Result<Vec<MessageRecord>, ClientError> {
        self.repository.list_messages(thread_id, count)
    }

    fn post_message(&self, thread_id: &str, payload: &Value) -> Result<(), ClientError> {
        self.repository.post_message(thread_id, payload)
    }

    fn remove_member(
        &self,
        thread_id: &str,
        member_id: &str,
        allow_rejoin: Option<bool>,
    ) -> Result<(), ClientError> {
        self.repository.remove_member(thread_id, member_id, allow_rejoin)
    }
}
