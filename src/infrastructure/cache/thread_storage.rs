//! Thread Storage
//!
//! Reconciliation of raw thread batches against the community cache.

use tracing::{debug, instrument};

use super::{CachedSource, CommunityCache, Storage};
use crate::domain::entities::{Thread, ThreadRecord};
use crate::domain::services::{EntitySource, MemberResolver};
use crate::shared::error::ClientError;

/// Ordered collection of threads.
pub type ThreadStorage = Storage<Thread>;

impl Storage<Thread> {
    /// Map a batch of thread records onto cached or freshly fetched threads.
    ///
    /// For every record the embedded author is resolved through `cache`
    /// first, then the thread itself: a cached thread is reused as is, a
    /// missing one is fetched through `source`, hydrated with the resolved
    /// author as creator and cached. The result keeps the order of `records`.
    #[instrument(skip_all, fields(records = records.len()))]
    pub fn reconcile<S>(
        cache: &CommunityCache,
        source: &S,
        records: &[ThreadRecord],
    ) -> Result<Self, ClientError>
    where
        S: EntitySource + ?Sized,
    {
        let context = CachedSource::new(cache, source);
        let mut batch = Self::new();

        for record in records {
            let thread_id = record
                .thread_id
                .as_deref()
                .ok_or_else(|| ClientError::schema("thread record without `threadId`"))?;

            let creator = record
                .author_id()
                .map(|uid| cache.resolve_member(uid, source))
                .transpose()?;

            let thread = match cache.find_thread(thread_id) {
                Some(thread) => {
                    debug!(thread_id = %thread_id, "Thread cache hit");
                    thread
                }
                None => {
                    debug!(thread_id = %thread_id, "Thread cache miss");
                    let mut thread = Thread::new(thread_id);
                    thread.refresh_with_creator(&context, creator)?;
                    cache.insert_thread(thread.into_shared())
                }
            };

            batch.push(thread);
        }

        debug!(
            resolved = batch.len(),
            cached = cache.thread_count(),
            "Thread batch reconciled"
        );
        Ok(batch)
    }

    /// Refresh every thread in index order, stopping at the first failure.
    pub fn refresh<C>(&self, context: &C) -> Result<(), ClientError>
    where
        C: EntitySource + MemberResolver + ?Sized,
    {
        for thread in self {
            thread.write().refresh(context)?;
        }
        Ok(())
    }
}
