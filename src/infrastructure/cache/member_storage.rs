//! Member Storage
//!
//! Reconciliation of raw member batches against the community cache.

use tracing::{debug, instrument};

use super::{CommunityCache, Storage};
use crate::domain::entities::{Member, MemberRecord};
use crate::domain::services::EntitySource;
use crate::shared::error::ClientError;

/// Ordered collection of members.
pub type MemberStorage = Storage<Member>;

impl Storage<Member> {
    /// Map a batch of member records onto cached or freshly fetched members.
    ///
    /// Each record's `uid` is looked up in `cache`; a miss fetches the
    /// member's profile through `source` and caches it, a hit reuses the
    /// cached instance as is. The result keeps the order of `records`.
    #[instrument(skip_all, fields(records = records.len()))]
    pub fn reconcile<S>(
        cache: &CommunityCache,
        source: &S,
        records: &[MemberRecord],
    ) -> Result<Self, ClientError>
    where
        S: EntitySource + ?Sized,
    {
        let mut batch = Self::new();
        for record in records {
            let id = record
                .uid
                .as_deref()
                .ok_or_else(|| ClientError::schema("member record without `uid`"))?;
            batch.push(cache.resolve_member(id, source)?);
        }

        debug!(
            resolved = batch.len(),
            cached = cache.member_count(),
            "Member batch reconciled"
        );
        Ok(batch)
    }

    /// Build a collection by hydrating each record directly.
    ///
    /// Bypasses the community cache and performs no requests.
    pub fn from_records(records: &[MemberRecord]) -> Self {
        records.iter().map(Member::from_record).collect()
    }

    /// Refresh every member in index order, stopping at the first failure.
    pub fn refresh<S>(&self, source: &S) -> Result<(), ClientError>
    where
        S: EntitySource + ?Sized,
    {
        for member in self {
            member.write().refresh(source)?;
        }
        Ok(())
    }
}
