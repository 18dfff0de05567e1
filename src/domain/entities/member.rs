//! Member entity and its wire record.
//!
//! Maps to the `userProfile` object returned by the service.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{Identified, Shared};
use crate::domain::services::EntitySource;
use crate::shared::error::ClientError;

/// Shared handle to a cached member.
pub type SharedMember = Shared<Member>;

/// Raw `userProfile` object as sent by the service.
///
/// Every field is optional: absent keys hydrate as unset, unknown keys are
/// ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MemberRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub online_status: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub members_count: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub reputation: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_time: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified_time: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub blogs_count: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub stories_count: Option<i64>,
}

impl MemberRecord {
    /// Parse a record from a raw JSON value.
    ///
    /// A value of the wrong JSON type for a known field is reported as a
    /// schema mismatch instead of being silently dropped.
    pub fn from_value(value: Value) -> Result<Self, ClientError> {
        serde_json::from_value(value)
            .map_err(|e| ClientError::schema(format!("invalid userProfile: {}", e)))
    }
}

/// A user profile inside a community.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Member {
    /// Remote user id (`uid`)
    pub id: String,

    /// Avatar URL
    pub icon: Option<String>,

    /// Display name (`nickname`)
    pub name: Option<String>,

    /// Presence flag as reported by the service
    pub online_status: Option<i64>,

    /// Number of followers
    pub members_count: Option<i64>,

    pub reputation: Option<i64>,

    pub level: Option<i64>,

    pub created_time: Option<String>,

    pub modified_time: Option<String>,

    pub blogs_count: Option<i64>,

    pub stories_count: Option<i64>,
}

impl Member {
    /// Create an unhydrated member shell carrying only its id.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    /// Build a member directly from an already available record.
    pub fn from_record(record: &MemberRecord) -> Self {
        let mut member = Self::new(record.uid.clone().unwrap_or_default());
        member.hydrate(record);
        member
    }

    /// Copy the known fields of `record` onto this member.
    ///
    /// The id is only replaced when the record carries one, so a shell keeps
    /// its cache key even if the payload omits `uid`.
    pub fn hydrate(&mut self, record: &MemberRecord) -> &mut Self {
        if let Some(uid) = &record.uid {
            self.id = uid.clone();
        }
        self.icon = record.icon.clone();
        self.name = record.nickname.clone();
        self.online_status = record.online_status;
        self.members_count = record.members_count;
        self.reputation = record.reputation;
        self.level = record.level;
        self.created_time = record.created_time.clone();
        self.modified_time = record.modified_time.clone();
        self.blogs_count = record.blogs_count;
        self.stories_count = record.stories_count;
        self
    }

    /// Re-fetch this member's profile and hydrate from it.
    ///
    /// A profile carrying another `uid` is rejected and nothing is written,
    /// so a cached member keeps the id it is cached under.
    pub fn refresh<S>(&mut self, source: &S) -> Result<&mut Self, ClientError>
    where
        S: EntitySource + ?Sized,
    {
        let record = source.fetch_member(&self.id)?;
        super::ensure_same_id("member", &self.id, record.uid.as_deref())?;
        Ok(self.hydrate(&record))
    }

    /// Serialize the known fields back into a wire record.
    pub fn to_record(&self) -> MemberRecord {
        MemberRecord {
            uid: Some(self.id.clone()),
            icon: self.icon.clone(),
            nickname: self.name.clone(),
            online_status: self.online_status,
            members_count: self.members_count,
            reputation: self.reputation,
            level: self.level,
            created_time: self.created_time.clone(),
            modified_time: self.modified_time.clone(),
            blogs_count: self.blogs_count,
            stories_count: self.stories_count,
        }
    }

    /// Move this member into a shared handle.
    pub fn into_shared(self) -> SharedMember {
        super::share(self)
    }
}

impl Identified for Member {
    fn entity_id(&self) -> &str {
        &self.id
    }
}
