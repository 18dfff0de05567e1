//! Thread entity and its wire record.
//!
//! Maps to the `thread` object returned by the service, including the
//! embedded `author` profile.

use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use super::{Identified, Member, MemberRecord, Message, OutgoingMessage, Shared, SharedMember};
use crate::domain::services::{ChatChannel, EntitySource, MemberResolver, PermissionService};
use crate::infrastructure::cache::MessageStorage;
use crate::shared::error::ClientError;

/// Shared handle to a cached thread.
pub type SharedThread = Shared<Thread>;

/// Thread types as encoded by the service (`type` field).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThreadType {
    /// One-to-one conversation
    Private,
    /// Invite-only group conversation
    Group,
    /// Public chat room
    Public,
}

impl ThreadType {
    /// Convert from the wire code.
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(Self::Private),
            1 => Some(Self::Group),
            2 => Some(Self::Public),
            _ => None,
        }
    }

    /// Convert to the wire code.
    pub fn code(&self) -> i64 {
        match self {
            Self::Private => 0,
            Self::Group => 1,
            Self::Public => 2,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Private => "private",
            Self::Group => "group",
            Self::Public => "public",
        }
    }
}

impl std::fmt::Display for ThreadType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Raw `thread` object as sent by the service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ThreadRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thread_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Thread description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub members_quota: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub members_count: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub keywords: Option<Value>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub thread_type: Option<i64>,

    /// Embedded creator profile
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<MemberRecord>,
}

impl ThreadRecord {
    /// Parse a record from a raw JSON value.
    pub fn from_value(value: Value) -> Result<Self, ClientError> {
        serde_json::from_value(value)
            .map_err(|e| ClientError::schema(format!("invalid thread: {}", e)))
    }

    /// Id of the embedded author, if present.
    pub fn author_id(&self) -> Option<&str> {
        self.author.as_ref().and_then(|author| author.uid.as_deref())
    }
}

/// A chat thread inside a community.
#[derive(Debug, Clone, Default)]
pub struct Thread {
    /// Remote thread id (`threadId`)
    pub id: String,

    pub icon: Option<String>,

    pub title: Option<String>,

    /// Description (`content`)
    pub description: Option<String>,

    /// Maximum number of participants
    pub members_quota: Option<i64>,

    pub members_count: Option<i64>,

    pub keywords: Option<Value>,

    pub thread_type: Option<ThreadType>,

    /// Creator, shared with the community member cache
    pub creator: Option<SharedMember>,
}

impl Thread {
    /// Create an unhydrated thread shell carrying only its id.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    /// Copy the known fields of `record` onto this thread.
    ///
    /// A supplied `creator` is used as is. Otherwise the embedded author id
    /// is handed to `resolver`; a record without an author leaves the
    /// creator unset. Nothing is written if resolution or type decoding
    /// fails.
    pub fn hydrate<R>(
        &mut self,
        record: &ThreadRecord,
        creator: Option<SharedMember>,
        resolver: &R,
    ) -> Result<&mut Self, ClientError>
    where
        R: MemberResolver + ?Sized,
    {
        let thread_type = match record.thread_type {
            Some(code) => Some(ThreadType::from_code(code).ok_or_else(|| {
                ClientError::schema(format!("unknown thread type code {}", code))
            })?),
            None => None,
        };

        let creator = match (creator, record.author_id()) {
            (Some(creator), _) => Some(creator),
            (None, Some(uid)) => {
                debug!(thread_id = %self.id, member_id = %uid, "Resolving thread creator");
                Some(resolver.resolve_member(uid)?)
            }
            (None, None) => None,
        };

        if let Some(thread_id) = &record.thread_id {
            self.id = thread_id.clone();
        }
        self.icon = record.icon.clone();
        self.title = record.title.clone();
        self.description = record.content.clone();
        self.members_quota = record.members_quota;
        self.members_count = record.members_count;
        self.keywords = record.keywords.clone();
        self.thread_type = thread_type;
        self.creator = creator;

        Ok(self)
    }

    /// Re-fetch this thread and hydrate from it, resolving the creator
    /// through `context`. A payload for another `threadId` is rejected.
    pub fn refresh<C>(&mut self, context: &C) -> Result<&mut Self, ClientError>
    where
        C: EntitySource + MemberResolver + ?Sized,
    {
        let record = context.fetch_thread(&self.id)?;
        super::ensure_same_id("thread", &self.id, record.thread_id.as_deref())?;
        self.hydrate(&record, None, context)
    }

    /// Re-fetch this thread, using an already resolved creator.
    pub fn refresh_with_creator<C>(
        &mut self,
        context: &C,
        creator: Option<SharedMember>,
    ) -> Result<&mut Self, ClientError>
    where
        C: EntitySource + MemberResolver + ?Sized,
    {
        let record = context.fetch_thread(&self.id)?;
        super::ensure_same_id("thread", &self.id, record.thread_id.as_deref())?;
        self.hydrate(&record, creator, context)
    }

    /// Id of the creator on record.
    pub fn creator_id(&self) -> Option<String> {
        self.creator.as_ref().map(|creator| creator.read().id.clone())
    }

    /// Serialize the known fields back into a wire record.
    pub fn to_record(&self) -> ThreadRecord {
        ThreadRecord {
            thread_id: Some(self.id.clone()),
            icon: self.icon.clone(),
            title: self.title.clone(),
            content: self.description.clone(),
            members_quota: self.members_quota,
            members_count: self.members_count,
            keywords: self.keywords.clone(),
            thread_type: self.thread_type.map(|t| t.code()),
            author: self.creator.as_ref().map(|creator| creator.read().to_record()),
        }
    }

    /// Move this thread into a shared handle.
    pub fn into_shared(self) -> SharedThread {
        super::share(self)
    }

    /// Fetch the latest `count` messages, in server order.
    pub fn get_message_list<C>(
        &self,
        chat: &C,
        count: u32,
    ) -> Result<MessageStorage, ClientError>
    where
        C: ChatChannel + ?Sized,
    {
        let records = chat.list_messages(&self.id, count)?;
        Ok(records.iter().map(Message::from_record).collect())
    }

    /// Send a text message.
    pub fn send_message<C>(&self, chat: &C, content: &str) -> Result<(), ClientError>
    where
        C: ChatChannel + ?Sized,
    {
        self.send(chat, &OutgoingMessage::text(content))
    }

    /// Send an image file as a message.
    pub fn send_image<C, P>(&self, chat: &C, path: P) -> Result<(), ClientError>
    where
        C: ChatChannel + ?Sized,
        P: AsRef<Path>,
    {
        let message = OutgoingMessage::image_from_path(path)?;
        self.send(chat, &message)
    }

    /// Send an audio file as a voice message.
    pub fn send_audio<C, P>(&self, chat: &C, path: P) -> Result<(), ClientError>
    where
        C: ChatChannel + ?Sized,
        P: AsRef<Path>,
    {
        let message = OutgoingMessage::audio_from_path(path)?;
        self.send(chat, &message)
    }

    fn send<C>(&self, chat: &C, message: &OutgoingMessage) -> Result<(), ClientError>
    where
        C: ChatChannel + ?Sized,
    {
        let payload = message.to_payload(chat.client_ref_id(), chrono::Utc::now().timestamp_millis());
        chat.post_message(&self.id, &payload)
    }

    /// Remove `member` from this thread. Only the thread creator may do so.
    pub fn ban<C>(&self, chat: &C, member: &Member, rejoin: bool) -> Result<(), ClientError>
    where
        C: ChatChannel + ?Sized,
    {
        PermissionService::ensure_thread_host(self, chat.me().as_ref())?;
        chat.remove_member(&self.id, &member.id, Some(rejoin))
    }

    /// Leave this thread.
    ///
    /// The removed participant is the creator on record, not the
    /// authenticated identity.
    pub fn leave<C>(&self, chat: &C) -> Result<(), ClientError>
    where
        C: ChatChannel + ?Sized,
    {
        let creator_id = self.creator_id().ok_or_else(|| {
            ClientError::invalid_input(format!("thread {} has no creator on record", self.id))
        })?;

        let me_id = chat.me().map(|me| me.read().id.clone());
        if me_id.as_deref() != Some(creator_id.as_str()) {
            tracing::warn!(
                thread_id = %self.id,
                creator_id = %creator_id,
                me_id = ?me_id,
                "Leaving thread removes the creator on record, not the authenticated member"
            );
        }

        chat.remove_member(&self.id, &creator_id, None)
    }
}

impl PartialEq for Thread {
    fn eq(&self, other: &Self) -> bool {
        let same_creator = match (&self.creator, &other.creator) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        };

        same_creator
            && self.id == other.id
            && self.icon == other.icon
            && self.title == other.title
            && self.description == other.description
            && self.members_quota == other.members_quota
            && self.members_count == other.members_count
            && self.keywords == other.keywords
            && self.thread_type == other.thread_type
    }
}

impl Identified for Thread {
    fn entity_id(&self) -> &str {
        &self.id
    }
}
