//! Community Repository Implementation
//!
//! HTTP implementation of the record fetches and thread actions of one
//! community. Responses are unwrapped from their envelope key
//! (`userProfile`, `thread`, `messageList`, ...) and parsed into wire
//! records; anything that does not match surfaces as `SchemaMismatch`.

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, instrument};

use crate::domain::entities::{MemberRecord, MessageRecord, ThreadRecord};
use crate::domain::services::EntitySource;
use crate::infrastructure::http::{endpoints, ApiClient};
use crate::shared::error::ClientError;

/// Envelope keys of the service responses.
pub mod keys {
    pub const USER_PROFILE: &str = "userProfile";
    pub const THREAD: &str = "thread";
    pub const MESSAGE_LIST: &str = "messageList";
    pub const THREAD_LIST: &str = "threadList";
    pub const USER_PROFILE_LIST: &str = "userProfileList";
}

/// Remote data access for one community.
#[derive(Debug, Clone)]
pub struct HttpCommunityRepository {
    api: ApiClient,
    community_id: String,
}

impl HttpCommunityRepository {
    /// Creates a repository for `community_id` on top of `api`.
    pub fn new(api: ApiClient, community_id: impl Into<String>) -> Self {
        Self {
            api,
            community_id: community_id.into(),
        }
    }

    pub fn community_id(&self) -> &str {
        &self.community_id
    }

    fn base(&self) -> &str {
        self.api.base_url()
    }

    /// Latest `count` messages of a thread, in server order.
    #[instrument(skip(self), level = "debug")]
    pub fn list_messages(&self, thread_id: &str, count: u32) -> Result<Vec<MessageRecord>, ClientError> {
        let url = endpoints::message_page(self.base(), &self.community_id, thread_id, count);
        let body = self.api.get_json(&url)?;
        unwrap_envelope(body, keys::MESSAGE_LIST)
    }

    /// Post a message body to a thread.
    #[instrument(skip(self, payload), level = "debug")]
    pub fn post_message(&self, thread_id: &str, payload: &Value) -> Result<(), ClientError> {
        let url = endpoints::thread_messages(self.base(), &self.community_id, thread_id);
        self.api.post_json(&url, payload)?;
        debug!(thread_id = %thread_id, "Message posted");
        Ok(())
    }

    /// Remove a member from a thread; with `allow_rejoin` set this is a ban.
    #[instrument(skip(self), level = "debug")]
    pub fn remove_member(
        &self,
        thread_id: &str,
        member_id: &str,
        allow_rejoin: Option<bool>,
    ) -> Result<(), ClientError> {
        let url = match allow_rejoin {
            Some(rejoin) => {
                endpoints::thread_ban(self.base(), &self.community_id, thread_id, member_id, rejoin)
            }
            None => endpoints::thread_member(self.base(), &self.community_id, thread_id, member_id),
        };
        self.api.delete(&url)
    }

    /// First page of the threads the session has joined.
    #[instrument(skip(self), level = "debug")]
    pub fn joined_thread_records(&self, size: u32) -> Result<Vec<ThreadRecord>, ClientError> {
        let url = endpoints::joined_threads(self.base(), &self.community_id, size);
        let body = self.api.get_json(&url)?;
        unwrap_envelope(body, keys::THREAD_LIST)
    }

    /// First page of the members currently online.
    #[instrument(skip(self), level = "debug")]
    pub fn online_member_records(&self, size: u32) -> Result<Vec<MemberRecord>, ClientError> {
        let url = endpoints::online_members(self.base(), &self.community_id, size);
        let body = self.api.get_json(&url)?;
        unwrap_envelope(body, keys::USER_PROFILE_LIST)
    }
}

impl EntitySource for HttpCommunityRepository {
    #[instrument(skip(self), level = "debug")]
    fn fetch_member(&self, id: &str) -> Result<MemberRecord, ClientError> {
        let url = endpoints::user_profile(self.base(), &self.community_id, id);
        let body = self.api.get_json(&url)?;
        unwrap_envelope(body, keys::USER_PROFILE)
    }

    #[instrument(skip(self), level = "debug")]
    fn fetch_thread(&self, id: &str) -> Result<ThreadRecord, ClientError> {
        let url = endpoints::thread(self.base(), &self.community_id, id);
        let body = self.api.get_json(&url)?;
        unwrap_envelope(body, keys::THREAD)
    }
}

/// Take `key` out of a response object and parse it as `T`.
fn unwrap_envelope<T: DeserializeOwned>(mut body: Value, key: &str) -> Result<T, ClientError> {
    let inner = body
        .get_mut(key)
        .map(Value::take)
        .ok_or_else(|| ClientError::schema(format!("response has no `{}` key", key)))?;

    serde_json::from_value(inner)
        .map_err(|e| ClientError::schema(format!("invalid `{}`: {}", key, e)))
}
