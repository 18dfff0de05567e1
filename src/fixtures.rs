//! In-memory collaborators for unit tests.

use std::collections::HashMap;

use parking_lot::Mutex;
use serde_json::{json, Value};

use crate::domain::entities::{
    Member, MemberRecord, MessageRecord, SharedMember, ThreadRecord, CLIENT_REF_ID,
};
use crate::domain::services::{ChatChannel, EntitySource, MemberResolver};
use crate::shared::error::ClientError;

/// `userProfile` payload of a member.
pub fn member_json(uid: &str, nickname: &str) -> Value {
    json!({
        "uid": uid,
        "nickname": nickname,
        "icon": format!("https://cdn.test/{}.png", uid),
        "onlineStatus": 1,
        "reputation": 120,
        "level": 5,
        "createdTime": "2020-01-01T00:00:00Z",
    })
}

/// `thread` payload of a public thread authored by `author_uid`.
pub fn thread_json(thread_id: &str, author_uid: &str) -> Value {
    json!({
        "threadId": thread_id,
        "title": format!("Thread {}", thread_id),
        "content": format!("About {}", thread_id),
        "membersQuota": 1000,
        "membersCount": 3,
        "keywords": "rust,chat",
        "type": 2,
        "author": { "uid": author_uid, "nickname": "author" },
    })
}

fn not_found(id: &str) -> ClientError {
    ClientError::Status {
        status: 404,
        body: format!(r#"{{"api:message":"{} not found"}}"#, id),
    }
}

/// Canned profile and thread records, logging every fetch.
#[derive(Default)]
pub struct FakeSource {
    members: HashMap<String, MemberRecord>,
    threads: HashMap<String, ThreadRecord>,
    member_log: Mutex<Vec<String>>,
    thread_log: Mutex<Vec<String>>,
}

impl FakeSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_member(mut self, uid: &str, nickname: &str) -> Self {
        let record = MemberRecord::from_value(member_json(uid, nickname)).unwrap();
        self.members.insert(uid.to_string(), record);
        self
    }

    /// Serves `value` as the profile requested under `id`.
    pub fn with_member_record(mut self, id: &str, value: Value) -> Self {
        let record = MemberRecord::from_value(value).unwrap();
        self.members.insert(id.to_string(), record);
        self
    }

    /// Serves `value` as the thread requested under `id`.
    pub fn with_thread_record_at(mut self, id: &str, value: Value) -> Self {
        let record = ThreadRecord::from_value(value).unwrap();
        self.threads.insert(id.to_string(), record);
        self
    }

    pub fn with_thread(self, thread_id: &str, author_uid: &str) -> Self {
        self.with_thread_record(thread_json(thread_id, author_uid))
    }

    pub fn with_thread_record(mut self, value: Value) -> Self {
        let record = ThreadRecord::from_value(value).unwrap();
        let id = record.thread_id.clone().unwrap();
        self.threads.insert(id, record);
        self
    }

    pub fn fetched_members(&self) -> Vec<String> {
        self.member_log.lock().clone()
    }

    pub fn fetched_threads(&self) -> Vec<String> {
        self.thread_log.lock().clone()
    }

    pub fn member_fetches(&self) -> usize {
        self.member_log.lock().len()
    }

    pub fn thread_fetches(&self) -> usize {
        self.thread_log.lock().len()
    }
}

impl EntitySource for FakeSource {
    fn fetch_member(&self, id: &str) -> Result<MemberRecord, ClientError> {
        self.member_log.lock().push(id.to_string());
        self.members.get(id).cloned().ok_or_else(|| not_found(id))
    }

    fn fetch_thread(&self, id: &str) -> Result<ThreadRecord, ClientError> {
        self.thread_log.lock().push(id.to_string());
        self.threads.get(id).cloned().ok_or_else(|| not_found(id))
    }
}

/// Resolves without caching: every call fetches.
impl MemberResolver for FakeSource {
    fn resolve_member(&self, id: &str) -> Result<SharedMember, ClientError> {
        let record = self.fetch_member(id)?;
        Ok(Member::from_record(&record).into_shared())
    }
}

/// Records thread actions instead of sending them.
pub struct FakeChat {
    me: Option<SharedMember>,
    messages: Vec<Value>,
    removals: Mutex<Vec<(String, String, Option<bool>)>>,
    posts: Mutex<Vec<(String, Value)>>,
    counts: Mutex<Vec<u32>>,
}

impl FakeChat {
    pub fn new(me: Option<SharedMember>) -> Self {
        Self {
            me,
            messages: Vec::new(),
            removals: Mutex::new(Vec::new()),
            posts: Mutex::new(Vec::new()),
            counts: Mutex::new(Vec::new()),
        }
    }

    pub fn with_messages(mut self, messages: Vec<Value>) -> Self {
        self.messages = messages;
        self
    }

    pub fn removals(&self) -> Vec<(String, String, Option<bool>)> {
        self.removals.lock().clone()
    }

    pub fn posts(&self) -> Vec<(String, Value)> {
        self.posts.lock().clone()
    }

    pub fn requested_counts(&self) -> Vec<u32> {
        self.counts.lock().clone()
    }
}

impl ChatChannel for FakeChat {
    fn me(&self) -> Option<SharedMember> {
        self.me.clone()
    }

    fn client_ref_id(&self) -> i64 {
        CLIENT_REF_ID
    }

    fn list_messages(&self, _thread_id: &str, count: u32) -> Result<Vec<MessageRecord>, ClientError> {
        self.counts.lock().push(count);
        self.messages
            .iter()
            .cloned()
            .map(MessageRecord::from_value)
            .collect()
    }

    fn post_message(&self, thread_id: &str, payload: &Value) -> Result<(), ClientError> {
        self.posts.lock().push((thread_id.to_string(), payload.clone()));
        Ok(())
    }

    fn remove_member(
        &self,
        thread_id: &str,
        member_id: &str,
        allow_rejoin: Option<bool>,
    ) -> Result<(), ClientError> {
        self.removals
            .lock()
            .push((thread_id.to_string(), member_id.to_string(), allow_rejoin));
        Ok(())
    }
}
