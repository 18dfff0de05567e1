//! Common Test Utilities
//!
//! Scripted transport, payload builders and client setup.

use std::sync::Arc;

use amino_client::infrastructure::http::{HttpResponse, Method, RequestOptions, Transport};
use amino_client::{Client, ClientError};
use parking_lot::Mutex;
use serde_json::{json, Value};

pub const BASE: &str = "https://api.test/api/v1";
pub const SESSION: &str = "test-session";
pub const COMMUNITY: &str = "42";

/// A request seen by the transport.
#[derive(Debug, Clone)]
pub struct Call {
    pub method: Method,
    pub url: String,
    pub options: RequestOptions,
}

impl Call {
    /// Request body parsed as JSON.
    pub fn json(&self) -> Value {
        serde_json::from_str(self.options.body.as_deref().unwrap_or("null")).unwrap()
    }
}

struct Route {
    method: Method,
    url: String,
    status: u16,
    body: String,
}

/// Transport answering from a fixed route table and recording every call.
///
/// Unknown routes answer 404.
#[derive(Default)]
pub struct ScriptedTransport {
    routes: Mutex<Vec<Route>>,
    calls: Mutex<Vec<Call>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answers `method url` with `status` and `body`.
    pub fn on(&self, method: Method, url: impl Into<String>, status: u16, body: Value) {
        self.routes.lock().push(Route {
            method,
            url: url.into(),
            status,
            body: body.to_string(),
        });
    }

    /// Answers a profile visit of `uid`.
    pub fn member(&self, uid: &str, nickname: &str) {
        self.on(
            Method::Get,
            format!("{}/x{}/s/user-profile/{}?action=visit", BASE, COMMUNITY, uid),
            200,
            json!({ "userProfile": profile(uid, nickname) }),
        );
    }

    /// Answers a fetch of `thread_id` authored by `author_uid`.
    pub fn thread(&self, thread_id: &str, author_uid: &str) {
        self.on(
            Method::Get,
            format!("{}/x{}/s/chat/thread/{}", BASE, COMMUNITY, thread_id),
            200,
            json!({ "thread": thread(thread_id, author_uid) }),
        );
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().clone()
    }

    /// Number of calls whose URL ends with `suffix`.
    pub fn count(&self, suffix: &str) -> usize {
        self.calls
            .lock()
            .iter()
            .filter(|call| call.url.ends_with(suffix))
            .count()
    }
}

impl Transport for ScriptedTransport {
    fn request(
        &self,
        method: Method,
        url: &str,
        options: RequestOptions,
    ) -> Result<HttpResponse, ClientError> {
        self.calls.lock().push(Call {
            method,
            url: url.to_string(),
            options,
        });

        let routes = self.routes.lock();
        let response = routes
            .iter()
            .find(|route| route.method == method && route.url == url)
            .map(|route| HttpResponse::new(route.status, route.body.clone()))
            .unwrap_or_else(|| HttpResponse::new(404, r#"{"api:message":"not found"}"#));
        Ok(response)
    }
}

/// `userProfile` object.
pub fn profile(uid: &str, nickname: &str) -> Value {
    json!({ "uid": uid, "nickname": nickname, "level": 3 })
}

/// `thread` object of a public thread.
pub fn thread(thread_id: &str, author_uid: &str) -> Value {
    json!({
        "threadId": thread_id,
        "title": format!("Thread {}", thread_id),
        "content": "",
        "membersQuota": 1000,
        "membersCount": 2,
        "type": 2,
        "author": { "uid": author_uid },
    })
}

/// URL under the test community root.
pub fn url(path: &str) -> String {
    format!("{}/x{}/s/{}", BASE, COMMUNITY, path)
}

/// Client over a fresh scripted transport.
pub fn client() -> (Client, Arc<ScriptedTransport>) {
    let transport = Arc::new(ScriptedTransport::new());
    let client = Client::new(transport.clone(), BASE, SESSION);
    (client, transport)
}
