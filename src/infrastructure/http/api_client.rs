//! API Client
//!
//! Session-authenticated JSON requests on top of a [`Transport`].

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, instrument, warn};

use super::endpoints::{AUTH_HEADER, SESSION_PREFIX};
use super::{HttpResponse, Method, RequestOptions, Transport};
use crate::shared::error::ClientError;

/// Issues authenticated requests against one API root.
///
/// Cheap to clone: the transport and strings are reference counted.
#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn Transport>,
    base_url: Arc<str>,
    session: Arc<str>,
}

impl ApiClient {
    /// Creates a client sending `NDCAUTH: sid=<session>` on every request.
    pub fn new(
        transport: Arc<dyn Transport>,
        base_url: impl Into<Arc<str>>,
        session: impl Into<Arc<str>>,
    ) -> Self {
        Self {
            transport,
            base_url: base_url.into(),
            session: session.into(),
        }
    }

    /// API root all endpoints are built from.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET `url` and parse the body as JSON.
    pub fn get_json(&self, url: &str) -> Result<Value, ClientError> {
        self.send(Method::Get, url, None)?.json()
    }

    /// POST a JSON body to `url` and parse the response body, if any.
    pub fn post_json(&self, url: &str, body: &Value) -> Result<Value, ClientError> {
        let response = self.send(Method::Post, url, Some(serde_json::to_string(body)?))?;
        if response.body.trim().is_empty() {
            return Ok(Value::Null);
        }
        response.json()
    }

    /// DELETE `url`, discarding the response body.
    pub fn delete(&self, url: &str) -> Result<(), ClientError> {
        self.send(Method::Delete, url, None).map(|_| ())
    }

    fn auth_options(&self) -> RequestOptions {
        RequestOptions::default().header(AUTH_HEADER, format!("{}{}", SESSION_PREFIX, self.session))
    }

    #[instrument(skip(self, body), level = "debug")]
    fn send(&self, method: Method, url: &str, body: Option<String>) -> Result<HttpResponse, ClientError> {
        let mut options = self.auth_options();
        if let Some(body) = body {
            options = options
                .header("Content-Type", "application/json")
                .body(body);
        }

        let response = self.transport.request(method, url, options)?;
        debug!(status = response.status, bytes = response.body.len(), "Response received");

        if !response.is_success() {
            warn!(status = response.status, "Request rejected by server");
            return Err(ClientError::Status {
                status: response.status,
                body: response.body,
            });
        }

        Ok(response)
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("session", &"<redacted>")
            .finish()
    }
}
