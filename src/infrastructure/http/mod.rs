//! HTTP Module
//!
//! Blocking request plumbing between the client and the community API.
//!
//! This module provides:
//! - A `Transport` trait abstracting a single synchronous HTTP exchange
//! - A `ReqwestTransport` implementation backed by `reqwest::blocking`
//! - An `ApiClient` adding the session header and JSON handling
//! - Endpoint helpers for consistent URL construction
//!
//! # Architecture
//!
//! ```text
//! +-------------------+
//! |   Repositories    |
//! +-------------------+
//!          |
//!          v
//! +-------------------+
//! |    ApiClient      |  <-- session header, status check, JSON
//! +-------------------+
//!          |
//!          v
//! +-------------------+
//! |  Transport Trait  |  <-- Abstract interface
//! +-------------------+
//!          |
//!          v
//! +-------------------+
//! |  ReqwestTransport |  <-- Concrete implementation
//! +-------------------+
//! ```

mod api_client;
pub mod endpoints;
mod reqwest_transport;

pub use api_client::ApiClient;
pub use reqwest_transport::ReqwestTransport;

use std::collections::BTreeMap;

use serde_json::Value;

use crate::shared::error::ClientError;

/// HTTP methods used by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Delete => "DELETE",
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Headers and optional body of a request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestOptions {
    pub headers: BTreeMap<String, String>,
    pub body: Option<String>,
}

impl RequestOptions {
    /// Adds a header, replacing any previous value.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Sets the request body.
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }
}

/// Raw response of a request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
    pub headers: BTreeMap<String, String>,
}

impl HttpResponse {
    /// Creates a response with a status and body and no headers.
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
            headers: BTreeMap::new(),
        }
    }

    /// Check if the status is in the 2xx range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Parses the body as JSON.
    pub fn json(&self) -> Result<Value, ClientError> {
        Ok(serde_json::from_str(&self.body)?)
    }
}

/// A synchronous HTTP exchange.
///
/// Implementations return `Err` only when no response was obtained; any
/// status code, successful or not, comes back as an `HttpResponse`.
#[cfg_attr(test, mockall::automock)]
pub trait Transport: Send + Sync {
    fn request(
        &self,
        method: Method,
        url: &str,
        options: RequestOptions,
    ) -> Result<HttpResponse, ClientError>;
}
