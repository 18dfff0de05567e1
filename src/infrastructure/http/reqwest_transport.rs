//! Reqwest Transport
//!
//! [`Transport`] implementation backed by `reqwest::blocking`.

use std::collections::BTreeMap;
use std::time::Duration;

use reqwest::blocking::Client;
use tracing::trace;

use super::{HttpResponse, Method, RequestOptions, Transport};
use crate::shared::error::ClientError;

/// Blocking HTTP transport.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Build a transport with an optional request timeout.
    pub fn new(timeout: Option<Duration>, user_agent: &str) -> Result<Self, ClientError> {
        let mut builder = Client::builder().user_agent(user_agent.to_string());
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder.build().map_err(ClientError::transport)?;
        Ok(Self { client })
    }

    /// Wrap an already configured client.
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

fn to_reqwest(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Delete => reqwest::Method::DELETE,
    }
}

impl Transport for ReqwestTransport {
    fn request(
        &self,
        method: Method,
        url: &str,
        options: RequestOptions,
    ) -> Result<HttpResponse, ClientError> {
        let mut request = self.client.request(to_reqwest(method), url);
        for (name, value) in &options.headers {
            request = request.header(name.as_str(), value.as_str());
        }
        if let Some(body) = options.body {
            request = request.body(body);
        }

        let response = request.send().map_err(ClientError::transport)?;

        let status = response.status().as_u16();
        let headers: BTreeMap<String, String> = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|value| (name.as_str().to_string(), value.to_string()))
            })
            .collect();
        let body = response.text().map_err(ClientError::transport)?;
        trace!(%url, status, "HTTP exchange complete");

        Ok(HttpResponse {
            status,
            body,
            headers,
        })
    }
}
