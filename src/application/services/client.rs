//! Client Service
//!
//! Entry point of the library: holds the authenticated API client and
//! hands out [`Community`] contexts.

use std::sync::Arc;

use tracing::info;

use super::community::Community;
use crate::config::{Settings, DEFAULT_MESSAGE_PAGE_SIZE};
use crate::domain::entities::CLIENT_REF_ID;
use crate::infrastructure::http::{ApiClient, ReqwestTransport, Transport};
use crate::infrastructure::repositories::HttpCommunityRepository;
use crate::shared::error::ClientError;

/// An authenticated session against the API.
#[derive(Debug, Clone)]
pub struct Client {
    api: ApiClient,
    client_ref_id: i64,
    message_page_size: u32,
}

impl Client {
    /// Creates a client over any transport.
    pub fn new(
        transport: Arc<dyn Transport>,
        base_url: impl Into<Arc<str>>,
        session: impl Into<Arc<str>>,
    ) -> Self {
        Self {
            api: ApiClient::new(transport, base_url, session),
            client_ref_id: CLIENT_REF_ID,
            message_page_size: DEFAULT_MESSAGE_PAGE_SIZE,
        }
    }

    /// Creates a client from loaded settings, using the blocking reqwest
    /// transport.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when no session token is configured, or
    /// `Transport` when the HTTP client cannot be built.
    pub fn from_settings(settings: &Settings) -> Result<Self, ClientError> {
        let token = settings
            .session
            .token
            .as_deref()
            .filter(|token| !token.is_empty())
            .ok_or_else(|| ClientError::invalid_input("no session token configured"))?;

        let transport = ReqwestTransport::new(settings.http.timeout(), &settings.http.user_agent)?;
        info!(base_url = %settings.api.base_url, environment = %settings.environment, "Client configured");

        Ok(Self {
            api: ApiClient::new(Arc::new(transport), settings.api.base_url.as_str(), token),
            client_ref_id: settings.api.client_ref_id,
            message_page_size: settings.api.message_page_size,
        })
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    /// Opens a context for `community_id` with a fresh cache.
    pub fn community(&self, community_id: impl Into<String>) -> Community {
        let repository = HttpCommunityRepository::new(self.api.clone(), community_id);
        Community::new(repository)
            .with_client_ref_id(self.client_ref_id)
            .with_message_page_size(self.message_page_size)
    }
}
