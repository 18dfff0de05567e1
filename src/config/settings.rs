//! Client settings and configuration structures.

use std::time::Duration;

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use validator::Validate;

use crate::domain::entities::CLIENT_REF_ID;
use crate::infrastructure::http::endpoints::DEFAULT_BASE_URL;
use crate::shared::validation::validation_message;

/// Default number of messages requested by a message listing.
pub const DEFAULT_MESSAGE_PAGE_SIZE: u32 = 10;

/// Root configuration structure containing all client settings.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Remote API settings
    pub api: ApiSettings,

    /// Session credentials
    #[serde(default)]
    pub session: SessionSettings,

    /// HTTP transport settings
    pub http: HttpSettings,

    /// Current environment (development, staging, production)
    pub environment: String,
}

/// Remote API configuration.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ApiSettings {
    /// API root (e.g., "https://service.narvii.com/api/v1")
    #[validate(url(message = "base_url must be an absolute URL"))]
    pub base_url: String,

    /// Client reference id attached to outgoing messages
    pub client_ref_id: i64,

    /// Default message listing size
    #[validate(range(min = 1, max = 100, message = "message_page_size must be between 1 and 100"))]
    pub message_page_size: u32,
}

/// Session credentials.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SessionSettings {
    /// Session id sent as `NDCAUTH: sid=<token>`
    #[serde(default)]
    pub token: Option<String>,
}

/// HTTP transport configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct HttpSettings {
    /// Request timeout in seconds; no timeout when unset
    #[serde(default)]
    pub timeout_secs: Option<u64>,

    /// User-Agent header value
    pub user_agent: String,
}

impl Settings {
    /// Load settings from environment variables and configuration files.
    ///
    /// The loading order is:
    /// 1. Built-in defaults
    /// 2. config/default.toml (base configuration)
    /// 3. config/{RUN_ENV}.toml (environment-specific overrides)
    /// 4. Environment variables (highest priority)
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if configuration cannot be loaded or parsed,
    /// or if a value fails validation.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let environment = std::env::var("RUN_ENV").unwrap_or_else(|_| "development".into());

        let builder = Self::defaults(&environment)?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // APP__API__BASE_URL=... -> api.base_url = ...
            .add_source(
                Environment::default()
                    .prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("session.token", std::env::var("AMINO_SESSION").ok())?
            .set_override_option("api.base_url", std::env::var("AMINO_BASE_URL").ok())?;

        Self::from_builder(builder)
    }

    /// Builder preloaded with the built-in defaults.
    pub fn defaults(environment: &str) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Config::builder()
            .set_default("environment", environment)?
            .set_default("api.base_url", DEFAULT_BASE_URL)?
            .set_default("api.client_ref_id", CLIENT_REF_ID)?
            .set_default("api.message_page_size", i64::from(DEFAULT_MESSAGE_PAGE_SIZE))?
            .set_default(
                "http.user_agent",
                concat!("amino-client/", env!("CARGO_PKG_VERSION")),
            )
    }

    /// Build, deserialize and validate settings from `builder`.
    pub fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        builder
            .build()?
            .try_deserialize()
            .and_then(|settings: Self| {
                settings
                    .api
                    .validate()
                    .map_err(|errors| ConfigError::Message(validation_message(&errors)))?;
                Ok(settings)
            })
    }
}

impl HttpSettings {
    /// Request timeout, if configured.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}
