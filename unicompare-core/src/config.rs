//! Centralized configuration for Unicompare.
//!
//! Credentials double as feature switches: a missing store URL selects the
//! in-process fallback list, missing prediction keys disable the matching
//! providers, and a missing admin passcode locks the admin surface. None of
//! these is an error at startup.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use url::Url;

/// Default name of the remote university collection.
pub const DEFAULT_COLLECTION: &str = "universities";

/// Errors raised while reading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {reason}")]
    InvalidValue { key: &'static str, reason: String },
}

/// Central configuration for all Unicompare components.
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub store: StoreConfig,
    pub prediction: PredictionConfig,
    pub admin: AdminConfig,
    pub server: ServerConfig,
}

/// Remote collection settings.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Base URL of the document service. `None` selects the fallback list only.
    pub remote_url: Option<Url>,
    /// Collection holding university documents
    pub collection: String,
    /// Bearer token sent with every remote request
    pub api_token: Option<String>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            remote_url: None,
            collection: DEFAULT_COLLECTION.to_string(),
            api_token: None,
        }
    }
}

impl StoreConfig {
    pub fn is_remote_configured(&self) -> bool {
        self.remote_url.is_some()
    }
}

/// Prediction provider keys. Each present key enables its provider family.
#[derive(Debug, Clone, Default)]
pub struct PredictionConfig {
    pub groq_api_key: Option<String>,
    pub openai_api_key: Option<String>,
    pub gemini_api_key: Option<String>,
}

impl PredictionConfig {
    pub fn has_any_key(&self) -> bool {
        self.groq_api_key.is_some() || self.openai_api_key.is_some() || self.gemini_api_key.is_some()
    }
}

/// Admin surface settings.
#[derive(Debug, Clone, Default)]
pub struct AdminConfig {
    /// Shared admin passcode; admin operations are locked without it
    pub passcode: Option<String>,
}

/// HTTP server settings.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 3000,
        }
    }
}

impl ServerConfig {
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl AppConfig {
    /// Reads configuration from process environment variables.
    ///
    /// # Errors
    /// - `ConfigError::InvalidValue` - A variable is set but unparsable
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through `lookup`. Empty values count as unset.
    ///
    /// # Errors
    /// - `ConfigError::InvalidValue` - A variable is set but unparsable
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let mut config = Self::default();

        if let Some(raw) = read("UNICOMPARE_STORE_URL") {
            let url = Url::parse(&raw).map_err(|e| ConfigError::InvalidValue {
                key: "UNICOMPARE_STORE_URL",
                reason: e.to_string(),
            })?;
            config.store.remote_url = Some(url);
        }
        if let Some(collection) = read("UNICOMPARE_STORE_COLLECTION") {
            config.store.collection = collection;
        }
        config.store.api_token = read("UNICOMPARE_STORE_TOKEN");

        config.prediction = PredictionConfig {
            groq_api_key: read("GROQ_API_KEY"),
            openai_api_key: read("OPENAI_API_KEY"),
            gemini_api_key: read("GEMINI_API_KEY"),
        };

        config.admin.passcode = read("UNICOMPARE_ADMIN_PASSCODE");

        if let Some(host) = read("UNICOMPARE_HOST") {
            config.server.host = host.parse().map_err(|e: std::net::AddrParseError| {
                ConfigError::InvalidValue {
                    key: "UNICOMPARE_HOST",
                    reason: e.to_string(),
                }
            })?;
        }
        if let Some(port) = read("UNICOMPARE_PORT") {
            config.server.port = port.parse().map_err(|e: std::num::ParseIntError| {
                ConfigError::InvalidValue {
                    key: "UNICOMPARE_PORT",
                    reason: e.to_string(),
                }
            })?;
        }

        Ok(config)
    }
}
