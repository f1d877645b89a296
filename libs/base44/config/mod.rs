use crate::client::auth::{default_token_sources, get_access_token, AccessToken};
use crate::client::helpers::validate_app_id;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;
use tracing::info;

/// Default Base44 server
pub const DEFAULT_SERVER_URL: &str = "https://base44.app";

/// Default per-request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Env var overriding the application id from the YAML file
pub const APP_ID_ENV: &str = "BASE44_APP_ID";

/// Env var overriding the server URL from the YAML file
pub const SERVER_URL_ENV: &str = "BASE44_SERVER_URL";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load config file: {0}")]
    FileError(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Parse a server URL, requiring an http(s) scheme and a host
pub fn parse_server_url(server_url: &str) -> std::result::Result<Url, String> {
    let url = Url::parse(server_url)
        .map_err(|e| format!("invalid server url '{}': {}", server_url, e))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(format!(
            "server url must start with http:// or https://, got '{}'",
            server_url
        ));
    }
    if url.host_str().map_or(true, str::is_empty) {
        return Err(format!("server url '{}' has no host", server_url));
    }
    if url.query().is_some() || url.fragment().is_some() {
        return Err(format!(
            "server url '{}' cannot carry a query or fragment",
            server_url
        ));
    }

    Ok(url)
}

/// Immutable configuration a client handle is built from.
///
/// `application_id` and `requires_auth` identify the app and its auth policy.
/// The remaining fields only tune the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfiguration {
    application_id: String,
    requires_auth: bool,
    server_url: String,
    timeout: Duration,
    access_token: Option<AccessToken>,
}

impl ClientConfiguration {
    pub fn new(application_id: impl Into<String>, requires_auth: bool) -> Self {
        Self {
            application_id: application_id.into(),
            requires_auth,
            server_url: DEFAULT_SERVER_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            access_token: None,
        }
    }

    pub fn with_server_url(mut self, server_url: impl Into<String>) -> Self {
        self.server_url = server_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_access_token(mut self, token: impl Into<Option<AccessToken>>) -> Self {
        self.access_token = token.into();
        self
    }

    pub fn application_id(&self) -> &str {
        &self.application_id
    }

    pub fn requires_auth(&self) -> bool {
        self.requires_auth
    }

    pub fn server_url(&self) -> &str {
        &self.server_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn access_token(&self) -> Option<&AccessToken> {
        self.access_token.as_ref()
    }
}

/// Service configuration file (`config/beam.yaml`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Application identifier issued by Base44
    pub app_id: String,
    /// Refuse every operation that has no access token
    #[serde(default = "default_requires_auth")]
    pub requires_auth: bool,
    #[serde(default = "default_server_url")]
    pub server_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Access token from env or token file (not in YAML)
    #[serde(skip)]
    pub access_token: Option<AccessToken>,
    /// Set when `app_id` came from `BASE44_APP_ID`
    #[serde(skip)]
    pub app_id_overridden: bool,
}

fn default_requires_auth() -> bool {
    true
}

fn default_server_url() -> String {
    DEFAULT_SERVER_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_log_level() -> String {
    "info".to_string()
}

impl ServiceConfig {
    /// Load configuration from YAML file, .env and the process environment
    pub fn load(config_path: impl AsRef<Path>) -> Result<Self> {
        let yaml_content = std::fs::read_to_string(config_path)?;
        let mut config = Self::from_yaml(&yaml_content)?;

        dotenv::dotenv().ok(); // Don't fail if .env doesn't exist

        config.apply_overrides(|key| std::env::var(key).ok());
        config.access_token = get_access_token(&default_token_sources());

        config.validate()?;
        Ok(config)
    }

    /// Parse YAML without touching the environment
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Apply `BASE44_APP_ID` / `BASE44_SERVER_URL` overrides from `lookup`
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(app_id) = lookup(APP_ID_ENV).filter(|v| !v.trim().is_empty()) {
            info!("Overriding app id from environment variable");
            self.app_id = app_id;
            self.app_id_overridden = true;
        }

        if let Some(server_url) = lookup(SERVER_URL_ENV).filter(|v| !v.trim().is_empty()) {
            info!("Overriding server URL from environment variable");
            self.server_url = server_url;
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.app_id.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "app_id cannot be empty".to_string(),
            ));
        }

        if validate_app_id(&self.app_id).is_err() {
            return Err(ConfigError::ValidationError(format!(
                "app_id may only contain letters, digits, '-' and '_', got '{}'",
                self.app_id
            )));
        }

        parse_server_url(&self.server_url).map_err(ConfigError::ValidationError)?;

        if self.timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "timeout_secs must be greater than 0".to_string(),
            ));
        }

        let valid_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_levels.contains(&self.log_level.to_lowercase().as_str()) {
            return Err(ConfigError::ValidationError(format!(
                "log_level must be one of: {}",
                valid_levels.join(", ")
            )));
        }

        Ok(())
    }

    /// Build the immutable client configuration
    pub fn client_configuration(&self) -> ClientConfiguration {
        ClientConfiguration::new(self.app_id.clone(), self.requires_auth)
            .with_server_url(self.server_url.clone())
            .with_timeout(Duration::from_secs(self.timeout_secs))
            .with_access_token(self.access_token.clone())
    }

    /// Log configuration summary
    pub fn log(&self) {
        info!("Configuration loaded:");
        info!("  App id: {}", self.app_id);
        info!("  Requires auth: {}", self.requires_auth);
        info!("  Server URL: {}", self.server_url);
        info!("  Timeout: {} seconds", self.timeout_secs);
        info!("  Log level: {}", self.log_level);
        info!(
            "  Access token: {}",
            if self.access_token.is_some() { "present" } else { "absent" }
        );
    }
}
