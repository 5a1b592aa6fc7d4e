//! Client configuration
//!
//! A `ClientConfig` can be built in code, loaded from a YAML file, or read
//! from `DEERBERRY_*` environment variables.
//!
//! ```yaml
//! email: investor@example.com
//! password: hunter2
//! credentials_path: /var/lib/deerberry/credentials.json
//! page_size: 100
//! expiry_policy: ignore
//! ```

use crate::auth::{AuthConfig, ExpiryPolicy};
use crate::error::{Error, Result, ResultExt};
use crate::http::{HttpClientConfig, DEFAULT_BASE_URL};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default number of items requested per page
pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// Environment variable names read by [`ClientConfig::from_env`]
pub mod env {
    pub const EMAIL: &str = "DEERBERRY_EMAIL";
    pub const PASSWORD: &str = "DEERBERRY_PASSWORD";
    pub const BASE_URL: &str = "DEERBERRY_BASE_URL";
    pub const CREDENTIALS: &str = "DEERBERRY_CREDENTIALS";
    pub const PAGE_SIZE: &str = "DEERBERRY_PAGE_SIZE";
}

/// Everything needed to open a session
#[derive(Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// API origin
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Account email
    pub email: String,

    /// Account password
    pub password: String,

    /// File the credential is mirrored to
    #[serde(default)]
    pub credentials_path: Option<PathBuf>,

    /// Items requested per page
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// What to do with an expired credential
    #[serde(default)]
    pub expiry_policy: ExpiryPolicy,

    /// User agent override
    #[serde(default)]
    pub user_agent: Option<String>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

fn default_timeout_secs() -> u64 {
    30
}

impl ClientConfig {
    /// Create a config with defaults for everything but the account
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            base_url: default_base_url(),
            email: email.into(),
            password: password.into(),
            credentials_path: None,
            page_size: DEFAULT_PAGE_SIZE,
            timeout_secs: default_timeout_secs(),
            expiry_policy: ExpiryPolicy::default(),
            user_agent: None,
        }
    }

    /// Set the API origin
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Mirror credentials to a file
    #[must_use]
    pub fn with_credentials_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.credentials_path = Some(path.into());
        self
    }

    /// Set the page size
    #[must_use]
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    /// Set the expiry policy
    #[must_use]
    pub fn with_expiry_policy(mut self, policy: ExpiryPolicy) -> Self {
        self.expiry_policy = policy;
        self
    }

    /// Parse a YAML document
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a YAML config file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        Self::from_yaml_str(&contents)
    }

    /// Read the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let email = lookup(env::EMAIL).ok_or_else(|| Error::missing_field(env::EMAIL))?;
        let password = lookup(env::PASSWORD).ok_or_else(|| Error::missing_field(env::PASSWORD))?;

        let mut config = Self::new(email, password);

        if let Some(url) = lookup(env::BASE_URL) {
            config.base_url = url;
        }
        if let Some(path) = lookup(env::CREDENTIALS) {
            config.credentials_path = Some(PathBuf::from(path));
        }
        if let Some(size) = lookup(env::PAGE_SIZE) {
            config.page_size = size
                .parse()
                .map_err(|e| Error::invalid_value(env::PAGE_SIZE, format!("{e}")))?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Check the config for values the client cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.email.trim().is_empty() {
            return Err(Error::missing_field("email"));
        }
        if self.password.is_empty() {
            return Err(Error::missing_field("password"));
        }
        if self.page_size == 0 {
            return Err(Error::invalid_value("page_size", "must be > 0"));
        }
        url::Url::parse(&self.base_url)
            .map_err(|e| Error::invalid_value("base_url", e.to_string()))?;
        Ok(())
    }

    /// Request timeout
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Login settings for the authenticator
    pub fn auth_config(&self) -> AuthConfig {
        AuthConfig {
            email: self.email.clone(),
            password: self.password.clone(),
            credentials_path: self.credentials_path.clone(),
            expiry_policy: self.expiry_policy,
        }
    }

    /// Transport settings
    pub fn http_config(&self) -> HttpClientConfig {
        let mut builder = HttpClientConfig::builder()
            .base_url(&self.base_url)
            .timeout(self.timeout());
        if let Some(agent) = &self.user_agent {
            builder = builder.user_agent(agent);
        }
        builder.build()
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new("", "")
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("email", &self.email)
            .field("password", &"***")
            .field("credentials_path", &self.credentials_path)
            .field("page_size", &self.page_size)
            .field("timeout_secs", &self.timeout_secs)
            .field("expiry_policy", &self.expiry_policy)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}
