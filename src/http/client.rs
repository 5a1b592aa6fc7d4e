//! HTTP client and the transport seam
//!
//! `HttpClient` builds absolute URLs from relative request paths, applies
//! the authenticator and reads every response to completion. It performs
//! no retries and no rate limiting.

use super::types::{ApiRequest, ApiResponse};
use crate::auth::{AuthConfig, Authenticator};
use crate::error::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;

/// Default API origin
pub const DEFAULT_BASE_URL: &str = "https://api.peerberry.com";

/// Anything that can send an [`ApiRequest`] and return the full response
///
/// Non-success statuses are returned as responses, not errors.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send a request and read the whole body
    async fn send(&self, request: &ApiRequest) -> Result<ApiResponse>;
}

/// Configuration for the HTTP client
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Base URL for all requests
    pub base_url: String,
    /// Request timeout
    pub timeout: Duration,
    /// Default headers for all requests
    pub default_headers: HashMap<String, String>,
    /// User agent string
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
            default_headers: HashMap::new(),
            user_agent: format!("deerberry/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl HttpClientConfig {
    /// Create a new config builder
    pub fn builder() -> HttpClientConfigBuilder {
        HttpClientConfigBuilder::default()
    }
}

/// Builder for HTTP client config
#[derive(Default)]
pub struct HttpClientConfigBuilder {
    config: HttpClientConfig,
}

impl HttpClientConfigBuilder {
    /// Set the base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into();
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Add a default header
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.default_headers.insert(key.into(), value.into());
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Build the config
    pub fn build(self) -> HttpClientConfig {
        self.config
    }
}

/// HTTP client bound to one API origin and, optionally, one session
pub struct HttpClient {
    client: Client,
    config: HttpClientConfig,
    authenticator: Option<Authenticator>,
}

impl HttpClient {
    /// Create a new HTTP client with custom configuration
    pub fn with_config(config: HttpClientConfig) -> Result<Self> {
        url::Url::parse(&config.base_url)?;

        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()?;

        Ok(Self {
            client,
            config,
            authenticator: None,
        })
    }

    /// Create a client with authentication
    pub fn with_auth(config: HttpClientConfig, auth_config: AuthConfig) -> Result<Self> {
        let mut client = Self::with_config(config)?;
        client.set_authenticator(auth_config)?;
        Ok(client)
    }

    /// Set the authenticator
    pub fn set_authenticator(&mut self, auth_config: AuthConfig) -> Result<()> {
        let authenticator =
            Authenticator::with_client(auth_config, self.client.clone(), &self.config.base_url)?
                .with_default_headers(self.config.default_headers.clone());
        self.authenticator = Some(authenticator);
        Ok(())
    }

    /// Get the authenticator, if any
    pub fn authenticator(&self) -> Option<&Authenticator> {
        self.authenticator.as_ref()
    }

    /// Get the client configuration
    pub fn config(&self) -> &HttpClientConfig {
        &self.config
    }

    /// Make a GET request to a relative path
    pub async fn get(&self, path: &str) -> Result<ApiResponse> {
        self.send(&ApiRequest::get(path)).await
    }

    /// GET a relative path, fail on non-success, decode the JSON body
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.get(path).await?.error_for_status()?.json()
    }

    /// Build full URL from path
    fn build_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }

        let base = self.config.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{base}/{path}")
    }
}

#[async_trait]
impl Transport for HttpClient {
    async fn send(&self, request: &ApiRequest) -> Result<ApiResponse> {
        let full_url = self.build_url(&request.path);

        let mut req = self.client.request(request.method.clone(), &full_url);

        for (key, value) in &self.config.default_headers {
            req = req.header(key.as_str(), value.as_str());
        }

        for (key, value) in &request.headers {
            req = req.header(key.as_str(), value.as_str());
        }

        if !request.query.is_empty() {
            req = req.query(&request.query);
        }

        if let Some(ref auth) = self.authenticator {
            req = auth.intercept(req).await?;
        }

        debug!(method = %request.method, url = %full_url, query = ?request.query, "Sending request");
        let response = ApiResponse::read(req.send().await?).await?;
        debug!(
            status = response.status().as_u16(),
            bytes = response.body().len(),
            "Received response"
        );

        Ok(response)
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("config", &self.config)
            .field("has_authenticator", &self.authenticator.is_some())
            .finish_non_exhaustive()
    }
}
