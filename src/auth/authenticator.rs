//! Authenticator implementation
//!
//! Stamps every outgoing request with a bearer token, logging in lazily
//! the first time a token is needed.

use super::store::CredentialStore;
use super::types::{AuthConfig, Credential, ExpiryPolicy};
use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use reqwest::header::DATE;
use reqwest::{Client, RequestBuilder};
use serde::Deserialize;
use serde_json::{json, Value};
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// Path of the login endpoint, relative to the API origin
pub const LOGIN_PATH: &str = "/v1/investor/login";

/// Session-shaped fields the login endpoint expects from a browser
const DECOY_PARAMS: &str = r#"{"pbLastCookie":"https://peerberry.com/","pbFirstCookie":"/"}"#;

fn decoy_cookies() -> Value {
    json!({
        "cookies[JivoSiteLoaded]": "1",
        "cookies[last_click]": "https://peerberry.com/",
        "cookies[pb_first_cookie]": "/",
        "cookies[pb_last_cookie]": "https://peerberry.com/",
    })
}

/// Authenticator handles applying the session credential to HTTP requests
///
/// Starts uninitialized unless a stored credential is found. The first
/// intercepted request triggers the login exchange; every later request
/// reuses the resulting credential.
pub struct Authenticator {
    /// Login settings
    config: AuthConfig,
    /// Absolute login URL
    login_url: String,
    /// Credential once acquired
    credential: RwLock<Option<Credential>>,
    /// Optional on-disk mirror of the credential
    store: Option<CredentialStore>,
    /// HTTP client for the login exchange
    http_client: Client,
    /// Session headers sent with the login exchange
    default_headers: HashMap<String, String>,
}

impl Authenticator {
    /// Create an authenticator against the given API origin
    pub fn new(config: AuthConfig, base_url: &str) -> Result<Self> {
        Self::with_client(config, Client::new(), base_url)
    }

    /// Create an authenticator with a custom HTTP client
    ///
    /// Loads the stored credential if `credentials_path` points at an
    /// existing file.
    pub fn with_client(config: AuthConfig, http_client: Client, base_url: &str) -> Result<Self> {
        let store = config.credentials_path.as_ref().map(CredentialStore::new);
        let credential = match &store {
            Some(store) => store.load()?,
            None => None,
        };

        if let (Some(store), Some(_)) = (&store, &credential) {
            info!(path = %store.path().display(), "Loaded stored credential");
        }

        Ok(Self {
            login_url: format!("{}{LOGIN_PATH}", base_url.trim_end_matches('/')),
            config,
            credential: RwLock::new(credential),
            store,
            http_client,
            default_headers: HashMap::new(),
        })
    }

    /// Send these headers with the login exchange too
    #[must_use]
    pub fn with_default_headers(mut self, headers: HashMap<String, String>) -> Self {
        self.default_headers = headers;
        self
    }

    /// Attach the bearer token to a request, logging in first if needed
    pub async fn intercept(&self, req: RequestBuilder) -> Result<RequestBuilder> {
        let token = self.access_token().await?;
        Ok(req.bearer_auth(token))
    }

    /// Get a usable access token, logging in if necessary
    async fn access_token(&self) -> Result<String> {
        {
            let cached = self.credential.read().await;
            if let Some(credential) = cached.as_ref() {
                if self.is_usable(credential) {
                    return Ok(credential.access_token.clone());
                }
            }
        }

        let mut cached = self.credential.write().await;

        // Another task may have logged in while we waited for the lock
        if let Some(credential) = cached.as_ref() {
            if self.is_usable(credential) {
                return Ok(credential.access_token.clone());
            }
            info!("Stored credential expired, logging in again");
        }

        let credential = self.login().await?;
        let token = credential.access_token.clone();
        *cached = Some(credential.clone());

        if let Some(store) = &self.store {
            store.save(&credential).await?;
            debug!(path = %store.path().display(), "Saved credential");
        }

        Ok(token)
    }

    fn is_usable(&self, credential: &Credential) -> bool {
        match self.config.expiry_policy {
            ExpiryPolicy::Ignore => true,
            ExpiryPolicy::Relogin => !credential.is_expired(),
        }
    }

    /// Perform the login exchange
    async fn login(&self) -> Result<Credential> {
        info!(email = %self.config.email, "Logging in");

        let body = json!({
            "email": self.config.email,
            "password": self.config.password,
            "params": DECOY_PARAMS,
            "parsedCookies": decoy_cookies(),
        });

        let mut req = self.http_client.post(&self.login_url);
        for (key, value) in &self.default_headers {
            req = req.header(key.as_str(), value.as_str());
        }
        let response = req.json(&body).send().await.map_err(Error::Http)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "Login rejected");
            return Err(Error::http_status(status.as_u16(), body));
        }

        let issued_at = response
            .headers()
            .get(DATE)
            .and_then(|v| v.to_str().ok())
            .and_then(parse_http_date)
            .unwrap_or_else(|| {
                debug!("Login response has no usable Date header, using local clock");
                Utc::now()
            });

        let bytes = response.bytes().await.map_err(Error::Http)?;
        let login: LoginResponse = serde_json::from_slice(&bytes)
            .map_err(|e| Error::validation(format!("login response: {e}")))?;

        if login.access_token.is_empty() {
            return Err(Error::auth("Login response carried an empty access token"));
        }

        let credential = Credential::issued(
            login.access_token,
            login.refresh_token,
            issued_at,
            login.expires_in,
        )?;
        debug!(expires_at = ?credential.expires_at, "Login succeeded");
        Ok(credential)
    }

    /// Snapshot of the current credential
    pub async fn credential(&self) -> Option<Credential> {
        self.credential.read().await.clone()
    }

    /// Whether a credential is held
    pub async fn is_authenticated(&self) -> bool {
        self.credential.read().await.is_some()
    }

    /// Drop the in-memory credential so the next request logs in again
    pub async fn clear(&self) {
        let mut cached = self.credential.write().await;
        *cached = None;
    }

    /// End the session: drop the credential and delete the stored copy
    pub async fn logout(&self) -> Result<()> {
        self.clear().await;
        if let Some(store) = &self.store {
            store.remove().await?;
            info!(path = %store.path().display(), "Removed stored credential");
        }
        Ok(())
    }

    /// Get the auth config
    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    /// Absolute URL of the login endpoint
    pub fn login_url(&self) -> &str {
        &self.login_url
    }
}

impl std::fmt::Debug for Authenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Authenticator")
            .field("config", &self.config)
            .field("login_url", &self.login_url)
            .field("store", &self.store)
            .field("default_headers", &self.default_headers.keys())
            .finish_non_exhaustive()
    }
}

/// Login endpoint response
#[derive(Debug, Deserialize)]
struct LoginResponse {
    access_token: String,
    refresh_token: String,
    expires_in: i64,
}

/// Parse an RFC 7231 `Date` header value
fn parse_http_date(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc2822(value)
        .ok()
        .map(|d| d.with_timezone(&Utc))
}
