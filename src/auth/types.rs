//! Auth configuration and credential types

use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// What to do with a credential whose expiry time has passed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpiryPolicy {
    /// Keep using the credential; the expiry is recorded but never checked
    #[default]
    Ignore,
    /// Log in again once the credential has expired
    Relogin,
}

/// Login settings for a session
#[derive(Clone, Default)]
pub struct AuthConfig {
    /// Account email
    pub email: String,
    /// Account password
    pub password: String,
    /// File the credential is mirrored to, if any
    pub credentials_path: Option<PathBuf>,
    /// Expiry handling
    pub expiry_policy: ExpiryPolicy,
}

impl AuthConfig {
    /// Create a config for the given account
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            ..Default::default()
        }
    }

    /// Mirror credentials to a file
    #[must_use]
    pub fn with_credentials_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.credentials_path = Some(path.into());
        self
    }

    /// Set the expiry policy
    #[must_use]
    pub fn with_expiry_policy(mut self, policy: ExpiryPolicy) -> Self {
        self.expiry_policy = policy;
        self
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("email", &self.email)
            .field("password", &"***")
            .field("credentials_path", &self.credentials_path)
            .field("expiry_policy", &self.expiry_policy)
            .finish()
    }
}

/// Bearer token pair obtained from the login endpoint
///
/// Serialized as-is to the credential file.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    /// Token sent as `Authorization: Bearer ...`
    pub access_token: String,
    /// Refresh token returned alongside the access token
    pub refresh_token: String,
    /// Server-computed expiry
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
}

impl Credential {
    /// Create a new credential
    pub fn new(
        access_token: impl Into<String>,
        refresh_token: impl Into<String>,
        expires_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token: refresh_token.into(),
            expires_at,
        }
    }

    /// Build a credential that expires `expires_in` seconds after `issued_at`
    ///
    /// Fails with a validation error when the lifetime does not fit a
    /// timestamp.
    pub fn issued(
        access_token: impl Into<String>,
        refresh_token: impl Into<String>,
        issued_at: DateTime<Utc>,
        expires_in: i64,
    ) -> Result<Self> {
        let expires_at = chrono::Duration::try_seconds(expires_in)
            .and_then(|lifetime| issued_at.checked_add_signed(lifetime))
            .ok_or_else(|| Error::validation("login response: expires_in out of range"))?;
        Ok(Self::new(access_token, refresh_token, Some(expires_at)))
    }

    /// Check if the credential is expired (with 30 second buffer)
    pub fn is_expired(&self) -> bool {
        match self.expires_at {
            Some(expires_at) => {
                let buffer = chrono::Duration::seconds(30);
                Utc::now() + buffer >= expires_at
            }
            None => false,
        }
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("access_token", &"***")
            .field("refresh_token", &"***")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}
