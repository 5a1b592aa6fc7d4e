//! Session client and its endpoint groups
//!
//! A [`Client`] owns one authenticated [`HttpClient`] and hands out the
//! endpoint groups built on top of it:
//!
//! ```rust,ignore
//! use deerberry::{Client, ClientConfig, InvestmentType};
//!
//! let client = Client::new(ClientConfig::new("me@example.com", "secret"))?;
//! let loans = client.loans().list(Some(50)).await?;
//! let current = client.investor().investments(InvestmentType::Current, None).await?;
//! ```

mod investor;
mod loans;
mod records;

pub use investor::{InvestorApi, INVESTMENTS_PATH};
pub use loans::{LoansApi, LOANS_PATH};
pub use records::{flatten_record, flatten_records, records};

use crate::auth::Authenticator;
use crate::config::ClientConfig;
use crate::error::Result;
use crate::http::HttpClient;
use std::sync::Arc;

/// One logged-in session
///
/// Cheap to share by reference across tasks; all endpoint groups use the
/// same credential.
#[derive(Debug)]
pub struct Client {
    config: ClientConfig,
    http: Arc<HttpClient>,
    loans: LoansApi,
    investor: InvestorApi,
}

impl Client {
    /// Validate the config and build the session
    ///
    /// Loads a stored credential if one exists; otherwise the first request
    /// logs in.
    pub fn new(config: ClientConfig) -> Result<Self> {
        config.validate()?;

        let http = Arc::new(HttpClient::with_auth(
            config.http_config(),
            config.auth_config(),
        )?);

        Ok(Self {
            loans: LoansApi::new(Arc::clone(&http), config.page_size),
            investor: InvestorApi::new(Arc::clone(&http), config.page_size),
            http,
            config,
        })
    }

    /// Loan endpoints
    pub fn loans(&self) -> &LoansApi {
        &self.loans
    }

    /// Investor endpoints
    pub fn investor(&self) -> &InvestorApi {
        &self.investor
    }

    /// The underlying transport
    pub fn http(&self) -> &HttpClient {
        &self.http
    }

    /// The session's authenticator
    pub fn authenticator(&self) -> Option<&Authenticator> {
        self.http.authenticator()
    }

    /// Drop the session credential and delete its stored copy
    pub async fn logout(&self) -> Result<()> {
        match self.authenticator() {
            Some(auth) => auth.logout().await,
            None => Ok(()),
        }
    }

    /// The config this session was built from
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }
}
