// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # deerberry
//!
//! Async client for the PeerBerry peer-to-peer lending API.
//!
//! ## Features
//!
//! - **Lazy login**: the first request logs in; the credential is reused and
//!   optionally mirrored to a file so later sessions skip the login
//! - **Transparent pagination**: "all pages of X" is one call, or one lazy
//!   stream of pages fetched strictly in order
//! - **Exact decimals**: money and rates decode to `rust_decimal::Decimal`
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use deerberry::{Client, ClientConfig, InvestmentType, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = ClientConfig::new("me@example.com", "secret")
//!         .with_credentials_path("credentials.json");
//!     let client = Client::new(config)?;
//!
//!     let loans = client.loans().list(Some(100)).await?;
//!     let finished = client
//!         .investor()
//!         .investments(InvestmentType::Finished, None)
//!         .await?;
//!     let loan = client.loans().get("1234567").await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────┐
//! │  Client ─ LoansApi / InvestorApi              │
//! └───────────────────────┬───────────────────────┘
//!                         │ OffsetPlan
//! ┌───────────────────────┴───────────────────────┐
//! │  PageDriver: plan.next(last) → send → yield   │
//! └───────────────────────┬───────────────────────┘
//!                         │ Transport
//! ┌───────────────────────┴───────────────────────┐
//! │  HttpClient ─ Authenticator ─ CredentialStore │
//! └───────────────────────────────────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]
#![allow(missing_docs)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Login, credential state and persistence
pub mod auth;

/// HTTP transport
pub mod http;

/// Pagination plans and the page driver
pub mod pagination;

/// Typed response models
pub mod models;

/// Session client and endpoint groups
pub mod api;

/// Client configuration
pub mod config;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use api::{Client, InvestorApi, LoansApi};
pub use config::ClientConfig;
pub use error::{Error, Result};
pub use types::*;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
