//! HTTP client module
//!
//! Provides the `Transport` trait the pagination engine sends through and
//! the reqwest-backed `HttpClient` that implements it.
//!
//! # Features
//!
//! - **Relative paths**: requests name a path, the client owns the origin
//! - **Authentication**: every request passes through the `Authenticator`
//! - **Buffered responses**: bodies are read in full before being returned

mod client;
mod types;

pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder, Transport, DEFAULT_BASE_URL};
pub use types::{ApiRequest, ApiResponse};
