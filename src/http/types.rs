//! Request and response units exchanged with the transport

use crate::error::{Error, Result};
use crate::types::QueryParams;
use bytes::Bytes;
use reqwest::header::HeaderMap;
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;

/// Description of a request relative to the API origin
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    /// HTTP method
    pub method: Method,
    /// Path relative to the base URL (e.g. `/v1/loans`)
    pub path: String,
    /// Query parameters, in order
    pub query: QueryParams,
    /// Extra request headers
    pub headers: Vec<(String, String)>,
}

impl ApiRequest {
    /// Create a request with the given method and path
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            headers: Vec::new(),
        }
    }

    /// Create a GET request
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    /// Add a query parameter
    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    /// Add a header
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((key.into(), value.into()));
        self
    }

    /// Look up a query parameter
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// A fully read HTTP response
///
/// The body is held in memory; cloning is cheap.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: Bytes,
}

impl ApiResponse {
    /// Create a response from its parts
    pub fn new(status: StatusCode, headers: HeaderMap, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            headers,
            body: body.into(),
        }
    }

    /// Read a reqwest response to completion
    pub async fn read(response: reqwest::Response) -> Result<Self> {
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await.map_err(Error::Http)?;
        Ok(Self::new(status, headers, body))
    }

    /// HTTP status
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Response headers
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Raw body bytes
    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// Body as text (lossy)
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Whether the status is 2xx
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Decode the JSON body
    ///
    /// Decimal fields decode exactly; numbers are never routed through `f64`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_slice(&self.body).map_err(|e| Error::Validation {
            message: format!("Failed to decode response body: {e}"),
        })
    }

    /// Turn a non-success status into `Error::HttpStatus`
    pub fn error_for_status(self) -> Result<Self> {
        if self.status.is_success() {
            Ok(self)
        } else {
            Err(Error::http_status(self.status.as_u16(), self.text()))
        }
    }
}
