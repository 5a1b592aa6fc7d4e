//! Plan implementations

use super::types::{NextStep, PaginationPlan, PaginationState};
use crate::error::{Error, Result};
use crate::http::{ApiRequest, ApiResponse};
use crate::types::QueryParams;
use serde_json::Value;

// ============================================================================
// Offset Plan
// ============================================================================

/// Offset-based pagination driven by a `total` count in the body
///
/// Requests `?pageSize=N&offset=K`, advancing `K` by `N` after every
/// response. Stops once `offset >= total`, or `offset >= limit` when a
/// limit is set.
#[derive(Debug, Clone)]
pub struct OffsetPlan {
    /// Endpoint path
    path: String,
    /// Fixed query parameters sent on every page
    params: QueryParams,
    /// Query parameter name for the offset
    offset_param: String,
    /// Query parameter name for the page size
    page_size_param: String,
    /// Body field holding the total item count
    total_field: String,
    /// Boundary state
    state: PaginationState,
    /// Whether the first request has been produced
    started: bool,
}

impl OffsetPlan {
    /// Create a plan for `path` with the given page size
    pub fn new(path: impl Into<String>, page_size: u32) -> Self {
        Self {
            path: path.into(),
            params: Vec::new(),
            offset_param: "offset".to_string(),
            page_size_param: "pageSize".to_string(),
            total_field: "total".to_string(),
            state: PaginationState::new(u64::from(page_size)),
            started: false,
        }
    }

    /// Add a fixed query parameter
    #[must_use]
    pub fn with_param(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.params.push((key.into(), value.to_string()));
        self
    }

    /// Stop after `limit` items have been requested
    #[must_use]
    pub fn with_limit(mut self, limit: Option<u64>) -> Self {
        self.state.limit = limit;
        self
    }

    /// Read the total from a different body field
    #[must_use]
    pub fn with_total_field(mut self, field: impl Into<String>) -> Self {
        self.total_field = field.into();
        self
    }

    /// Use different names for the offset and page size parameters
    #[must_use]
    pub fn with_param_names(
        mut self,
        offset_param: impl Into<String>,
        page_size_param: impl Into<String>,
    ) -> Self {
        self.offset_param = offset_param.into();
        self.page_size_param = page_size_param.into();
        self
    }

    /// Current boundary state
    pub fn state(&self) -> &PaginationState {
        &self.state
    }

    fn request_at(&self, offset: u64) -> ApiRequest {
        let mut request = ApiRequest::get(&self.path);
        for (key, value) in &self.params {
            request = request.query(key.as_str(), value);
        }
        request
            .query(self.page_size_param.as_str(), self.state.page_size)
            .query(self.offset_param.as_str(), offset)
    }

    fn extract_total(&self, response: &ApiResponse) -> Result<u64> {
        let body: Value = response.json()?;
        body.get(&self.total_field)
            .and_then(Value::as_u64)
            .ok_or_else(|| {
                Error::validation(format!(
                    "Response from {} has no non-negative integer '{}' field",
                    self.path, self.total_field
                ))
            })
    }
}

impl PaginationPlan for OffsetPlan {
    fn next(&mut self, last: Option<&ApiResponse>) -> Result<NextStep> {
        if self.state.done {
            return Ok(NextStep::Done);
        }

        let Some(response) = last else {
            if self.started {
                return Err(Error::Other(format!(
                    "Plan for {} resumed without a response",
                    self.path
                )));
            }
            if self.state.page_size == 0 {
                return Err(Error::invalid_value(&self.page_size_param, "must be > 0"));
            }
            self.started = true;
            if self.state.is_exhausted() {
                self.state.mark_done();
                return Ok(NextStep::Done);
            }
            return Ok(NextStep::Request(self.request_at(self.state.offset)));
        };

        self.state.total = Some(self.extract_total(response)?);
        self.state.advance();

        if self.state.is_exhausted() {
            self.state.mark_done();
            return Ok(NextStep::Done);
        }

        Ok(NextStep::Request(self.request_at(self.state.offset)))
    }
}
