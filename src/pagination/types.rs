//! Pagination types and traits
//!
//! Defines the plan abstraction the driver pulls requests from.

use crate::error::Result;
use crate::http::{ApiRequest, ApiResponse};

/// What a plan wants to do next
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NextStep {
    /// Send this request
    Request(ApiRequest),
    /// No more pages
    Done,
}

impl NextStep {
    /// Check if this is a done result
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done)
    }

    /// The request to send, if any
    pub fn request(&self) -> Option<&ApiRequest> {
        match self {
            Self::Request(request) => Some(request),
            Self::Done => None,
        }
    }
}

/// A resumable, stateful sequence of requests
///
/// The driver calls `next(None)` once to get the first request, then
/// `next(Some(&response))` with each response it received. After a plan
/// returns [`NextStep::Done`] it keeps returning `Done` and the driver does
/// not call it again.
pub trait PaginationPlan: Send {
    /// Produce the next request given the last response
    fn next(&mut self, last: Option<&ApiResponse>) -> Result<NextStep>;
}

impl<P: PaginationPlan + ?Sized> PaginationPlan for Box<P> {
    fn next(&mut self, last: Option<&ApiResponse>) -> Result<NextStep> {
        (**self).next(last)
    }
}

/// Page boundary bookkeeping for offset pagination
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaginationState {
    /// Items already requested
    pub offset: u64,
    /// Items requested per call
    pub page_size: u64,
    /// Server-reported item count, known after the first response
    pub total: Option<u64>,
    /// Caller-supplied cap on items
    pub limit: Option<u64>,
    /// Responses consumed so far
    pub pages: u64,
    /// Is pagination complete?
    pub done: bool,
}

impl PaginationState {
    /// Create a new pagination state
    pub fn new(page_size: u64) -> Self {
        Self {
            page_size,
            ..Default::default()
        }
    }

    /// Create state with a cap on items
    #[must_use]
    pub fn with_limit(mut self, limit: Option<u64>) -> Self {
        self.limit = limit;
        self
    }

    /// Record a consumed response: offset moves by a full page
    pub fn advance(&mut self) {
        self.offset += self.page_size;
        self.pages += 1;
    }

    /// Whether the current offset is past the total or the limit
    pub fn is_exhausted(&self) -> bool {
        self.total.is_some_and(|total| self.offset >= total)
            || self.limit.is_some_and(|limit| self.offset >= limit)
    }

    /// Mark pagination as complete
    pub fn mark_done(&mut self) {
        self.done = true;
    }
}
