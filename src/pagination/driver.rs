//! Page driver
//!
//! Turns a [`PaginationPlan`] into a lazy stream of responses. Pages are
//! fetched one at a time: the next request is only built after the
//! consumer has taken the previous response and polled again.

use super::types::{NextStep, PaginationPlan};
use crate::error::Result;
use crate::http::{ApiResponse, Transport};
use futures::stream::{self, BoxStream, StreamExt};
use tracing::debug;

/// Stream of page responses
pub type PageStream<'a> = BoxStream<'a, Result<ApiResponse>>;

enum DriverState<P> {
    Running {
        plan: P,
        last: Option<ApiResponse>,
        page: u64,
    },
    Halted,
}

/// Drives pagination plans over a transport
pub struct PageDriver<'a, T: Transport + ?Sized> {
    transport: &'a T,
}

impl<'a, T: Transport + ?Sized> PageDriver<'a, T> {
    /// Create a driver sending through `transport`
    pub fn new(transport: &'a T) -> Self {
        Self { transport }
    }

    /// Lazily fetch every page the plan asks for
    ///
    /// Transport and plan errors are yielded once, then the stream ends.
    /// Non-success statuses are yielded as ordinary responses; the consumer
    /// decides whether to stop. Dropping the stream stops pagination.
    pub fn fetch_all_pages<P>(&self, plan: P) -> PageStream<'a>
    where
        P: PaginationPlan + 'a,
    {
        let transport = self.transport;
        let initial = DriverState::Running {
            plan,
            last: None,
            page: 0,
        };

        stream::unfold(initial, move |state| async move {
            let DriverState::Running {
                mut plan,
                last,
                page,
            } = state
            else {
                return None;
            };

            let request = match plan.next(last.as_ref()) {
                Ok(NextStep::Request(request)) => request,
                Ok(NextStep::Done) => {
                    debug!(pages = page, "Pagination complete");
                    return None;
                }
                Err(e) => return Some((Err(e), DriverState::Halted)),
            };
            drop(last);

            debug!(page, path = %request.path, query = ?request.query, "Fetching page");
            match transport.send(&request).await {
                Ok(response) => {
                    let next = DriverState::Running {
                        plan,
                        last: Some(response.clone()),
                        page: page + 1,
                    };
                    Some((Ok(response), next))
                }
                Err(e) => Some((Err(e), DriverState::Halted)),
            }
        })
        .boxed()
    }
}

/// Fetch every page of `plan` through `transport`
pub fn fetch_all_pages<'a, T, P>(transport: &'a T, plan: P) -> PageStream<'a>
where
    T: Transport + ?Sized,
    P: PaginationPlan + 'a,
{
    PageDriver::new(transport).fetch_all_pages(plan)
}

/// Consume a page stream, failing on the first error or non-success status
///
/// Stops pulling pages as soon as one fails.
pub async fn collect_pages(mut pages: PageStream<'_>) -> Result<Vec<ApiResponse>> {
    let mut collected = Vec::new();
    while let Some(page) = pages.next().await {
        collected.push(page?.error_for_status()?);
    }
    Ok(collected)
}
