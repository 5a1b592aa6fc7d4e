//! Pagination module
//!
//! # Overview
//!
//! A paginated fetch is split in two halves:
//! - a `PaginationPlan` that knows which request comes next given the last
//!   response (`OffsetPlan` covers the `total`/`offset` endpoints)
//! - the `PageDriver` that sends each request through a `Transport` and
//!   yields responses as a lazy stream, strictly one page at a time

mod driver;
mod plans;
mod types;

pub use driver::{collect_pages, fetch_all_pages, PageDriver, PageStream};
pub use plans::OffsetPlan;
pub use types::{NextStep, PaginationPlan, PaginationState};
