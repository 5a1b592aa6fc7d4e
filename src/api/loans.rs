//! Loan listing and loan details

use crate::error::{Error, Result};
use crate::http::HttpClient;
use crate::models::Loan;
use crate::pagination::{collect_pages, fetch_all_pages, OffsetPlan, PageStream};
use crate::types::JsonValue;
use std::sync::Arc;
use tracing::debug;

use super::records::records;

/// Collection path for loans
pub const LOANS_PATH: &str = "/v1/loans";

/// Loans on the primary market
#[derive(Debug, Clone)]
pub struct LoansApi {
    http: Arc<HttpClient>,
    page_size: u32,
}

impl LoansApi {
    pub(crate) fn new(http: Arc<HttpClient>, page_size: u32) -> Self {
        Self { http, page_size }
    }

    /// Items requested per page
    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    fn plan(&self, limit: Option<u64>) -> OffsetPlan {
        OffsetPlan::new(LOANS_PATH, self.page_size)
            .with_param("sort", "-loanId")
            .with_limit(limit)
    }

    /// Lazily walk the loan listing, newest first
    pub fn pages(&self, limit: Option<u64>) -> PageStream<'_> {
        fetch_all_pages(self.http.as_ref(), self.plan(limit))
    }

    /// Fetch loan listing rows, at most `limit` of them
    pub async fn list(&self, limit: Option<u64>) -> Result<Vec<JsonValue>> {
        let pages = collect_pages(self.pages(limit)).await?;
        let mut rows = records(&pages)?;
        if let Some(limit) = limit {
            rows.truncate(usize::try_from(limit).unwrap_or(usize::MAX));
        }
        debug!(pages = pages.len(), rows = rows.len(), "Fetched loans");
        Ok(rows)
    }

    /// Fetch one loan as undecoded JSON
    pub async fn get_raw(&self, loan_id: &str) -> Result<JsonValue> {
        self.http.get_json(&loan_path(loan_id)?).await
    }

    /// Fetch one loan
    pub async fn get(&self, loan_id: &str) -> Result<Loan> {
        self.http.get_json(&loan_path(loan_id)?).await
    }
}

fn loan_path(loan_id: &str) -> Result<String> {
    if loan_id.is_empty() || loan_id.contains(['/', '?', '#']) {
        return Err(Error::invalid_value(
            "loan_id",
            format!("'{loan_id}' is not a valid loan id"),
        ));
    }
    Ok(format!("{LOANS_PATH}/{loan_id}"))
}
