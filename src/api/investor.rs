//! Investor portfolio

use crate::error::Result;
use crate::http::HttpClient;
use crate::pagination::{collect_pages, fetch_all_pages, OffsetPlan, PageStream};
use crate::types::{InvestmentType, JsonValue};
use std::sync::Arc;
use tracing::debug;

use super::records::{flatten_records, records};

/// Collection path for the investor's investments
pub const INVESTMENTS_PATH: &str = "/v1/investor/investments";

/// The logged-in investor's investments
#[derive(Debug, Clone)]
pub struct InvestorApi {
    http: Arc<HttpClient>,
    page_size: u32,
}

impl InvestorApi {
    pub(crate) fn new(http: Arc<HttpClient>, page_size: u32) -> Self {
        Self { http, page_size }
    }

    /// Items requested per page
    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    fn plan(&self, kind: InvestmentType, limit: Option<u64>) -> OffsetPlan {
        OffsetPlan::new(INVESTMENTS_PATH, self.page_size)
            .with_param("type", kind)
            .with_param("sort", "loanId")
            .with_limit(limit)
    }

    /// Lazily walk investments of one kind
    pub fn pages(&self, kind: InvestmentType, limit: Option<u64>) -> PageStream<'_> {
        fetch_all_pages(self.http.as_ref(), self.plan(kind, limit))
    }

    /// Fetch investments as flat rows with dotted keys
    pub async fn investments(
        &self,
        kind: InvestmentType,
        limit: Option<u64>,
    ) -> Result<Vec<JsonValue>> {
        let pages = collect_pages(self.pages(kind, limit)).await?;
        let mut rows = flatten_records(records(&pages)?)?;
        if let Some(limit) = limit {
            rows.truncate(usize::try_from(limit).unwrap_or(usize::MAX));
        }
        debug!(%kind, pages = pages.len(), rows = rows.len(), "Fetched investments");
        Ok(rows)
    }

    /// All current investments
    pub async fn investments_current(&self) -> Result<Vec<JsonValue>> {
        self.investments(InvestmentType::Current, None).await
    }

    /// All finished investments
    pub async fn investments_finished(&self) -> Result<Vec<JsonValue>> {
        self.investments(InvestmentType::Finished, None).await
    }
}
