//! Admin Reports
//!
//! Ledger-wide statistics and the CSV export.

use std::sync::Arc;

use platform::clock::Clock;
use serde::Serialize;

use crate::domain::repository::LedgerRepository;
use crate::domain::services::{Statistics, render_csv, statistics};
use crate::error::LedgerResult;

/// Downloadable report
#[derive(Debug, Clone, Serialize)]
pub struct ReportExport {
    pub mime: &'static str,
    pub filename: String,
    pub content: String,
}

pub struct ReportsUseCase<R>
where
    R: LedgerRepository,
{
    repo: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> ReportsUseCase<R>
where
    R: LedgerRepository,
{
    pub fn new(repo: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { repo, clock }
    }

    pub async fn statistics(&self) -> LedgerResult<Statistics> {
        let transactions = self.repo.list_transactions().await?;
        Ok(statistics(&transactions))
    }

    pub async fn export(&self) -> LedgerResult<ReportExport> {
        let transactions = self.repo.list_transactions().await?;

        tracing::info!(rows = transactions.len(), "Exporting transaction report");

        Ok(ReportExport {
            mime: "text/csv",
            filename: format!("inwista-report-{}.csv", self.clock.now().timestamp_millis()),
            content: render_csv(&transactions),
        })
    }
}
