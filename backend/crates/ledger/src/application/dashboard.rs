//! Dashboard Use Case

use std::sync::Arc;

use serde::Serialize;

use crate::application::config::LedgerConfig;
use crate::application::parse;
use crate::domain::entities::Transaction;
use crate::domain::repository::LedgerRepository;
use crate::domain::services::recent_for;
use crate::domain::value_objects::Cents;
use crate::error::{LedgerError, LedgerResult};

#[derive(Debug, Clone, Serialize)]
pub struct Balances {
    pub brl: Cents,
    pub usd: Cents,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardOutput {
    pub balances: Balances,
    /// Newest first
    pub recent_transactions: Vec<Transaction>,
}

pub struct DashboardUseCase<R>
where
    R: LedgerRepository,
{
    repo: Arc<R>,
    config: Arc<LedgerConfig>,
}

impl<R> DashboardUseCase<R>
where
    R: LedgerRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<LedgerConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn execute(&self, user_id: &str) -> LedgerResult<DashboardOutput> {
        let user_id = parse::user_id(user_id)?;
        let account = self
            .repo
            .find_account(&user_id)
            .await?
            .ok_or(LedgerError::AccountNotFound)?;

        let transactions = self.repo.list_transactions().await?;

        Ok(DashboardOutput {
            balances: Balances {
                brl: account.brl,
                usd: account.usd,
            },
            recent_transactions: recent_for(
                &account.holder_name,
                &transactions,
                self.config.recent_window,
            ),
        })
    }
}
