//! Execute Transfer Use Case
//!
//! Debits the sender's BRL balance and records a completed transaction.

use std::sync::Arc;

use platform::clock::Clock;

use crate::application::config::LedgerConfig;
use crate::application::parse;
use crate::domain::entities::Transaction;
use crate::domain::repository::LedgerRepository;
use crate::domain::services::new_transaction_id;
use crate::error::{LedgerError, LedgerResult};

pub struct ExecuteTransferInput {
    pub user_id: String,
    pub kind: String,
    pub amount: Option<f64>,
    pub recipient: Option<String>,
}

pub struct ExecuteTransferUseCase<R>
where
    R: LedgerRepository,
{
    repo: Arc<R>,
    config: Arc<LedgerConfig>,
    clock: Arc<dyn Clock>,
}

impl<R> ExecuteTransferUseCase<R>
where
    R: LedgerRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<LedgerConfig>, clock: Arc<dyn Clock>) -> Self {
        Self {
            repo,
            config,
            clock,
        }
    }

    pub async fn execute(&self, input: ExecuteTransferInput) -> LedgerResult<Transaction> {
        let user_id = parse::user_id(&input.user_id)?;
        let account = self
            .repo
            .find_account(&user_id)
            .await?
            .ok_or(LedgerError::AccountNotFound)?;

        let amount = parse::amount(input.amount)?;
        if input.kind.trim().is_empty() {
            return Err(LedgerError::MissingFields);
        }
        let kind = parse::transfer_kind(&input.kind)?;

        let quote = self.config.fees.quote(kind, amount);
        if quote.total > account.brl {
            return Err(LedgerError::InsufficientFunds);
        }

        let recipient = input
            .recipient
            .map(|r| r.trim().to_string())
            .filter(|r| !r.is_empty())
            .unwrap_or_else(|| self.config.unnamed_recipient.clone());

        let transaction = Transaction::transfer(
            new_transaction_id(),
            &quote,
            &account.holder_name,
            &recipient,
            self.clock.now(),
        );

        // Balance re-checked atomically by the store
        let account = self
            .repo
            .debit_and_record(&user_id, quote.total, &transaction)
            .await?;

        tracing::info!(
            user_id = %user_id,
            transaction_id = %transaction.id,
            kind = %kind,
            total = %quote.total,
            balance = %account.brl,
            "Transfer executed"
        );

        Ok(transaction)
    }
}
