//! Simulate Transfer Use Case
//!
//! Quotes a transfer and issues a receipt without touching balances.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use platform::clock::Clock;
use serde::Serialize;

use crate::application::config::LedgerConfig;
use crate::application::parse;
use crate::domain::repository::LedgerRepository;
use crate::domain::services::new_protocol;
use crate::domain::value_objects::{Cents, Currency, TransferKind};
use crate::error::{LedgerError, LedgerResult};

pub struct SimulateTransferInput {
    pub user_id: String,
    pub kind: String,
    pub amount: Option<f64>,
    pub currency: Option<String>,
    pub recipient: Option<String>,
}

/// Receipt shown to the user before confirming
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationReceipt {
    /// `SIM-<millis>-<n>`
    pub protocol: String,
    pub timestamp: DateTime<Utc>,
    pub kind: TransferKind,
    pub currency: Currency,
    pub recipient: String,
    pub amount: Cents,
    pub fee: Cents,
    pub total: Cents,
}

#[derive(Debug, Clone, Serialize)]
pub struct SimulateTransferOutput {
    pub approved: bool,
    pub fee: Cents,
    pub total: Cents,
    pub receipt: SimulationReceipt,
}

pub struct SimulateTransferUseCase<R>
where
    R: LedgerRepository,
{
    repo: Arc<R>,
    config: Arc<LedgerConfig>,
    clock: Arc<dyn Clock>,
}

impl<R> SimulateTransferUseCase<R>
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

    pub async fn execute(&self, input: SimulateTransferInput) -> LedgerResult<SimulateTransferOutput> {
        if input.user_id.trim().is_empty() || input.kind.trim().is_empty() || input.amount.is_none() {
            return Err(LedgerError::MissingFields);
        }

        let kind = parse::transfer_kind(&input.kind)?;
        let currency = parse::currency(input.currency.as_deref())?;
        let user_id = parse::user_id(&input.user_id)?;

        let account = self
            .repo
            .find_account(&user_id)
            .await?
            .ok_or(LedgerError::AccountNotFound)?;

        let amount = parse::amount(input.amount)?;
        // The bare amount is checked here; execution checks amount plus fee
        if amount > account.balance(currency) {
            return Err(LedgerError::InsufficientFunds);
        }

        let quote = self.config.fees.quote(kind, amount);
        let now = self.clock.now();
        let recipient = input
            .recipient
            .map(|r| r.trim().to_string())
            .filter(|r| !r.is_empty())
            .unwrap_or_else(|| self.config.unnamed_recipient.clone());

        let receipt = SimulationReceipt {
            protocol: new_protocol(now),
            timestamp: now,
            kind,
            currency,
            recipient,
            amount: quote.amount,
            fee: quote.fee,
            total: quote.total,
        };

        tracing::info!(
            user_id = %user_id,
            protocol = %receipt.protocol,
            kind = %kind,
            amount = %quote.amount,
            "Transfer simulated"
        );

        Ok(SimulateTransferOutput {
            approved: true,
            fee: quote.fee,
            total: quote.total,
            receipt,
        })
    }
}
