//! Crypto Use Cases
//!
//! Market listing, purchase quotes and purchases paid from the BRL balance.

use std::sync::Arc;

use platform::clock::Clock;

use crate::application::config::LedgerConfig;
use crate::application::parse;
use crate::domain::entities::Transaction;
use crate::domain::market::CryptoAsset;
use crate::domain::repository::LedgerRepository;
use crate::domain::services::{CryptoQuote, new_transaction_id};
use crate::domain::value_objects::Cents;
use crate::error::{LedgerError, LedgerResult};

pub struct CryptoQuoteInput {
    pub symbol: String,
    pub amount: Option<f64>,
}

pub struct CryptoPurchaseInput {
    pub user_id: String,
    pub symbol: String,
    pub amount: Option<f64>,
}

pub struct CryptoUseCase<R>
where
    R: LedgerRepository,
{
    repo: Arc<R>,
    config: Arc<LedgerConfig>,
    clock: Arc<dyn Clock>,
}

impl<R> CryptoUseCase<R>
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

    pub fn market(&self) -> Vec<CryptoAsset> {
        self.config.market.assets().to_vec()
    }

    pub fn quote(&self, input: CryptoQuoteInput) -> LedgerResult<CryptoQuote> {
        let amount = parse::amount(input.amount)?;
        let asset = parse::asset(&self.config.market, &input.symbol)?;
        self.priced(asset, amount)
    }

    pub async fn purchase(&self, input: CryptoPurchaseInput) -> LedgerResult<Transaction> {
        let user_id = parse::user_id(&input.user_id)?;
        let account = self
            .repo
            .find_account(&user_id)
            .await?
            .ok_or(LedgerError::AccountNotFound)?;

        let amount = parse::amount(input.amount)?;
        let asset = parse::asset(&self.config.market, &input.symbol)?;
        let quote = self.priced(asset, amount)?;
        if quote.total > account.brl {
            return Err(LedgerError::InsufficientFunds);
        }

        let transaction = Transaction::crypto_purchase(
            new_transaction_id(),
            &quote,
            &account.holder_name,
            self.clock.now(),
        );

        let account = self
            .repo
            .debit_and_record(&user_id, quote.total, &transaction)
            .await?;

        tracing::info!(
            user_id = %user_id,
            transaction_id = %transaction.id,
            symbol = %quote.symbol,
            quantity = %quote.quantity,
            total = %quote.total,
            balance = %account.brl,
            "Crypto purchased"
        );

        Ok(transaction)
    }

    /// Amounts too small to buy a single 1e-8 unit are rejected
    fn priced(&self, asset: &CryptoAsset, amount: Cents) -> LedgerResult<CryptoQuote> {
        let quote = self
            .config
            .fees
            .quote_crypto(asset, amount, self.config.exchange_rate);
        if quote.quantity.is_zero() {
            return Err(LedgerError::InvalidAmount);
        }
        Ok(quote)
    }
}
