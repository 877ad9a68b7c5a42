//! Domain Entities
//!
//! Accounts hold balances; transactions are append-only ledger entries.

use chrono::{DateTime, Utc};
use kernel::id::UserId;
use serde::Serialize;

use crate::domain::services::{CryptoQuote, TransferQuote};
use crate::domain::value_objects::{Cents, Currency, TransactionKind, TransactionStatus};

/// Balances of one account holder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub user_id: UserId,
    /// Matched against the `from`/`to` names of transactions
    pub holder_name: String,
    pub brl: Cents,
    pub usd: Cents,
}

impl Account {
    /// Fresh account with zero balances
    pub fn open(user_id: UserId, holder_name: impl Into<String>) -> Self {
        Self {
            user_id,
            holder_name: holder_name.into(),
            brl: Cents::ZERO,
            usd: Cents::ZERO,
        }
    }

    pub fn with_balances(mut self, brl: Cents, usd: Cents) -> Self {
        self.brl = brl;
        self.usd = usd;
        self
    }

    pub fn balance(&self, currency: Currency) -> Cents {
        match currency {
            Currency::Brl => self.brl,
            Currency::Usd => self.usd,
        }
    }

    /// Take `total` out of the BRL balance; `None` if it does not cover it
    pub fn debit_brl(&mut self, total: Cents) -> Option<Cents> {
        if total > self.brl {
            return None;
        }
        self.brl = self.brl.checked_sub(total)?;
        Some(self.brl)
    }
}

/// Crypto side of a purchase
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CryptoLeg {
    pub symbol: String,
    /// Decimal quantity, e.g. `"0.0088"`
    pub quantity: String,
}

/// Ledger entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// `txn-` followed by 8 hex digits
    pub id: String,
    pub kind: TransactionKind,
    pub amount: Cents,
    pub fee: Cents,
    pub total: Cents,
    pub currency: Currency,
    pub status: TransactionStatus,
    pub created_at: DateTime<Utc>,
    pub from: Option<String>,
    pub to: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crypto: Option<CryptoLeg>,
}

impl Transaction {
    /// Completed outgoing transfer
    pub fn transfer(id: String, quote: &TransferQuote, from: &str, to: &str, now: DateTime<Utc>) -> Self {
        Self {
            id,
            kind: TransactionKind::Transfer(quote.kind),
            amount: quote.amount,
            fee: quote.fee,
            total: quote.total,
            currency: Currency::Brl,
            status: TransactionStatus::Completed,
            created_at: now,
            from: Some(from.to_string()),
            to: Some(to.to_string()),
            crypto: None,
        }
    }

    /// Completed crypto purchase paid from the holder's BRL balance
    pub fn crypto_purchase(id: String, quote: &CryptoQuote, holder: &str, now: DateTime<Utc>) -> Self {
        Self {
            id,
            kind: TransactionKind::CryptoPurchase,
            amount: quote.amount,
            fee: quote.fee,
            total: quote.total,
            currency: Currency::Brl,
            status: TransactionStatus::Completed,
            created_at: now,
            from: Some(holder.to_string()),
            to: None,
            crypto: Some(CryptoLeg {
                symbol: quote.symbol.clone(),
                quantity: quote.quantity.to_string(),
            }),
        }
    }

    /// Whether the holder sent or received it
    pub fn involves(&self, holder_name: &str) -> bool {
        self.from.as_deref() == Some(holder_name) || self.to.as_deref() == Some(holder_name)
    }
}
