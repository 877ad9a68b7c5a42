//! Domain Services
//!
//! Pure ledger logic: fee quotes, identifiers, reports.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::domain::entities::Transaction;
use crate::domain::market::{CryptoAsset, CryptoQuantity, ExchangeRate};
use crate::domain::value_objects::{Cents, TransactionStatus, TransferKind};

/// Header row of the CSV export
pub const CSV_HEADER: &str = "id,kind,amount,fee,status,date";

// ============================================================================
// Fees
// ============================================================================

/// Fee rate per transfer kind, in basis points (1 bp = 0.01%)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeeSchedule {
    pub pix_bp: u32,
    pub ted_bp: u32,
    pub tef_bp: u32,
    /// Taker fee on crypto purchases
    pub crypto_bp: u32,
}

impl Default for FeeSchedule {
    fn default() -> Self {
        Self {
            pix_bp: 0,
            ted_bp: 35,
            tef_bp: 20,
            crypto_bp: 20,
        }
    }
}

/// Fee and total for a prospective transfer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferQuote {
    pub kind: TransferKind,
    pub amount: Cents,
    pub fee: Cents,
    /// Amount debited from the sender
    pub total: Cents,
}

/// Price breakdown of a crypto purchase paid in BRL
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CryptoQuote {
    pub symbol: String,
    /// USD per coin
    pub price: Cents,
    pub amount: Cents,
    pub fee: Cents,
    /// Amount debited in BRL
    pub total: Cents,
    pub usd_amount: Cents,
    pub quantity: CryptoQuantity,
}

impl FeeSchedule {
    pub fn rate_bp(&self, kind: TransferKind) -> u32 {
        match kind {
            TransferKind::Pix => self.pix_bp,
            TransferKind::Ted => self.ted_bp,
            TransferKind::Tef => self.tef_bp,
        }
    }

    /// Pix totals the bare amount even if a rate is configured for it
    pub fn quote(&self, kind: TransferKind, amount: Cents) -> TransferQuote {
        let fee = amount.apply_basis_points(self.rate_bp(kind));
        let total = if kind.adds_fee_to_total() {
            amount.saturating_add(fee)
        } else {
            amount
        };
        TransferQuote {
            kind,
            amount,
            fee,
            total,
        }
    }

    /// The fee is charged on top; the whole amount buys the coin
    pub fn quote_crypto(&self, asset: &CryptoAsset, amount: Cents, rate: ExchangeRate) -> CryptoQuote {
        let fee = amount.apply_basis_points(self.crypto_bp);
        CryptoQuote {
            symbol: asset.symbol.clone(),
            price: asset.price,
            amount,
            fee,
            total: amount.saturating_add(fee),
            usd_amount: rate.brl_to_usd(amount),
            quantity: rate.quantity_for(amount, asset.price),
        }
    }
}

// ============================================================================
// Identifiers
// ============================================================================

/// Simulation receipt number: `SIM-<unix millis>-<0..999>`
pub fn new_protocol(now: DateTime<Utc>) -> String {
    format!(
        "SIM-{}-{}",
        now.timestamp_millis(),
        platform::random::below(999)
    )
}

/// `txn-` plus the first 8 hex digits of a random UUID
pub fn new_transaction_id() -> String {
    let hex = Uuid::new_v4().simple().to_string();
    format!("txn-{}", &hex[..8])
}

// ============================================================================
// Reports
// ============================================================================

/// Most recent entries involving `holder_name`, newest first
pub fn recent_for(holder_name: &str, transactions: &[Transaction], window: usize) -> Vec<Transaction> {
    let mine: Vec<&Transaction> = transactions
        .iter()
        .filter(|txn| txn.involves(holder_name))
        .collect();
    let skip = mine.len().saturating_sub(window);
    mine.into_iter().skip(skip).rev().cloned().collect()
}

/// Aggregate counters over the whole ledger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub total: usize,
    pub completed: usize,
    pub processing: usize,
    /// Sum of completed amounts
    pub completed_volume: Cents,
}

pub fn statistics(transactions: &[Transaction]) -> Statistics {
    transactions.iter().fold(
        Statistics {
            total: 0,
            completed: 0,
            processing: 0,
            completed_volume: Cents::ZERO,
        },
        |mut stats, txn| {
            stats.total += 1;
            match txn.status {
                TransactionStatus::Completed => {
                    stats.completed += 1;
                    stats.completed_volume = stats.completed_volume.saturating_add(txn.amount);
                }
                TransactionStatus::Processing => stats.processing += 1,
                TransactionStatus::Failed => {}
            }
            stats
        },
    )
}

/// CSV with [`CSV_HEADER`]; no trailing newline
pub fn render_csv(transactions: &[Transaction]) -> String {
    let mut lines = Vec::with_capacity(transactions.len() + 1);
    lines.push(CSV_HEADER.to_string());
    lines.extend(transactions.iter().map(|txn| {
        format!(
            "{},{},{},{},{},{}",
            txn.id,
            txn.kind,
            txn.amount,
            txn.fee,
            txn.status,
            txn.created_at.to_rfc3339_opts(SecondsFormat::Secs, true)
        )
    }));
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::market::MarketCatalog;
    use crate::domain::value_objects::{Currency, TransactionKind};

    fn txn(id: &str, from: &str, to: &str, status: TransactionStatus, amount: i64) -> Transaction {
        Transaction {
            id: id.to_string(),
            kind: TransactionKind::Transfer(TransferKind::Pix),
            amount: Cents::units(amount),
            fee: Cents::ZERO,
            total: Cents::units(amount),
            currency: Currency::Brl,
            status,
            created_at: DateTime::from_timestamp(1_761_647_400, 0).unwrap(),
            from: Some(from.to_string()),
            to: Some(to.to_string()),
            crypto: None,
        }
    }

    #[test]
    fn test_quote_per_kind() {
        let fees = FeeSchedule::default();

        let pix = fees.quote(TransferKind::Pix, Cents::units(100));
        assert_eq!(pix.fee, Cents::ZERO);
        assert_eq!(pix.total, Cents::units(100));

        let ted = fees.quote(TransferKind::Ted, Cents::units(100));
        assert_eq!(ted.fee, Cents::new(35));
        assert_eq!(ted.total, Cents::new(10_035));

        let tef = fees.quote(TransferKind::Tef, Cents::units(100));
        assert_eq!(tef.fee, Cents::new(20));
        assert_eq!(tef.total, Cents::new(10_020));
    }

    #[test]
    fn test_pix_total_ignores_configured_rate() {
        let fees = FeeSchedule {
            pix_bp: 100,
            ..FeeSchedule::default()
        };
        let quote = fees.quote(TransferKind::Pix, Cents::units(100));
        assert_eq!(quote.fee, Cents::units(1));
        assert_eq!(quote.total, Cents::units(100));
    }

    #[test]
    fn test_quote_crypto() {
        let market = MarketCatalog::fallback();
        let btc = market.find("BTC").unwrap();

        let quote = FeeSchedule::default().quote_crypto(btc, Cents::units(530), ExchangeRate::default());
        assert_eq!(quote.symbol, "BTC");
        assert_eq!(quote.fee, Cents::new(106));
        assert_eq!(quote.total, Cents::new(53_106));
        assert_eq!(quote.usd_amount, Cents::units(100));
        assert_eq!(quote.quantity.to_string(), "0.00087833");

        // 1000.00 at 0.20% = 2.00, as in the seeded purchase
        let quote = FeeSchedule::default().quote_crypto(btc, Cents::units(1000), ExchangeRate::default());
        assert_eq!(quote.fee, Cents::units(2));
        assert_eq!(quote.total, Cents::units(1002));
    }

    #[test]
    fn test_identifier_shapes() {
        let id = new_transaction_id();
        assert_eq!(id.len(), 12);
        assert!(id.starts_with("txn-"));
        assert!(id[4..].chars().all(|c| c.is_ascii_hexdigit()));

        let now = DateTime::from_timestamp_millis(1_761_600_000_123).unwrap();
        let protocol = new_protocol(now);
        let suffix = protocol
            .strip_prefix("SIM-1761600000123-")
            .unwrap()
            .parse::<u32>()
            .unwrap();
        assert!(suffix < 999);
    }

    #[test]
    fn test_recent_for_is_newest_first_and_windowed() {
        let ledger: Vec<Transaction> = (1..=7)
            .map(|n| txn(&format!("t{n}"), "Ana", "Bia", TransactionStatus::Completed, n))
            .chain(std::iter::once(txn("other", "Caio", "Duda", TransactionStatus::Completed, 1)))
            .collect();

        let recent = recent_for("Bia", &ledger, 5);
        let ids: Vec<&str> = recent.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["t7", "t6", "t5", "t4", "t3"]);

        assert!(recent_for("Nobody", &ledger, 5).is_empty());
    }

    #[test]
    fn test_statistics() {
        let ledger = vec![
            txn("a", "x", "y", TransactionStatus::Completed, 500),
            txn("b", "x", "y", TransactionStatus::Completed, 1000),
            txn("c", "x", "y", TransactionStatus::Processing, 2500),
            txn("d", "x", "y", TransactionStatus::Failed, 10),
        ];
        let stats = statistics(&ledger);
        assert_eq!(stats.total, 4);
        assert_eq!(stats.completed, 2);
        assert_eq!(stats.processing, 1);
        assert_eq!(stats.completed_volume, Cents::units(1500));
    }

    #[test]
    fn test_render_csv() {
        let ledger = vec![txn("txn-001", "x", "y", TransactionStatus::Completed, 500)];
        assert_eq!(
            render_csv(&ledger),
            "id,kind,amount,fee,status,date\ntxn-001,pix,500.00,0.00,completed,2025-10-28T10:30:00Z"
        );
        assert_eq!(render_csv(&[]), CSV_HEADER);
    }
}
