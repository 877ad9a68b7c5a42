//! Application Configuration
//!
//! Configuration for the ledger application layer.

use crate::domain::market::{ExchangeRate, MarketCatalog};
use crate::domain::services::FeeSchedule;

/// Ledger application configuration
#[derive(Debug, Clone)]
pub struct LedgerConfig {
    /// Transfer fee rates
    pub fees: FeeSchedule,
    /// Transactions shown on the dashboard
    pub recent_window: usize,
    /// Recipient recorded when the request names none ("not informed")
    pub unnamed_recipient: String,
    /// Assets offered for purchase
    pub market: MarketCatalog,
    pub exchange_rate: ExchangeRate,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            fees: FeeSchedule::default(),
            recent_window: 5,
            unnamed_recipient: "N/I".to_string(),
            market: MarketCatalog::fallback(),
            exchange_rate: ExchangeRate::default(),
        }
    }
}

impl LedgerConfig {
    /// Create config for development
    pub fn development() -> Self {
        Self::default()
    }
}
