//! Crypto Market
//!
//! Static price catalog, the BRL/USD conversion and crypto quantities.
//! Prices are USD cents; quantities are counted in 1e-8 units so that a
//! purchase never goes through floating point.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::domain::value_objects::Cents;

/// Fractional digits of a [`CryptoQuantity`]
pub const QUANTITY_DECIMALS: u32 = 8;
const QUANTITY_SCALE: i128 = 10_i128.pow(QUANTITY_DECIMALS);

/// Listed asset with its USD price
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CryptoAsset {
    pub symbol: String,
    pub name: String,
    /// USD per whole coin
    pub price: Cents,
    #[serde(rename = "change24h")]
    pub change_24h: f64,
    #[serde(rename = "volume24h")]
    pub volume_24h: String,
}

impl CryptoAsset {
    fn listed(symbol: &str, name: &str, price: Cents, change_24h: f64, volume_24h: &str) -> Self {
        Self {
            symbol: symbol.to_string(),
            name: name.to_string(),
            price,
            change_24h,
            volume_24h: volume_24h.to_string(),
        }
    }
}

/// Assets that can be bought
#[derive(Debug, Clone, PartialEq)]
pub struct MarketCatalog {
    assets: Vec<CryptoAsset>,
}

impl Default for MarketCatalog {
    fn default() -> Self {
        Self::fallback()
    }
}

impl MarketCatalog {
    pub fn new(assets: Vec<CryptoAsset>) -> Self {
        Self { assets }
    }

    /// Snapshot served when no live provider is wired in
    pub fn fallback() -> Self {
        Self::new(vec![
            CryptoAsset::listed("BTC", "Bitcoin", Cents::new(11_385_150), -1.19, "2.3 tri"),
            CryptoAsset::listed("ETH", "Ethereum", Cents::new(405_914), -3.65, "493.2 bi"),
            CryptoAsset::listed("BCH", "Bitcoin Cash", Cents::new(55_985), 0.28, "11.2 bi"),
            CryptoAsset::listed("LTC", "Litecoin", Cents::new(9_838), -3.27, "7.6 bi"),
            CryptoAsset::listed("ETC", "Ethereum Classic", Cents::new(1_615), -3.67, "2.5 bi"),
        ])
    }

    pub fn assets(&self) -> &[CryptoAsset] {
        &self.assets
    }

    /// Case-insensitive symbol lookup
    pub fn find(&self, symbol: &str) -> Option<&CryptoAsset> {
        let symbol = symbol.trim();
        self.assets
            .iter()
            .find(|asset| asset.symbol.eq_ignore_ascii_case(symbol))
    }
}

// ============================================================================
// Exchange rate
// ============================================================================

/// BRL paid for one USD, with four decimal places
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExchangeRate {
    brl_per_usd_e4: u32,
}

impl Default for ExchangeRate {
    /// Fixed 5.30 BRL per USD
    fn default() -> Self {
        Self::from_scaled(53_000)
    }
}

impl ExchangeRate {
    /// Zero is raised to the smallest representable rate
    pub const fn from_scaled(brl_per_usd_e4: u32) -> Self {
        Self {
            brl_per_usd_e4: if brl_per_usd_e4 == 0 { 1 } else { brl_per_usd_e4 },
        }
    }

    /// Rounded half-up to the cent
    pub fn brl_to_usd(&self, brl: Cents) -> Cents {
        let rate = i128::from(self.brl_per_usd_e4);
        let usd = (i128::from(brl.as_i64()) * 10_000 + rate / 2).div_euclid(rate);
        Cents::new(i64::try_from(usd).unwrap_or(i64::MAX))
    }

    /// Whole coins bought with `brl` at `price` (USD cents), truncated to 1e-8
    pub fn quantity_for(&self, brl: Cents, price: Cents) -> CryptoQuantity {
        if !price.is_positive() || !brl.is_positive() {
            return CryptoQuantity::ZERO;
        }
        // brl / rate / price, kept in integers
        let numerator = i128::from(brl.as_i64()) * 10_000 * QUANTITY_SCALE;
        let denominator = i128::from(self.brl_per_usd_e4) * i128::from(price.as_i64());
        let units = numerator / denominator;
        CryptoQuantity(u64::try_from(units).unwrap_or(u64::MAX))
    }
}

// ============================================================================
// Quantity
// ============================================================================

/// Amount of a coin in units of 1e-8
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct CryptoQuantity(u64);

impl CryptoQuantity {
    pub const ZERO: CryptoQuantity = CryptoQuantity(0);

    pub const fn from_units(units: u64) -> Self {
        Self(units)
    }

    pub const fn units(&self) -> u64 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for CryptoQuantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let scale = QUANTITY_SCALE as u64;
        write!(
            f,
            "{}.{:0width$}",
            self.0 / scale,
            self.0 % scale,
            width = QUANTITY_DECIMALS as usize
        )
    }
}

/// Serialized as a decimal string (`"0.00087833"`)
impl Serialize for CryptoQuantity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_ignores_case() {
        let market = MarketCatalog::fallback();
        assert_eq!(market.assets().len(), 5);
        assert_eq!(market.find("eth").map(|a| a.name.as_str()), Some("Ethereum"));
        assert_eq!(market.find(" BTC ").map(|a| a.price), Some(Cents::new(11_385_150)));
        assert!(market.find("DOGE").is_none());
    }

    #[test]
    fn test_brl_to_usd() {
        let rate = ExchangeRate::default();
        assert_eq!(rate.brl_to_usd(Cents::units(530)), Cents::units(100));
        // 1.00 / 5.3 = 0.1887 -> 0.19
        assert_eq!(rate.brl_to_usd(Cents::units(1)), Cents::new(19));
    }

    #[test]
    fn test_quantity_is_truncated() {
        let rate = ExchangeRate::default();

        // 100 USD of BTC at 113851.50 = 0.000878332...
        let btc = rate.quantity_for(Cents::units(530), Cents::new(11_385_150));
        assert_eq!(btc, CryptoQuantity::from_units(87_833));
        assert_eq!(btc.to_string(), "0.00087833");

        // 100 USD of ETC at 16.15 = 6.191950...
        let etc = rate.quantity_for(Cents::units(530), Cents::new(1_615));
        assert_eq!(etc.to_string(), "6.19195046");

        assert!(rate.quantity_for(Cents::ZERO, Cents::new(1_615)).is_zero());
        assert!(rate.quantity_for(Cents::units(1), Cents::ZERO).is_zero());
    }

    #[test]
    fn test_zero_rate_is_raised() {
        let rate = ExchangeRate::from_scaled(0);
        assert!(!rate.quantity_for(Cents::units(1), Cents::units(1)).is_zero());
    }

    #[test]
    fn test_asset_json_shape() {
        let market = MarketCatalog::fallback();
        let json = serde_json::to_value(market.find("BTC").unwrap()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "symbol": "BTC",
                "name": "Bitcoin",
                "price": 113851.5,
                "change24h": -1.19,
                "volume24h": "2.3 tri"
            })
        );
        assert_eq!(
            serde_json::to_string(&CryptoQuantity::from_units(150_000_000)).unwrap(),
            "\"1.50000000\""
        );
    }
}
