//! Domain Value Objects
//!
//! Money is kept in integer cents; nothing in the ledger touches floats
//! except the JSON boundary.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

// ============================================================================
// Cents
// ============================================================================

/// Amount of money in cents
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Cents(i64);

impl Cents {
    pub const ZERO: Cents = Cents(0);

    pub const fn new(cents: i64) -> Self {
        Self(cents)
    }

    /// Whole currency units, e.g. `Cents::units(5000)` is 5000.00
    pub const fn units(units: i64) -> Self {
        Self(units * 100)
    }

    /// Convert a decimal amount from the wire, rounding to the nearest cent.
    /// Returns `None` for NaN, infinities and values out of range.
    pub fn from_decimal(amount: f64) -> Option<Self> {
        if !amount.is_finite() {
            return None;
        }
        let cents = (amount * 100.0).round();
        if cents.abs() > i64::MAX as f64 / 2.0 {
            return None;
        }
        Some(Self(cents as i64))
    }

    pub const fn as_i64(&self) -> i64 {
        self.0
    }

    pub fn is_positive(&self) -> bool {
        self.0 > 0
    }

    pub fn checked_add(self, other: Cents) -> Option<Cents> {
        self.0.checked_add(other.0).map(Cents)
    }

    pub fn saturating_add(self, other: Cents) -> Cents {
        Cents(self.0.saturating_add(other.0))
    }

    pub fn checked_sub(self, other: Cents) -> Option<Cents> {
        self.0.checked_sub(other.0).map(Cents)
    }

    /// `self * bp / 10_000`, rounded half-up to the cent
    pub fn apply_basis_points(self, bp: u32) -> Cents {
        let scaled = i128::from(self.0) * i128::from(bp);
        let rounded = (scaled + 5_000).div_euclid(10_000);
        Cents(i64::try_from(rounded).unwrap_or(i64::MAX))
    }

    pub fn to_decimal(self) -> f64 {
        self.0 as f64 / 100.0
    }
}

impl fmt::Display for Cents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{}{}.{:02}", sign, abs / 100, abs % 100)
    }
}

/// Serialized as a decimal number (`5000.0`) for the web client
impl Serialize for Cents {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.to_decimal())
    }
}

// ============================================================================
// Currency
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Brl,
    Usd,
}

impl Currency {
    pub const fn code(&self) -> &'static str {
        match self {
            Currency::Brl => "BRL",
            Currency::Usd => "USD",
        }
    }
}

impl FromStr for Currency {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "BRL" => Ok(Currency::Brl),
            "USD" => Ok(Currency::Usd),
            _ => Err(()),
        }
    }
}

// ============================================================================
// Transfer kind
// ============================================================================

/// Outgoing transfer rails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TransferKind {
    /// Instant payment, free
    Pix,
    /// Interbank wire
    Ted,
    /// Transfer between accounts of the same bank
    Tef,
}

impl TransferKind {
    pub const ALL: [TransferKind; 3] = [TransferKind::Pix, TransferKind::Ted, TransferKind::Tef];

    pub const fn code(&self) -> &'static str {
        match self {
            TransferKind::Pix => "pix",
            TransferKind::Ted => "ted",
            TransferKind::Tef => "tef",
        }
    }

    /// Pix is charged nothing on top of the amount
    pub const fn adds_fee_to_total(&self) -> bool {
        !matches!(self, TransferKind::Pix)
    }
}

impl FromStr for TransferKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pix" => Ok(TransferKind::Pix),
            "ted" => Ok(TransferKind::Ted),
            "tef" => Ok(TransferKind::Tef),
            _ => Err(()),
        }
    }
}

impl fmt::Display for TransferKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

// ============================================================================
// Transaction kind and status
// ============================================================================

/// What a ledger entry records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransactionKind {
    Transfer(TransferKind),
    PixReceived,
    CryptoPurchase,
}

impl TransactionKind {
    pub const fn code(&self) -> &'static str {
        match self {
            TransactionKind::Transfer(kind) => kind.code(),
            TransactionKind::PixReceived => "pix_received",
            TransactionKind::CryptoPurchase => "crypto_purchase",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl Serialize for TransactionKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionStatus {
    Completed,
    Processing,
    Failed,
}

impl TransactionStatus {
    pub const fn code(&self) -> &'static str {
        match self {
            TransactionStatus::Completed => "completed",
            TransactionStatus::Processing => "processing",
            TransactionStatus::Failed => "failed",
        }
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cents_display() {
        assert_eq!(Cents::units(5000).to_string(), "5000.00");
        assert_eq!(Cents::new(875).to_string(), "8.75");
        assert_eq!(Cents::new(5).to_string(), "0.05");
        assert_eq!(Cents::new(-150).to_string(), "-1.50");
    }

    #[test]
    fn test_from_decimal_rounds_to_cent() {
        assert_eq!(Cents::from_decimal(100.0), Some(Cents::new(10_000)));
        assert_eq!(Cents::from_decimal(0.1 + 0.2), Some(Cents::new(30)));
        assert_eq!(Cents::from_decimal(19.99), Some(Cents::new(1999)));
        assert_eq!(Cents::from_decimal(f64::NAN), None);
        assert_eq!(Cents::from_decimal(f64::INFINITY), None);
    }

    #[test]
    fn test_basis_points_round_half_up() {
        // 2500.00 at 0.35% = 8.75
        assert_eq!(Cents::units(2500).apply_basis_points(35), Cents::new(875));
        // 1.00 at 0.35% = 0.0035 -> 0.00
        assert_eq!(Cents::units(1).apply_basis_points(35), Cents::ZERO);
        // 10.00 at 0.35% = 0.035 -> 0.04
        assert_eq!(Cents::units(10).apply_basis_points(35), Cents::new(4));
        // 2.50 at 0.20% = 0.005 -> 0.01
        assert_eq!(Cents::new(250).apply_basis_points(20), Cents::new(1));
        assert_eq!(Cents::units(1000).apply_basis_points(0), Cents::ZERO);
    }

    #[test]
    fn test_serializes_as_decimal_number() {
        let json = serde_json::to_string(&Cents::new(875)).unwrap();
        assert_eq!(json, "8.75");
    }

    #[test]
    fn test_transfer_kind_parse() {
        assert_eq!("PIX".parse::<TransferKind>(), Ok(TransferKind::Pix));
        assert_eq!(" ted ".parse::<TransferKind>(), Ok(TransferKind::Ted));
        assert_eq!("tef".parse::<TransferKind>(), Ok(TransferKind::Tef));
        assert!("doc".parse::<TransferKind>().is_err());
        assert!(!TransferKind::Pix.adds_fee_to_total());
        assert!(TransferKind::Ted.adds_fee_to_total());
    }

    #[test]
    fn test_currency_parse() {
        assert_eq!("brl".parse::<Currency>(), Ok(Currency::Brl));
        assert_eq!("USD".parse::<Currency>(), Ok(Currency::Usd));
        assert!("EUR".parse::<Currency>().is_err());
        assert_eq!(serde_json::to_string(&Currency::Brl).unwrap(), "\"BRL\"");
    }

    #[test]
    fn test_transaction_kind_codes() {
        assert_eq!(TransactionKind::Transfer(TransferKind::Ted).code(), "ted");
        assert_eq!(TransactionKind::PixReceived.code(), "pix_received");
        assert_eq!(
            serde_json::to_string(&TransactionKind::CryptoPurchase).unwrap(),
            "\"crypto_purchase\""
        );
    }
}
