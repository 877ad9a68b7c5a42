//! Request field parsing shared by the transfer use cases

use kernel::id::UserId;

use crate::domain::market::{CryptoAsset, MarketCatalog};
use crate::domain::value_objects::{Cents, Currency, TransferKind};
use crate::error::{LedgerError, LedgerResult};

/// Unparseable ids name no account
pub fn user_id(raw: &str) -> LedgerResult<UserId> {
    raw.trim().parse().map_err(|_| LedgerError::AccountNotFound)
}

/// Strictly positive amount in cents
pub fn amount(raw: Option<f64>) -> LedgerResult<Cents> {
    raw.and_then(Cents::from_decimal)
        .filter(Cents::is_positive)
        .ok_or(LedgerError::InvalidAmount)
}

pub fn transfer_kind(raw: &str) -> LedgerResult<TransferKind> {
    raw.parse()
        .map_err(|_| LedgerError::UnknownTransferKind(raw.trim().to_string()))
}

/// Blank symbols count as a missing field
pub fn asset<'a>(market: &'a MarketCatalog, raw: &str) -> LedgerResult<&'a CryptoAsset> {
    if raw.trim().is_empty() {
        return Err(LedgerError::MissingFields);
    }
    market
        .find(raw)
        .ok_or_else(|| LedgerError::UnknownAsset(raw.trim().to_uppercase()))
}

/// BRL when absent
pub fn currency(raw: Option<&str>) -> LedgerResult<Currency> {
    match raw.map(str::trim).filter(|c| !c.is_empty()) {
        None => Ok(Currency::Brl),
        Some(code) => code
            .parse()
            .map_err(|_| LedgerError::UnsupportedCurrency(code.to_string())),
    }
}
