//! API DTOs (Data Transfer Objects)

use serde::Deserialize;

/// Request for POST /api/transactions/simulate
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SimulateTransferRequest {
    pub user_id: String,
    /// `pix`, `ted` or `tef`
    pub kind: String,
    pub amount: Option<f64>,
    pub currency: Option<String>,
    pub recipient: Option<String>,
}

/// Request for POST /api/transactions
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExecuteTransferRequest {
    pub user_id: String,
    pub kind: String,
    pub amount: Option<f64>,
    pub recipient: Option<String>,
}

/// Request for POST /api/crypto/quote
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CryptoQuoteRequest {
    pub symbol: String,
    /// BRL to spend
    pub amount: Option<f64>,
}

/// Request for POST /api/crypto/purchase
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CryptoPurchaseRequest {
    pub user_id: String,
    pub symbol: String,
    pub amount: Option<f64>,
}
