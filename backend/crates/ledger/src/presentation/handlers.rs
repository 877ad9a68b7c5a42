//! HTTP Handlers

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use platform::clock::{Clock, SystemClock};
use std::sync::Arc;

use crate::application::config::LedgerConfig;
use crate::application::{
    CryptoPurchaseInput, CryptoQuoteInput, CryptoUseCase, DashboardOutput, DashboardUseCase,
    ExecuteTransferInput, ExecuteTransferUseCase,
    ReportExport, ReportsUseCase, SimulateTransferInput, SimulateTransferOutput,
    SimulateTransferUseCase,
};
use crate::domain::entities::Transaction;
use crate::domain::repository::LedgerRepository;
use crate::domain::market::CryptoAsset;
use crate::domain::services::{CryptoQuote, Statistics};
use crate::error::LedgerResult;
use crate::presentation::dto::{
    CryptoPurchaseRequest, CryptoQuoteRequest, ExecuteTransferRequest, SimulateTransferRequest,
};

/// Shared state for ledger handlers
#[derive(Clone)]
pub struct LedgerAppState<R>
where
    R: LedgerRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<LedgerConfig>,
    pub clock: Arc<dyn Clock>,
}

impl<R> LedgerAppState<R>
where
    R: LedgerRepository + Clone + Send + Sync + 'static,
{
    pub fn new(repo: R, config: LedgerConfig) -> Self {
        Self {
            repo: Arc::new(repo),
            config: Arc::new(config),
            clock: Arc::new(SystemClock),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }
}

/// GET /api/users/{id}/dashboard
pub async fn dashboard<R>(
    State(state): State<LedgerAppState<R>>,
    Path(user_id): Path<String>,
) -> LedgerResult<Json<DashboardOutput>>
where
    R: LedgerRepository + Clone + Send + Sync + 'static,
{
    let use_case = DashboardUseCase::new(state.repo.clone(), state.config.clone());
    Ok(Json(use_case.execute(&user_id).await?))
}

/// POST /api/transactions/simulate
pub async fn simulate_transfer<R>(
    State(state): State<LedgerAppState<R>>,
    Json(req): Json<SimulateTransferRequest>,
) -> LedgerResult<Json<SimulateTransferOutput>>
where
    R: LedgerRepository + Clone + Send + Sync + 'static,
{
    let use_case = SimulateTransferUseCase::new(
        state.repo.clone(),
        state.config.clone(),
        state.clock.clone(),
    );

    let output = use_case
        .execute(SimulateTransferInput {
            user_id: req.user_id,
            kind: req.kind,
            amount: req.amount,
            currency: req.currency,
            recipient: req.recipient,
        })
        .await?;

    Ok(Json(output))
}

/// GET /api/transactions
pub async fn list_transactions<R>(
    State(state): State<LedgerAppState<R>>,
) -> LedgerResult<Json<Vec<Transaction>>>
where
    R: LedgerRepository + Clone + Send + Sync + 'static,
{
    Ok(Json(state.repo.list_transactions().await?))
}

/// POST /api/transactions
pub async fn execute_transfer<R>(
    State(state): State<LedgerAppState<R>>,
    Json(req): Json<ExecuteTransferRequest>,
) -> LedgerResult<impl IntoResponse>
where
    R: LedgerRepository + Clone + Send + Sync + 'static,
{
    let use_case = ExecuteTransferUseCase::new(
        state.repo.clone(),
        state.config.clone(),
        state.clock.clone(),
    );

    let transaction = use_case
        .execute(ExecuteTransferInput {
            user_id: req.user_id,
            kind: req.kind,
            amount: req.amount,
            recipient: req.recipient,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(transaction)))
}

fn crypto_use_case<R>(state: &LedgerAppState<R>) -> CryptoUseCase<R>
where
    R: LedgerRepository + Clone + Send + Sync + 'static,
{
    CryptoUseCase::new(
        state.repo.clone(),
        state.config.clone(),
        state.clock.clone(),
    )
}

/// GET /api/market
pub async fn market<R>(State(state): State<LedgerAppState<R>>) -> Json<Vec<CryptoAsset>>
where
    R: LedgerRepository + Clone + Send + Sync + 'static,
{
    Json(crypto_use_case(&state).market())
}

/// POST /api/crypto/quote
pub async fn crypto_quote<R>(
    State(state): State<LedgerAppState<R>>,
    Json(req): Json<CryptoQuoteRequest>,
) -> LedgerResult<Json<CryptoQuote>>
where
    R: LedgerRepository + Clone + Send + Sync + 'static,
{
    let quote = crypto_use_case(&state).quote(CryptoQuoteInput {
        symbol: req.symbol,
        amount: req.amount,
    })?;
    Ok(Json(quote))
}

/// POST /api/crypto/purchase
pub async fn crypto_purchase<R>(
    State(state): State<LedgerAppState<R>>,
    Json(req): Json<CryptoPurchaseRequest>,
) -> LedgerResult<impl IntoResponse>
where
    R: LedgerRepository + Clone + Send + Sync + 'static,
{
    let transaction = crypto_use_case(&state)
        .purchase(CryptoPurchaseInput {
            user_id: req.user_id,
            symbol: req.symbol,
            amount: req.amount,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(transaction)))
}

/// GET /api/admin/statistics
pub async fn statistics<R>(
    State(state): State<LedgerAppState<R>>,
) -> LedgerResult<Json<Statistics>>
where
    R: LedgerRepository + Clone + Send + Sync + 'static,
{
    let use_case = ReportsUseCase::new(state.repo.clone(), state.clock.clone());
    Ok(Json(use_case.statistics().await?))
}

/// GET /api/admin/reports/export
pub async fn export_report<R>(
    State(state): State<LedgerAppState<R>>,
) -> LedgerResult<Json<ReportExport>>
where
    R: LedgerRepository + Clone + Send + Sync + 'static,
{
    let use_case = ReportsUseCase::new(state.repo.clone(), state.clock.clone());
    Ok(Json(use_case.export().await?))
}
