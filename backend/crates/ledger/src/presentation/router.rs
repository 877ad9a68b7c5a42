//! Ledger Router

use axum::{
    Router,
    routing::{get, post},
};

use crate::domain::repository::LedgerRepository;
use crate::presentation::handlers::{self, LedgerAppState};

/// Create a generic ledger router for any repository implementation
pub fn ledger_router_generic<R>(state: LedgerAppState<R>) -> Router
where
    R: LedgerRepository + Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/users/{id}/dashboard", get(handlers::dashboard::<R>))
        .route(
            "/transactions",
            get(handlers::list_transactions::<R>).post(handlers::execute_transfer::<R>),
        )
        .route(
            "/transactions/simulate",
            post(handlers::simulate_transfer::<R>),
        )
        .route("/market", get(handlers::market::<R>))
        .route("/crypto/quote", post(handlers::crypto_quote::<R>))
        .route("/crypto/purchase", post(handlers::crypto_purchase::<R>))
        .route("/admin/statistics", get(handlers::statistics::<R>))
        .route("/admin/reports/export", get(handlers::export_report::<R>))
        .with_state(state)
}
