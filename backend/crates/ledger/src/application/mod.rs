//! Application Layer - Use Cases
//!
//! This layer orchestrates domain logic and infrastructure.

pub mod config;
pub mod crypto;
pub mod dashboard;
pub mod execute_transfer;
mod parse;
pub mod reports;
pub mod simulate_transfer;

pub use config::LedgerConfig;
pub use crypto::{CryptoPurchaseInput, CryptoQuoteInput, CryptoUseCase};
pub use dashboard::{DashboardOutput, DashboardUseCase};
pub use execute_transfer::{ExecuteTransferInput, ExecuteTransferUseCase};
pub use reports::{ReportExport, ReportsUseCase};
pub use simulate_transfer::{
    SimulateTransferInput, SimulateTransferOutput, SimulateTransferUseCase, SimulationReceipt,
};
