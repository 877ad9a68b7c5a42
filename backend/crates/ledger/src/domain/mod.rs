//! Domain Layer - Business logic and entities
//!
//! This layer contains:
//! - Domain entities (Account, Transaction)
//! - Domain value objects (Cents, Currency, TransferKind, ...)
//! - Crypto market catalog and exchange rate
//! - Domain services (fees, reports)
//! - Repository traits (interfaces)

pub mod entities;
pub mod market;
pub mod repository;
pub mod services;
pub mod value_objects;
