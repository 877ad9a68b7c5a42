//! Infrastructure Layer
//!
//! Storage implementation and demo data.

pub mod memory;
pub mod seed;

pub use memory::InMemoryLedger;
