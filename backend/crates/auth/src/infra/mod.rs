//! Infrastructure Layer
//!
//! Storage implementations and seed data.

pub mod memory;
pub mod seed;

pub use memory::InMemoryAuthRepository;
