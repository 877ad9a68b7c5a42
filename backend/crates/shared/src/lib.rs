//! Shared Kernel
//!
//! Vocabulary that every backend crate agrees on:
//! - The unified error type (`AppError`) and its HTTP classification
//! - Typed identifiers for users and transactions
//!
//! Nothing domain-specific lives here. Auth and ledger rules stay in
//! their own crates and only borrow these building blocks.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod id;
