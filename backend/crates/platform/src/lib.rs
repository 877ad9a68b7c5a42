//! Platform Crate - Technical Infrastructure
//!
//! Shared technical foundations with no business meaning:
//! - Clock abstraction (so lockout and expiry logic is testable)
//! - Text normalization helpers (digit stripping, NFKC trimming)
//! - Random numeric codes for second factors and receipts

pub mod clock;
pub mod random;
pub mod text;
