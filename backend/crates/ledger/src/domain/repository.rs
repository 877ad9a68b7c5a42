//! Repository Traits
//!
//! Interfaces for ledger storage. Implementation is in infrastructure layer.

use kernel::id::UserId;

use crate::domain::entities::{Account, Transaction};
use crate::domain::value_objects::Cents;
use crate::error::LedgerResult;

/// Ledger repository trait
#[trait_variant::make(LedgerRepository: Send)]
pub trait LocalLedgerRepository {
    async fn find_account(&self, user_id: &UserId) -> LedgerResult<Option<Account>>;

    /// Open an account; replaces nothing if one exists for the user
    async fn open_account(&self, account: &Account) -> LedgerResult<()>;

    /// Every entry, oldest first
    async fn list_transactions(&self) -> LedgerResult<Vec<Transaction>>;

    /// Debit `total` from the user's BRL balance and append `transaction`,
    /// atomically. Fails with `InsufficientFunds` without side effects.
    async fn debit_and_record(
        &self,
        user_id: &UserId,
        total: Cents,
        transaction: &Transaction,
    ) -> LedgerResult<Account>;
}
