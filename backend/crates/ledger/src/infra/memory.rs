//! In-Memory Repository Implementation
//!
//! Accounts and transactions share one lock so a debit and its ledger
//! entry are never observed apart.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use kernel::id::UserId;

use crate::domain::entities::{Account, Transaction};
use crate::domain::repository::LedgerRepository;
use crate::domain::value_objects::Cents;
use crate::error::{LedgerError, LedgerResult};
use crate::infra::seed;

#[derive(Default)]
struct Book {
    accounts: HashMap<UserId, Account>,
    /// Oldest first
    transactions: Vec<Transaction>,
}

/// In-memory ledger repository
#[derive(Clone, Default)]
pub struct InMemoryLedger {
    book: Arc<RwLock<Book>>,
}

fn poisoned<T>(_: PoisonError<T>) -> LedgerError {
    LedgerError::Internal("ledger lock poisoned".to_string())
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ledger preloaded with the demo accounts and transactions
    pub fn with_demo_data() -> Self {
        let book = Book {
            accounts: seed::demo_accounts()
                .into_iter()
                .map(|account| (account.user_id, account))
                .collect(),
            transactions: seed::demo_transactions(),
        };
        tracing::info!(
            accounts = book.accounts.len(),
            transactions = book.transactions.len(),
            "Seeded demo ledger"
        );
        Self {
            book: Arc::new(RwLock::new(book)),
        }
    }

    /// Synchronous account opening, for callers outside an async context
    pub fn insert_account(&self, account: Account) -> LedgerResult<()> {
        let mut book = self.book.write().map_err(poisoned)?;
        book.accounts.entry(account.user_id).or_insert(account);
        Ok(())
    }
}

impl LedgerRepository for InMemoryLedger {
    async fn find_account(&self, user_id: &UserId) -> LedgerResult<Option<Account>> {
        let book = self.book.read().map_err(poisoned)?;
        Ok(book.accounts.get(user_id).cloned())
    }

    async fn open_account(&self, account: &Account) -> LedgerResult<()> {
        self.insert_account(account.clone())
    }

    async fn list_transactions(&self) -> LedgerResult<Vec<Transaction>> {
        let book = self.book.read().map_err(poisoned)?;
        Ok(book.transactions.clone())
    }

    async fn debit_and_record(
        &self,
        user_id: &UserId,
        total: Cents,
        transaction: &Transaction,
    ) -> LedgerResult<Account> {
        let mut book = self.book.write().map_err(poisoned)?;

        let account = book
            .accounts
            .get_mut(user_id)
            .ok_or(LedgerError::AccountNotFound)?;
        account
            .debit_brl(total)
            .ok_or(LedgerError::InsufficientFunds)?;
        let updated = account.clone();

        book.transactions.push(transaction.clone());
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::services::{FeeSchedule, new_transaction_id};
    use crate::domain::value_objects::TransferKind;
    use chrono::Utc;
    use kernel::id::demo;

    fn transfer(amount: Cents) -> (Cents, Transaction) {
        let quote = FeeSchedule::default().quote(TransferKind::Ted, amount);
        let txn = Transaction::transfer(new_transaction_id(), &quote, "João Silva", "Ana", Utc::now());
        (quote.total, txn)
    }

    #[tokio::test]
    async fn test_demo_data() {
        let ledger = InMemoryLedger::with_demo_data();
        let joao = ledger.find_account(&demo::JOAO).await.unwrap().unwrap();
        assert_eq!(joao.brl, Cents::units(5000));
        assert_eq!(joao.usd, Cents::units(950));
        assert_eq!(ledger.list_transactions().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_debit_and_record() {
        let ledger = InMemoryLedger::with_demo_data();
        let (total, txn) = transfer(Cents::units(1000));

        let account = ledger.debit_and_record(&demo::JOAO, total, &txn).await.unwrap();
        assert_eq!(account.brl, Cents::new(500_000 - 100_350));

        let transactions = ledger.list_transactions().await.unwrap();
        assert_eq!(transactions.last().unwrap().id, txn.id);
    }

    #[tokio::test]
    async fn test_overdraft_leaves_no_trace() {
        let ledger = InMemoryLedger::with_demo_data();
        let (total, txn) = transfer(Cents::units(5000));

        let result = ledger.debit_and_record(&demo::JOAO, total, &txn).await;
        assert!(matches!(result, Err(LedgerError::InsufficientFunds)));

        let joao = ledger.find_account(&demo::JOAO).await.unwrap().unwrap();
        assert_eq!(joao.brl, Cents::units(5000));
        assert_eq!(ledger.list_transactions().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_concurrent_debits_never_overdraw() {
        let ledger = InMemoryLedger::new();
        let user_id = UserId::new();
        ledger
            .open_account(&Account::open(user_id, "Ana").with_balances(Cents::units(100), Cents::ZERO))
            .await
            .unwrap();

        let tasks: Vec<_> = (0..10)
            .map(|_| {
                let ledger = ledger.clone();
                tokio::spawn(async move {
                    let quote = FeeSchedule::default().quote(TransferKind::Pix, Cents::units(30));
                    let txn = Transaction::transfer(new_transaction_id(), &quote, "Ana", "Bia", Utc::now());
                    ledger.debit_and_record(&user_id, quote.total, &txn).await.is_ok()
                })
            })
            .collect();

        let mut succeeded = 0;
        for task in tasks {
            if task.await.unwrap() {
                succeeded += 1;
            }
        }

        assert_eq!(succeeded, 3);
        let account = ledger.find_account(&user_id).await.unwrap().unwrap();
        assert_eq!(account.brl, Cents::units(10));
    }

    #[tokio::test]
    async fn test_open_account_keeps_existing() {
        let ledger = InMemoryLedger::with_demo_data();
        ledger
            .open_account(&Account::open(demo::MARIA, "Maria Santos"))
            .await
            .unwrap();
        let maria = ledger.find_account(&demo::MARIA).await.unwrap().unwrap();
        assert_eq!(maria.brl, Cents::units(3500));
    }
}
