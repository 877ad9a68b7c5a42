//! Demo ledger
//!
//! Accounts of the demo users (same ids as the auth fixtures) and a few
//! historical transactions.

use chrono::{DateTime, NaiveDate, Utc};
use kernel::id::demo;

use crate::domain::entities::{Account, CryptoLeg, Transaction};
use crate::domain::value_objects::{
    Cents, Currency, TransactionKind, TransactionStatus, TransferKind,
};

pub fn demo_accounts() -> Vec<Account> {
    vec![
        Account::open(demo::JOAO, "João Silva").with_balances(Cents::units(5000), Cents::units(950)),
        Account::open(demo::ADMIN, "Admin Inwista"),
        Account::open(demo::MARIA, "Maria Santos")
            .with_balances(Cents::units(3500), Cents::units(650)),
    ]
}

fn at(day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(2025, 10, day)
        .and_then(|date| date.and_hms_opt(hour, minute, 0))
        .map(|naive| naive.and_utc())
        .unwrap_or_default()
}

pub fn demo_transactions() -> Vec<Transaction> {
    vec![
        Transaction {
            id: "txn-001".to_string(),
            kind: TransactionKind::PixReceived,
            amount: Cents::units(500),
            fee: Cents::ZERO,
            total: Cents::units(500),
            currency: Currency::Brl,
            status: TransactionStatus::Completed,
            created_at: at(28, 10, 30),
            from: Some("Maria Santos".to_string()),
            to: Some("João Silva".to_string()),
            crypto: None,
        },
        Transaction {
            id: "txn-002".to_string(),
            kind: TransactionKind::CryptoPurchase,
            amount: Cents::units(1000),
            fee: Cents::units(2),
            total: Cents::units(1002),
            currency: Currency::Brl,
            status: TransactionStatus::Completed,
            created_at: at(27, 15, 45),
            from: None,
            to: None,
            crypto: Some(CryptoLeg {
                symbol: "BTC".to_string(),
                quantity: "0.0088".to_string(),
            }),
        },
        Transaction {
            id: "txn-003".to_string(),
            kind: TransactionKind::Transfer(TransferKind::Ted),
            amount: Cents::units(2500),
            fee: Cents::new(350),
            total: Cents::new(250_350),
            currency: Currency::Brl,
            status: TransactionStatus::Processing,
            created_at: at(28, 14, 20),
            from: Some("João Silva".to_string()),
            to: Some("Banco XYZ".to_string()),
            crypto: None,
        },
    ]
}
