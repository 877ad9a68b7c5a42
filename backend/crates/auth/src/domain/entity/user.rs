//! User Entity
//!
//! Account holder with the credentials used by the sign-in flow.
//! Balances are owned by the ledger crate and keyed by the same `UserId`.

use chrono::{DateTime, Utc};
use kernel::id::UserId;

use crate::domain::value_object::{
    cpf::Cpf, email::Email, identifier::Identifier, password::Password,
    two_factor_code::TwoFactorCode, user_name::UserName, user_role::UserRole,
};

#[derive(Debug, Clone)]
pub struct User {
    pub user_id: UserId,
    /// Full name, shown on receipts and statements
    pub name: String,
    pub cpf: Cpf,
    pub email: Email,
    pub user_name: UserName,
    pub phone: Option<String>,
    pub password: Password,
    pub role: UserRole,
    /// Second-factor code expected after password login
    pub two_factor_code: TwoFactorCode,
    pub last_login_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// New self-registered account (role `user`, user name taken from
    /// the e-mail local part, random second-factor code)
    pub fn register(
        name: String,
        cpf: Cpf,
        email: Email,
        phone: Option<String>,
        password: Password,
        now: DateTime<Utc>,
    ) -> Self {
        let user_name = UserName::from_trusted(email.local_part());
        Self {
            user_id: UserId::new(),
            name,
            cpf,
            email,
            user_name,
            phone,
            password,
            role: UserRole::User,
            two_factor_code: TwoFactorCode::generate(),
            last_login_at: None,
            created_at: now,
        }
    }

    /// Whether this account is the one the identifier names
    pub fn is_identified_by(&self, identifier: &Identifier) -> bool {
        match identifier {
            Identifier::Cpf(digits) => self.cpf.as_str() == digits,
            Identifier::Email(email) => self.email.as_str() == email.to_lowercase(),
            Identifier::UserName(name) => self.user_name == UserName::from_trusted(name),
        }
    }

    /// Lockout key shared by every identifier of this account
    pub fn guard_key(&self) -> String {
        format!("account:{}", self.user_id)
    }

    pub fn record_login(&mut self, now: DateTime<Utc>) {
        self.last_login_at = Some(now);
    }
}
