//! Demo accounts
//!
//! Fixture users loaded when the server runs in demo mode. Every demo
//! account answers the second factor with a fixed code.

use chrono::{DateTime, TimeZone, Utc};
use kernel::id::{UserId, demo};

use crate::domain::entity::user::User;
use crate::domain::value_object::{
    cpf::Cpf, email::Email, password::Password, two_factor_code::TwoFactorCode,
    user_name::UserName, user_role::UserRole,
};
use crate::error::{AuthError, AuthResult};

struct DemoUser {
    user_id: UserId,
    name: &'static str,
    cpf: &'static str,
    email: &'static str,
    user_name: &'static str,
    phone: &'static str,
    password: &'static str,
    role: UserRole,
    code: &'static str,
}

const DEMO_USERS: [DemoUser; 3] = [
    DemoUser {
        user_id: demo::JOAO,
        name: "João Silva",
        cpf: "12345678900",
        email: "joao@inwista.com",
        user_name: "joao",
        phone: "(11) 98765-4321",
        password: "1234",
        role: UserRole::User,
        code: "123456",
    },
    DemoUser {
        user_id: demo::ADMIN,
        name: "Admin Inwista",
        cpf: "98765432100",
        email: "admin@inwista.com",
        user_name: "admin",
        phone: "(11) 91234-5678",
        password: "admin123",
        role: UserRole::Admin,
        code: "123456",
    },
    DemoUser {
        user_id: demo::MARIA,
        name: "Maria Santos",
        cpf: "11122233344",
        email: "maria@email.com",
        user_name: "maria",
        phone: "(21) 99876-5432",
        password: "senha123",
        role: UserRole::User,
        code: "654321",
    },
];

fn seeded_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 10, 1, 0, 0, 0)
        .single()
        .unwrap_or_else(Utc::now)
}

/// Build the demo users
pub fn demo_users() -> AuthResult<Vec<User>> {
    DEMO_USERS
        .iter()
        .map(|demo| {
            let email = Email::new(demo.email).map_err(|e| AuthError::Internal(e.to_string()))?;
            let two_factor_code =
                TwoFactorCode::parse(demo.code).map_err(|e| AuthError::Internal(e.to_string()))?;
            Ok(User {
                user_id: demo.user_id,
                name: demo.name.to_string(),
                cpf: Cpf::from_fixture(demo.cpf),
                email,
                user_name: UserName::from_trusted(demo.user_name),
                phone: Some(demo.phone.to_string()),
                password: Password::from_fixture(demo.password),
                role: demo.role,
                two_factor_code,
                last_login_at: None,
                created_at: seeded_at(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_users_load() {
        let users = demo_users().unwrap();
        assert_eq!(users.len(), 3);
        assert_eq!(users[0].user_name.as_str(), "joao");
        assert!(users[1].role.is_admin());
        assert!(users[2].password.matches("senha123"));
    }
}
