//! User Model

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Account role. Single canonical representation, translated at the
/// storage/JSON boundary only — no per-call-site casing reconciliation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Dealer,
    EndUser,
}

impl UserRole {
    /// Roles that can be self-assigned through registration
    pub fn is_self_assignable(&self) -> bool {
        matches!(self, UserRole::Dealer | UserRole::EndUser)
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserRole::Admin => write!(f, "admin"),
            UserRole::Dealer => write!(f, "dealer"),
            UserRole::EndUser => write!(f, "enduser"),
        }
    }
}

impl FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(UserRole::Admin),
            "dealer" => Ok(UserRole::Dealer),
            "enduser" => Ok(UserRole::EndUser),
            other => Err(format!("unknown user role: {other}")),
        }
    }
}

/// User entity
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: UserRole,
    pub created_at: i64,
}

/// Create user payload (password already hashed by the caller)
#[derive(Debug, Clone)]
pub struct UserCreate {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: UserRole,
}

/// User summary safe for API responses and admin listings
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct UserPublic {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub role: UserRole,
    pub created_at: i64,
}

impl From<User> for UserPublic {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            username: u.username,
            email: u.email,
            role: u.role,
            created_at: u.created_at,
        }
    }
}

impl User {
    /// Verify password using argon2
    pub fn verify_password(&self, password: &str) -> Result<bool, argon2::password_hash::Error> {
        use argon2::{
            Argon2,
            password_hash::{PasswordHash, PasswordVerifier},
        };

        let parsed_hash = PasswordHash::new(&self.password_hash)?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    /// Hash password using argon2
    pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
        use argon2::{
            Argon2,
            password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
        };

        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();
        let password_hash = argon2.hash_password(password.as_bytes(), &salt)?;
        Ok(password_hash.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trip() {
        for (s, role) in [
            ("admin", UserRole::Admin),
            ("dealer", UserRole::Dealer),
            ("enduser", UserRole::EndUser),
        ] {
            assert_eq!(s.parse::<UserRole>().unwrap(), role);
            assert_eq!(role.to_string(), s);
        }
        assert!("superuser".parse::<UserRole>().is_err());
    }

    #[test]
    fn test_self_assignable_roles() {
        assert!(!UserRole::Admin.is_self_assignable());
        assert!(UserRole::Dealer.is_self_assignable());
        assert!(UserRole::EndUser.is_self_assignable());
    }

    #[test]
    fn test_password_hash_and_verify() {
        let hash = User::hash_password("s3cret").unwrap();
        let user = User {
            id: 1,
            username: "u".into(),
            email: "u@example.com".into(),
            password_hash: hash,
            role: UserRole::EndUser,
            created_at: 0,
        };
        assert!(user.verify_password("s3cret").unwrap());
        assert!(!user.verify_password("wrong").unwrap());
    }
}
