//! Booking Model

use serde::{Deserialize, Serialize};

use super::UserRole;

/// Whether the submitter matched a registered account at submission time.
/// Stored verbatim ("Registered" / "Unregistered") and frozen thereafter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
pub enum RegistrationStatus {
    Registered,
    Unregistered,
}

/// Booking row. `role` and `status` are resolved against the user table
/// when the booking is written and never updated retroactively.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Booking {
    pub id: i64,
    pub email: String,
    pub phone: String,
    pub company_name: Option<String>,
    pub sender_name: String,
    pub details: String,
    pub role: UserRole,
    pub status: RegistrationStatus,
    pub created_at: i64,
}

/// Booking submission, before role/status resolution
#[derive(Debug, Clone)]
pub struct BookingSubmission {
    pub email: String,
    pub phone: String,
    pub company_name: Option<String>,
    pub sender_name: String,
    pub details: String,
    /// Caller-supplied role, only consulted when the email has no account
    pub role: Option<UserRole>,
}
