//! Unregistered Customer Lead Model

use serde::{Deserialize, Serialize};

use super::UserRole;

/// Which contact form produced the lead
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum MessageType {
    Booking,
    Inquiry,
}

/// Lead captured from a contact form submitter with no registered account
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct UnregisteredCustomer {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub company_name: Option<String>,
    pub role: UserRole,
    pub message: String,
    pub message_type: MessageType,
    pub created_at: i64,
}

/// Create lead payload
#[derive(Debug, Clone)]
pub struct UnregisteredCustomerCreate {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub company_name: Option<String>,
    pub role: UserRole,
    pub message: String,
    pub message_type: MessageType,
}
