//! Booking Repository
//!
//! Bookings freeze the submitter's role and registration status at write
//! time by resolving the email against the user table. The frozen fields
//! are never updated, even if the submitter registers later.

use super::{RepoError, RepoResult};
use crate::db::models::{
    Booking, BookingSubmission, MessageType, RegistrationStatus, UnregisteredCustomerCreate,
};
use crate::db::repository::{customer, user};
use crate::utils::{now_millis, snowflake_id};
use sqlx::SqlitePool;

const BOOKING_SELECT: &str =
    "SELECT id, email, phone, company_name, sender_name, details, role, status, created_at FROM booking";

/// Record a booking submission.
///
/// Registered email → the account's actual role, status Registered, and no
/// lead row. Unregistered email → the caller-supplied role is required, a
/// lead row (message type booking) is written for admin follow-up, status
/// Unregistered.
pub async fn record(pool: &SqlitePool, submission: BookingSubmission) -> RepoResult<Booking> {
    let account = user::find_by_email(pool, &submission.email).await?;

    let (role, status) = match &account {
        Some(account) => (account.role, RegistrationStatus::Registered),
        None => {
            let role = submission.role.ok_or_else(|| {
                RepoError::Validation("User type is required for unregistered users".to_string())
            })?;
            customer::create(
                pool,
                UnregisteredCustomerCreate {
                    name: submission.sender_name.clone(),
                    email: submission.email.clone(),
                    phone: Some(submission.phone.clone()),
                    company_name: submission.company_name.clone(),
                    role,
                    message: submission.details.clone(),
                    message_type: MessageType::Booking,
                },
            )
            .await?;
            (role, RegistrationStatus::Unregistered)
        }
    };

    let id = snowflake_id();
    sqlx::query(
        "INSERT INTO booking (id, email, phone, company_name, sender_name, details, role, status, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
    )
    .bind(id)
    .bind(&submission.email)
    .bind(&submission.phone)
    .bind(&submission.company_name)
    .bind(&submission.sender_name)
    .bind(&submission.details)
    .bind(role)
    .bind(status)
    .bind(now_millis())
    .execute(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create booking".into()))
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Booking>> {
    let sql = format!("{BOOKING_SELECT} WHERE id = ?1");
    let row = sqlx::query_as::<_, Booking>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Admin listing: the display role prefers the current account (the
/// submitter may have changed role since), falling back to the frozen
/// booking-time fields when no account matches the email anymore.
pub async fn find_all_for_display(pool: &SqlitePool) -> RepoResult<Vec<Booking>> {
    let rows = sqlx::query_as::<_, Booking>(
        "SELECT b.id, b.email, b.phone, b.company_name, b.sender_name, b.details,
                COALESCE(u.role, b.role) AS role,
                CASE WHEN u.id IS NOT NULL THEN 'Registered' ELSE b.status END AS status,
                b.created_at
         FROM booking b LEFT JOIN user u ON u.email = b.email
         ORDER BY b.created_at DESC",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<()> {
    let result = sqlx::query("DELETE FROM booking WHERE id = ?1")
        .bind(id)
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Booking {id} not found")));
    }
    Ok(())
}
