//! Contact API Handlers
//!
//! Public booking and inquiry forms. Data is persisted first; the
//! notification email is best-effort and never blocks the submission.

use axum::{Json, extract::State};
use serde::Deserialize;

use crate::core::ServerState;
use crate::db::models::{
    BookingSubmission, MessageType, UnregisteredCustomerCreate, UserRole,
};
use crate::db::repository::{booking, customer, user};
use crate::mail::templates;
use crate::utils::validation::{
    MAX_EMAIL_LEN, MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, MAX_TEXT_LEN, validate_optional_text,
    validate_required_text,
};
use crate::utils::{AppError, AppResponse, AppResult, ok_with_message};

#[derive(Debug, Deserialize)]
pub struct BookingRequest {
    pub email: String,
    pub phone: String,
    pub company_name: Option<String>,
    pub sender_name: String,
    pub details: String,
    /// dealer | enduser, required when the email has no account
    pub role: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct InquiryRequest {
    pub name: String,
    pub email: String,
    pub topic: String,
    pub description: String,
    /// dealer | enduser, required when the email has no account
    pub role: Option<String>,
}

fn parse_submitted_role(role: &Option<String>) -> AppResult<Option<UserRole>> {
    match role {
        None => Ok(None),
        Some(value) => {
            let role: UserRole = value
                .parse()
                .ok()
                .filter(UserRole::is_self_assignable)
                .ok_or_else(|| AppError::validation("Invalid user type"))?;
            Ok(Some(role))
        }
    }
}

/// POST /api/contact/booking
pub async fn booking(
    State(state): State<ServerState>,
    Json(req): Json<BookingRequest>,
) -> AppResult<Json<AppResponse<()>>> {
    validate_required_text(&req.email, "email", MAX_EMAIL_LEN)?;
    validate_required_text(&req.phone, "phone", MAX_SHORT_TEXT_LEN)?;
    validate_required_text(&req.sender_name, "sender_name", MAX_NAME_LEN)?;
    validate_required_text(&req.details, "details", MAX_TEXT_LEN)?;
    validate_optional_text(&req.company_name, "company_name", MAX_NAME_LEN)?;

    let submission = BookingSubmission {
        email: req.email.trim().to_string(),
        phone: req.phone.trim().to_string(),
        company_name: req.company_name.clone(),
        sender_name: req.sender_name.trim().to_string(),
        details: req.details.clone(),
        role: parse_submitted_role(&req.role)?,
    };

    let (subject, html) = templates::booking_received(&submission);
    let recorded = booking::record(&state.pool, submission).await?;

    tracing::info!(
        booking_id = %recorded.id,
        status = ?recorded.status,
        "Booking recorded"
    );

    if let Err(e) = state.mailer.notify_admin(&subject, html).await {
        tracing::warn!(error = %e, "Failed to send booking notification email");
    }

    Ok(ok_with_message((), "Booking request sent successfully"))
}

/// POST /api/contact/inquiry
///
/// Unregistered submitters are persisted as leads; registered-user
/// inquiries are only emailed, matching the long-standing site behavior.
pub async fn inquiry(
    State(state): State<ServerState>,
    Json(req): Json<InquiryRequest>,
) -> AppResult<Json<AppResponse<()>>> {
    validate_required_text(&req.name, "name", MAX_NAME_LEN)?;
    validate_required_text(&req.email, "email", MAX_EMAIL_LEN)?;
    validate_required_text(&req.topic, "topic", MAX_NAME_LEN)?;
    validate_required_text(&req.description, "description", MAX_TEXT_LEN)?;

    let email = req.email.trim().to_string();
    let account = user::find_by_email(&state.pool, &email).await?;

    if account.is_none() {
        let role = parse_submitted_role(&req.role)?.ok_or_else(|| {
            AppError::validation("User type is required for unregistered users")
        })?;
        customer::create(
            &state.pool,
            UnregisteredCustomerCreate {
                name: req.name.trim().to_string(),
                email: email.clone(),
                phone: None,
                company_name: None,
                role,
                message: req.description.clone(),
                message_type: MessageType::Inquiry,
            },
        )
        .await?;
    }

    let (subject, html) =
        templates::inquiry_received(&req.name, &email, &req.topic, &req.description);
    if let Err(e) = state.mailer.notify_admin(&subject, html).await {
        tracing::warn!(error = %e, "Failed to send inquiry notification email");
    }

    Ok(ok_with_message((), "Inquiry sent successfully"))
}
