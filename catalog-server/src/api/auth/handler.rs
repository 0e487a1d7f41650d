//! Authentication Handlers
//!
//! Registration and login, both issuing the same JWT credential shape.

use std::time::Duration;

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::core::ServerState;
use crate::db::models::{User, UserCreate, UserPublic, UserRole};
use crate::db::repository::user;
use crate::utils::validation::{
    MAX_EMAIL_LEN, MAX_NAME_LEN, MAX_PASSWORD_LEN, validate_required_text,
};
use crate::utils::{AppError, AppResult};

/// Fixed delay for authentication to prevent timing attacks
const AUTH_FIXED_DELAY_MS: u64 = 500;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    /// dealer | enduser - admin cannot be self-assigned
    pub role: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// Username or email
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserPublic,
}

/// POST /api/register
pub async fn register(
    State(state): State<ServerState>,
    Json(req): Json<RegisterRequest>,
) -> AppResult<Json<AuthResponse>> {
    validate_required_text(&req.username, "username", MAX_NAME_LEN)?;
    validate_required_text(&req.email, "email", MAX_EMAIL_LEN)?;
    validate_required_text(&req.password, "password", MAX_PASSWORD_LEN)?;

    let role: UserRole = req
        .role
        .parse()
        .ok()
        .filter(UserRole::is_self_assignable)
        .ok_or_else(|| AppError::validation("Invalid user type"))?;

    let password_hash = User::hash_password(&req.password)
        .map_err(|e| AppError::internal(format!("Failed to hash password: {e}")))?;

    // Uniqueness is enforced by the constraint, not a pre-check
    let created = user::create(
        &state.pool,
        UserCreate {
            username: req.username.trim().to_string(),
            email: req.email.trim().to_string(),
            password_hash,
            role,
        },
    )
    .await?;

    let token = state
        .get_jwt_service()
        .generate_token(created.id, &created.username, created.role)
        .map_err(|e| AppError::internal(format!("Failed to generate token: {e}")))?;

    tracing::info!(
        user_id = %created.id,
        username = %created.username,
        role = %created.role,
        "User registered"
    );

    Ok(Json(AuthResponse {
        token,
        user: created.into(),
    }))
}

/// POST /api/login
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    validate_required_text(&req.username, "username", MAX_EMAIL_LEN)?;
    validate_required_text(&req.password, "password", MAX_PASSWORD_LEN)?;

    let account = user::find_by_username_or_email(&state.pool, req.username.trim()).await?;

    // Fixed delay to prevent timing attacks (before checking result)
    tokio::time::sleep(Duration::from_millis(AUTH_FIXED_DELAY_MS)).await;

    // Unified error for lookup miss and password mismatch, to prevent
    // username enumeration
    let account = match account {
        Some(account) => {
            let password_valid = account
                .verify_password(&req.password)
                .map_err(|e| AppError::internal(format!("Password verification failed: {e}")))?;
            if !password_valid {
                tracing::warn!(identifier = %req.username, "Login failed - invalid credentials");
                return Err(AppError::invalid_credentials());
            }
            account
        }
        None => {
            tracing::warn!(identifier = %req.username, "Login failed - user not found");
            return Err(AppError::invalid_credentials());
        }
    };

    let token = state
        .get_jwt_service()
        .generate_token(account.id, &account.username, account.role)
        .map_err(|e| AppError::internal(format!("Failed to generate token: {e}")))?;

    tracing::info!(
        user_id = %account.id,
        username = %account.username,
        role = %account.role,
        "User logged in successfully"
    );

    Ok(Json(AuthResponse {
        token,
        user: account.into(),
    }))
}
