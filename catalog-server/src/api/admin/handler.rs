//! Admin API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{Booking, SentListDetail, UnregisteredCustomer, UserPublic};
use crate::db::repository::{booking, customer, sent_list, user};
use crate::utils::{AppResponse, AppResult, ok_with_message};

/// GET /api/bookings - all bookings, current role preferred over frozen
pub async fn list_bookings(
    State(state): State<ServerState>,
    admin: CurrentUser,
) -> AppResult<Json<Vec<Booking>>> {
    admin.require_admin()?;
    let bookings = booking::find_all_for_display(&state.pool).await?;
    Ok(Json(bookings))
}

/// DELETE /api/bookings/{id}
pub async fn delete_booking(
    State(state): State<ServerState>,
    admin: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<Json<AppResponse<()>>> {
    admin.require_admin()?;
    booking::delete(&state.pool, id).await?;
    Ok(ok_with_message((), "Booking deleted successfully"))
}

/// GET /api/sent-lists - snapshots with product names resolved at read time
pub async fn list_sent_lists(
    State(state): State<ServerState>,
    admin: CurrentUser,
) -> AppResult<Json<Vec<SentListDetail>>> {
    admin.require_admin()?;
    let lists = sent_list::find_all_with_users(&state.pool).await?;
    let details = sent_list::resolve_products(&state.pool, lists).await?;
    Ok(Json(details))
}

/// DELETE /api/sent-lists/{id}
pub async fn delete_sent_list(
    State(state): State<ServerState>,
    admin: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<Json<AppResponse<()>>> {
    admin.require_admin()?;
    sent_list::delete(&state.pool, id).await?;
    Ok(ok_with_message((), "Sent list deleted successfully"))
}

/// GET /api/registered-customers - dealer/enduser accounts
pub async fn list_registered_customers(
    State(state): State<ServerState>,
    admin: CurrentUser,
) -> AppResult<Json<Vec<UserPublic>>> {
    admin.require_admin()?;
    let customers = user::find_customers(&state.pool).await?;
    Ok(Json(customers))
}

/// DELETE /api/registered-customers/{id} - removes the account and its lists
pub async fn delete_registered_customer(
    State(state): State<ServerState>,
    admin: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<Json<AppResponse<()>>> {
    admin.require_admin()?;
    user::delete_customer(&state.pool, id).await?;
    tracing::info!(user_id = %id, admin = %admin.username, "Registered customer deleted");
    Ok(ok_with_message((), "Registered customer deleted successfully"))
}

/// GET /api/unregistered-customers - contact form leads
pub async fn list_unregistered_customers(
    State(state): State<ServerState>,
    admin: CurrentUser,
) -> AppResult<Json<Vec<UnregisteredCustomer>>> {
    admin.require_admin()?;
    let customers = customer::find_all(&state.pool).await?;
    Ok(Json(customers))
}

/// DELETE /api/unregistered-customers/{id}
pub async fn delete_unregistered_customer(
    State(state): State<ServerState>,
    admin: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<Json<AppResponse<()>>> {
    admin.require_admin()?;
    customer::delete(&state.pool, id).await?;
    Ok(ok_with_message((), "Unregistered customer deleted successfully"))
}
