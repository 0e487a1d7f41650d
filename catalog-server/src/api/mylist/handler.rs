//! Wish List API Handlers
//!
//! All routes require authentication and are scoped to the caller.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::ProductDetail;
use crate::db::repository::{product, sent_list, wish_list};
use crate::mail::templates;
use crate::utils::{AppError, AppResponse, AppResult, ok_with_message};

/// GET /api/mylist - the caller's saved products, catalog-style enriched
pub async fn list(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<Vec<ProductDetail>>> {
    let rows = wish_list::list_products(&state.pool, user.id).await?;
    let details = product::attach_details(&state.pool, rows).await?;
    Ok(Json(details))
}

#[derive(Debug, Deserialize)]
pub struct AddToListRequest {
    pub product_id: i64,
}

/// POST /api/mylist - save a product
pub async fn add(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(req): Json<AddToListRequest>,
) -> AppResult<Json<AppResponse<()>>> {
    wish_list::add(&state.pool, user.id, req.product_id).await?;
    Ok(ok_with_message((), "Added to list successfully"))
}

/// DELETE /api/mylist/{product_id} - remove a saved product
pub async fn remove(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(product_id): Path<i64>,
) -> AppResult<Json<AppResponse<()>>> {
    wish_list::remove(&state.pool, user.id, product_id).await?;
    Ok(ok_with_message((), "Removed from list successfully"))
}

/// POST /api/mylist/send - snapshot the list and notify the business
///
/// The send is successful once the snapshot is persisted; notification
/// delivery is best-effort and a failure is only logged.
pub async fn send(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<AppResponse<()>>> {
    let products = wish_list::list_products(&state.pool, user.id).await?;
    if products.is_empty() {
        return Err(AppError::validation("List is empty"));
    }

    let ids: Vec<i64> = products.iter().map(|p| p.id).collect();
    let snapshot = sent_list::create(&state.pool, user.id, &ids).await?;

    tracing::info!(
        user_id = %user.id,
        sent_list_id = %snapshot.id,
        items = ids.len(),
        "Wish list snapshot sent"
    );

    let (subject, html) = templates::wish_list_sent(&user.username, &products);
    if let Err(e) = state.mailer.notify_admin(&subject, html).await {
        tracing::warn!(error = %e, "Failed to send wish list notification email");
    }

    Ok(ok_with_message((), "List sent successfully"))
}
