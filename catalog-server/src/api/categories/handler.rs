//! Category API Handlers

use axum::{Json, extract::State};

use crate::core::ServerState;
use crate::db::repository::product;
use crate::utils::AppResult;

/// GET /api/categories - category tags currently in use
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<String>>> {
    let categories = product::distinct_categories(&state.pool).await?;
    Ok(Json(categories))
}
