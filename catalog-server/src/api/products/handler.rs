//! Product API Handlers
//!
//! Reads are public; create/update/delete and the image operations
//! require the admin role.

use axum::{
    Json,
    extract::{Multipart, Path, Query, State},
};
use serde::Deserialize;

use super::multipart::{parse_product_form, remove_files, save_images};
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{ProductCreate, ProductDetail, ProductUpdate};
use crate::db::repository::product;
use crate::utils::validation::{MAX_NAME_LEN, validate_required_text};
use crate::utils::{AppError, AppResponse, AppResult, ok_with_message};

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub category: Option<String>,
    pub search: Option<String>,
}

/// GET /api/products?category=&search= - browse the catalog
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<ProductDetail>>> {
    let rows = product::find_all(
        &state.pool,
        query.category.as_deref().filter(|c| !c.is_empty()),
        query.search.as_deref().filter(|s| !s.is_empty()),
    )
    .await?;
    let details = product::attach_details(&state.pool, rows).await?;
    Ok(Json(details))
}

/// GET /api/products/{id} - single product with images and categories
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ProductDetail>> {
    let detail = product::find_detail(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Product {id}")))?;
    Ok(Json(detail))
}

/// POST /api/products - create a product (admin only, multipart)
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    mut multipart: Multipart,
) -> AppResult<Json<ProductDetail>> {
    user.require_admin()?;

    let form = parse_product_form(&mut multipart).await?;
    let brand = form.brand.clone().unwrap_or_default();
    validate_required_text(&brand, "brand", MAX_NAME_LEN)?;

    // Files land on disk before the transaction and are removed again if
    // it fails, so a rollback leaves no orphaned uploads behind.
    let uploads_dir = state.uploads_dir();
    let saved = save_images(&uploads_dir, &form.images)?;
    let mut stored = saved.iter();
    let image = stored.next().cloned();
    let additional_images: Vec<String> = stored.cloned().collect();

    let data = ProductCreate {
        name: form.name,
        brand,
        series: form.series,
        model: form.model,
        serial_number: form.serial_number,
        description: form.description,
        dealer_price: form.dealer_price,
        end_user_price: form.end_user_price,
        warranty: form.warranty,
        product_type: form.product_type,
        categories: form.categories,
        image,
        additional_images,
    };

    match product::create(&state.pool, data).await {
        Ok(detail) => {
            tracing::info!(
                product_id = %detail.product.id,
                admin = %user.username,
                images = saved.len(),
                "Product created"
            );
            Ok(Json(detail))
        }
        Err(e) => {
            remove_files(&uploads_dir, &saved);
            Err(e.into())
        }
    }
}

/// PUT /api/products/{id} - update a product (admin only, multipart)
pub async fn update(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
    mut multipart: Multipart,
) -> AppResult<Json<ProductDetail>> {
    user.require_admin()?;

    let form = parse_product_form(&mut multipart).await?;
    let brand = form.brand.clone().unwrap_or_default();
    validate_required_text(&brand, "brand", MAX_NAME_LEN)?;

    let uploads_dir = state.uploads_dir();
    let saved = save_images(&uploads_dir, &form.images)?;

    let data = ProductUpdate {
        name: form.name,
        brand,
        series: form.series,
        model: form.model,
        serial_number: form.serial_number,
        description: form.description,
        dealer_price: form.dealer_price,
        end_user_price: form.end_user_price,
        warranty: form.warranty,
        product_type: form.product_type,
        categories: form.categories,
        new_images: saved.clone(),
        keep_existing_images: form.keep_existing_images,
    };

    match product::update(&state.pool, id, data).await {
        Ok(detail) => {
            tracing::info!(product_id = %id, admin = %user.username, "Product updated");
            Ok(Json(detail))
        }
        Err(e) => {
            remove_files(&uploads_dir, &saved);
            Err(e.into())
        }
    }
}

/// DELETE /api/products/{id} - delete a product (admin only)
pub async fn delete(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<Json<AppResponse<()>>> {
    user.require_admin()?;

    product::delete(&state.pool, id).await?;
    tracing::info!(product_id = %id, admin = %user.username, "Product deleted");
    Ok(ok_with_message((), "Product deleted successfully"))
}

/// DELETE /api/products/{id}/images/{image_id} - delete one additional image
pub async fn delete_image(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path((product_id, image_id)): Path<(i64, i64)>,
) -> AppResult<Json<AppResponse<()>>> {
    user.require_admin()?;

    product::delete_image(&state.pool, product_id, image_id).await?;
    Ok(ok_with_message((), "Image deleted successfully"))
}

#[derive(Debug, Deserialize)]
pub struct SetMainImageRequest {
    pub image_path: String,
}

/// PUT /api/products/{id}/main-image - repoint the primary image reference
pub async fn set_main_image(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(product_id): Path<i64>,
    Json(req): Json<SetMainImageRequest>,
) -> AppResult<Json<AppResponse<()>>> {
    user.require_admin()?;

    if req.image_path.trim().is_empty() {
        return Err(AppError::validation("Image path is required"));
    }

    product::set_main_image(&state.pool, product_id, req.image_path.trim()).await?;
    Ok(ok_with_message((), "Main image updated successfully"))
}
