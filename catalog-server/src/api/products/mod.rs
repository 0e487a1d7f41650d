//! Product API module

mod handler;
mod multipart;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{delete, get, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/products", product_routes())
}

fn product_routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route(
            "/{id}",
            get(handler::get_by_id)
                .put(handler::update)
                .delete(handler::delete),
        )
        .route("/{id}/images/{image_id}", delete(handler::delete_image))
        .route("/{id}/main-image", put(handler::set_main_image))
        // Multipart uploads: up to 10 files of 5MB each
        .layer(DefaultBodyLimit::max(multipart::MAX_UPLOAD_BODY))
}
