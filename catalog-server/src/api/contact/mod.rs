//! Contact API module

mod handler;

use axum::{Router, routing::post};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/contact/booking", post(handler::booking))
        .route("/api/contact/inquiry", post(handler::inquiry))
}
