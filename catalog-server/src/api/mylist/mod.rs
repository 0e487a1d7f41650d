//! Wish List API module

mod handler;

use axum::{
    Router,
    routing::{delete, get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/mylist", mylist_routes())
}

fn mylist_routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::add))
        .route("/{product_id}", delete(handler::remove))
        .route("/send", post(handler::send))
}
