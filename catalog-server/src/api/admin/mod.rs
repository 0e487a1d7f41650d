//! Admin API module
//!
//! Dashboard listings: bookings, sent lists, registered and unregistered
//! customers. Every route requires the admin role.

mod handler;

use axum::{
    Router,
    routing::{delete, get},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/bookings", get(handler::list_bookings))
        .route("/api/bookings/{id}", delete(handler::delete_booking))
        .route("/api/sent-lists", get(handler::list_sent_lists))
        .route("/api/sent-lists/{id}", delete(handler::delete_sent_list))
        .route(
            "/api/registered-customers",
            get(handler::list_registered_customers),
        )
        .route(
            "/api/registered-customers/{id}",
            delete(handler::delete_registered_customer),
        )
        .route(
            "/api/unregistered-customers",
            get(handler::list_unregistered_customers),
        )
        .route(
            "/api/unregistered-customers/{id}",
            delete(handler::delete_unregistered_customer),
        )
}
