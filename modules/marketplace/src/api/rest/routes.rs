use std::sync::Arc;

use axum::{
    routing::{get, post, put},
    Extension, Router,
};

use crate::api::rest::handlers;
use crate::domain::service::Service;

/// Build the module router with the service injected as an extension.
pub fn router(service: Arc<Service>) -> Router {
    Router::new()
        .route("/users", get(handlers::list_users))
        .route(
            "/users/{id}",
            put(handlers::put_user)
                .get(handlers::get_user)
                .delete(handlers::delete_user),
        )
        .route("/venues", get(handlers::list_venues))
        .route(
            "/venues/{id}",
            put(handlers::put_venue)
                .get(handlers::get_venue)
                .delete(handlers::delete_venue),
        )
        .route("/venues/{id}/buy", post(handlers::buy_venue))
        .layer(Extension(service))
}
