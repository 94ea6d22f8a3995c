//! HTTP gateway.
//!
//! Owns the listening socket, the cross-cutting middleware stack (request
//! ids, tracing, timeouts, CORS, body limits) and the documentation
//! endpoints. API modules stay decoupled: they hand the gateway a plain
//! `axum::Router` plus optional OpenAPI fragments.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use axum::{
    http::header, middleware::from_fn, response::IntoResponse, routing::get, Json, Router,
};
use tokio_util::sync::CancellationToken;
use tower_http::{
    cors::CorsLayer,
    limit::RequestBodyLimitLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
};

pub mod config;
pub mod openapi;
mod web;

pub use config::GatewayConfig;

/// Wrap an API router with the health route and the gateway middleware.
pub fn build_router(config: &GatewayConfig, api: Router) -> Router {
    let mut router = Router::new()
        .route("/health", get(web::health_check))
        .merge(api);

    // Correct middleware order (outermost to innermost):
    // PropagateRequestId -> SetRequestId -> push_req_id_to_extensions -> Trace -> Timeout -> CORS -> BodyLimit
    let x_request_id = httpkit::request_id::header();

    // 1. Propagate incoming x-request-id to the response
    router = router.layer(PropagateRequestIdLayer::new(x_request_id.clone()));

    // 2. Generate x-request-id when the client did not send one
    router = router.layer(SetRequestIdLayer::new(
        x_request_id,
        httpkit::request_id::MakeReqId,
    ));

    // 3. Copy the id into request extensions and the current span
    router = router.layer(from_fn(httpkit::request_id::push_req_id_to_extensions));

    // 4. Trace requests with latency and status
    router = router.layer(httpkit::request_id::create_trace_layer());

    // 5. Handler timeout
    router = router.layer(TimeoutLayer::new(Duration::from_secs(config.timeout_sec)));

    // 6. CORS (if enabled)
    if config.cors_enabled {
        router = router.layer(CorsLayer::permissive());
    }

    // 7. Body size limit
    router = router.layer(RequestBodyLimitLayer::new(config.max_body_bytes));

    router
}

/// Mount `/openapi.json` and `/docs` for a prebuilt OpenAPI document.
pub fn attach_docs(router: Router, document: serde_json::Value) -> Router {
    let document = Arc::new(document);
    router
        .route(
            "/openapi.json",
            get({
                let document = document.clone();
                move || async move {
                    let json = Json((*document).clone());
                    ([(header::CACHE_CONTROL, "no-store")], json).into_response()
                }
            }),
        )
        .route("/docs", get(web::serve_docs))
}

/// Bind the listener and serve until the token is cancelled.
pub async fn serve(addr: SocketAddr, router: Router, cancel: CancellationToken) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("HTTP server bound on {}", addr);

    let shutdown = async move {
        cancel.cancelled().await;
        tracing::info!("HTTP server shutting down gracefully (cancellation)");
    };

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await?;

    Ok(())
}
