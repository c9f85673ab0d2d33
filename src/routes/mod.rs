//! HTTP route handlers, one router per server binary.
//!
//! Every router is wrapped in the request ID middleware so each request gets
//! a span with a unique ID for log correlation.

pub mod echo;
pub mod health;
pub mod hello;
pub mod ingest;
pub mod stage;

use axum::{
    middleware,
    routing::{any, get},
    Router,
};
use http::header::{HeaderValue, CACHE_CONTROL};
use tower_http::set_header::SetResponseHeaderLayer;

use crate::middleware::request_id_layer;
use crate::state::{LivenessState, LogServerState, StageState};

/// Log server: every method on every path appends a record.
pub fn log_server_router(state: LogServerState) -> Router {
    Router::new()
        .fallback(ingest::record)
        .with_state(state)
        .layer(middleware::from_fn(request_id_layer))
}

/// Liveness server: the probe endpoint only.
pub fn liveness_router(state: LivenessState) -> Router {
    // No caching, probes must always reach the counter
    Router::new()
        .route("/healthcheck", get(health::healthcheck))
        .layer(SetResponseHeaderLayer::overriding(
            CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
        .with_state(state)
        .layer(middleware::from_fn(request_id_layer))
}

/// Env server: every path answers with the configured stage.
pub fn stage_router(state: StageState) -> Router {
    Router::new()
        .fallback(stage::index)
        .with_state(state)
        .layer(middleware::from_fn(request_id_layer))
}

/// Hello server: reports the host that served the request, for any method.
pub fn hello_router() -> Router {
    Router::new()
        .route("/hello", any(hello::hello))
        .layer(middleware::from_fn(request_id_layer))
}

/// Arg server: every path answers with a fixed greeting.
pub fn echo_router() -> Router {
    Router::new()
        .fallback(echo::index)
        .layer(middleware::from_fn(request_id_layer))
}
