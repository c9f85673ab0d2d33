//! Catch-all greeting used to demonstrate container args.

use axum::extract::Request;

use crate::config::ECHO_BODY;

pub async fn index(request: Request) -> &'static str {
    tracing::info!(path = %request.uri().path(), "Got request");
    ECHO_BODY
}
