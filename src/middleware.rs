//! Per-request ID shared by diagnostic logs and appended records.
//!
//! Each request gets a UUID v4 before routing. The ID tags the request span,
//! so every diagnostic line emitted while serving it carries the same
//! `request_id`, and `log-server` writes the same value into the record it
//! appends. A line in the shared log file can then be traced back to the
//! request span that produced it.

use std::time::Instant;

use axum::{extract::Request, middleware::Next, response::Response};
use tracing::Instrument;
use uuid::Uuid;

/// ID assigned to the current request, read by handlers from extensions.
#[derive(Clone, Copy, Debug)]
pub struct RequestId(pub Uuid);

/// Assigns the request ID and runs the rest of the stack inside its span.
///
/// Installed as the outermost layer of every router.
pub async fn request_id_layer(mut request: Request, next: Next) -> Response {
    let id = RequestId(Uuid::new_v4());
    request.extensions_mut().insert(id);

    let span = tracing::info_span!(
        "request",
        request_id = %id.0,
        method = %request.method(),
        path = %request.uri().path(),
        duration_ms = tracing::field::Empty,
    );

    let start = Instant::now();
    async move {
        let response = next.run(request).await;
        let duration_ms = start.elapsed().as_millis() as u64;

        tracing::Span::current().record("duration_ms", duration_ms);
        tracing::info!(status = response.status().as_u16(), "Request served");
        response
    }
    .instrument(span)
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::routing::get;
    use axum::Router;
    use tower::ServiceExt;

    async fn echo_id(request: Request) -> String {
        request
            .extensions()
            .get::<RequestId>()
            .map(|id| id.0.to_string())
            .unwrap_or_default()
    }

    async fn id_for_one_request(app: Router) -> Uuid {
        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let body = to_bytes(response.into_body(), 1024).await.unwrap();
        Uuid::parse_str(std::str::from_utf8(&body).unwrap()).unwrap()
    }

    #[tokio::test]
    async fn test_each_request_gets_its_own_id() {
        let app = Router::new()
            .route("/", get(echo_id))
            .layer(axum::middleware::from_fn(request_id_layer));

        let first = id_for_one_request(app.clone()).await;
        let second = id_for_one_request(app).await;
        assert_ne!(first, second);
    }
}
