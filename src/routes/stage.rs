//! Env-driven handler: echoes the stage injected through the environment.

use axum::{
    extract::{Request, State},
    Json,
};
use serde::Serialize;

use crate::config::STAGE_MESSAGE;
use crate::state::StageState;

#[derive(Debug, Serialize)]
pub struct StageResponse {
    pub message: &'static str,
    pub stage: String,
}

pub async fn index(State(state): State<StageState>, request: Request) -> Json<StageResponse> {
    let host = request
        .headers()
        .get(http::header::HOST)
        .and_then(|h| h.to_str().ok())
        .unwrap_or_default();
    tracing::info!(method = %request.method(), host, "Got http request");

    Json(StageResponse {
        message: STAGE_MESSAGE,
        stage: state.stage.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use crate::routes::stage_router;
    use crate::state::StageState;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_stage_is_encoded_as_json() {
        let app = stage_router(StageState::new("staging"));
        let response = app
            .oneshot(Request::builder().uri("/any/path").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["content-type"], "application/json");

        let body = to_bytes(response.into_body(), 1024).await.unwrap();
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(
            value,
            serde_json::json!({ "message": "Hello From Env Server", "stage": "staging" })
        );
    }
}
