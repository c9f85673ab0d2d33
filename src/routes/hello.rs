//! Reports which host served the request, handy behind a load-balanced Service.

use crate::error::AppError;

pub async fn hello() -> Result<String, AppError> {
    let host = hostname::get().map_err(AppError::Hostname)?;
    tracing::info!(host = %host.to_string_lossy(), "Got hello request");

    Ok(format!("request received on host {} !\n", host.to_string_lossy()))
}

#[cfg(test)]
mod tests {
    use crate::routes::hello_router;
    use axum::body::{to_bytes, Body};
    use axum::http::{Method, Request, StatusCode};
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_hello_names_the_host() {
        let expected = hostname::get().unwrap();
        let response = hello_router()
            .oneshot(Request::builder().uri("/hello").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), 1024).await.unwrap();
        assert_eq!(
            String::from_utf8(body.to_vec()).unwrap(),
            format!("request received on host {} !\n", expected.to_string_lossy())
        );
    }

    #[tokio::test]
    async fn test_hello_answers_every_method() {
        for method in [Method::POST, Method::PUT, Method::DELETE] {
            let response = hello_router()
                .oneshot(
                    Request::builder()
                        .method(method.clone())
                        .uri("/hello")
                        .body(Body::empty())
                        .unwrap(),
                )
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK, "method {}", method);
        }
    }

    #[tokio::test]
    async fn test_other_paths_are_not_found() {
        let response = hello_router()
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
