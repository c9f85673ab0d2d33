use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::io;

use crate::collector::CollectorError;
use crate::config::ConfigError;
use crate::http::ServerError;
use crate::sink::SinkError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Sink(#[from] SinkError),

    #[error(transparent)]
    Collector(#[from] CollectorError),

    #[error(transparent)]
    Server(#[from] ServerError),

    #[error("Failed to read hostname: {0}")]
    Hostname(io::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let message = match &self {
            // The hello endpoint reports the raw failure, like the host would
            AppError::Hostname(err) => err.to_string(),
            _ => {
                tracing::error!("Internal error: {:?}", self);
                "Internal server error".to_string()
            }
        };

        (StatusCode::INTERNAL_SERVER_ERROR, message).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[tokio::test]
    async fn test_hostname_error_exposes_cause() {
        let err = AppError::Hostname(io::Error::new(io::ErrorKind::Other, "no uts namespace"));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = to_bytes(response.into_body(), 1024).await.unwrap();
        assert_eq!(&body[..], b"no uts namespace");
    }

    #[tokio::test]
    async fn test_other_errors_are_masked() {
        let err = AppError::Config(ConfigError::Missing("STAGE"));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = to_bytes(response.into_body(), 1024).await.unwrap();
        assert_eq!(&body[..], b"Internal server error");
    }
}
