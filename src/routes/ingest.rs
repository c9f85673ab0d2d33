//! Catch-all handler of the log-writing server.

use axum::extract::{Request, State};

use crate::config::ACK_BODY;
use crate::middleware::RequestId;
use crate::record::LogRecord;
use crate::state::LogServerState;

/// Append one record for the request, then acknowledge it.
///
/// The response waits for the append. A failed append is logged but the
/// client still gets 200: the acknowledgement does not confirm the write.
pub async fn record(State(state): State<LogServerState>, request: Request) -> &'static str {
    let mut record = LogRecord::request(request.method(), request.uri());
    if let Some(RequestId(id)) = request.extensions().get::<RequestId>() {
        record = record.with_attr("request_id", id.to_string());
    }

    if let Err(e) = state.sink.append(&record).await {
        tracing::error!(
            error = %e,
            path = %state.sink.path().display(),
            "Failed to append log record"
        );
    }

    ACK_BODY
}

#[cfg(test)]
mod tests {
    use crate::record::LogRecord;
    use crate::routes::log_server_router;
    use crate::sink::LogSink;
    use crate::state::LogServerState;
    use axum::body::{to_bytes, Body};
    use axum::http::{Method, Request, StatusCode};
    use tower::ServiceExt;

    fn request(method: Method, uri: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn test_every_request_appends_one_record() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.log");
        let state = LogServerState::new(LogSink::open(&path).await.unwrap());
        let app = log_server_router(state);

        let calls = [
            (Method::GET, "/"),
            (Method::POST, "/orders?id=3"),
            (Method::DELETE, "/deep/nested/path"),
        ];
        for (method, uri) in calls.iter().cloned() {
            let response = app.clone().oneshot(request(method, uri)).await.unwrap();
            assert_eq!(response.status(), StatusCode::OK);
            let body = to_bytes(response.into_body(), 1024).await.unwrap();
            assert_eq!(&body[..], b"got your request\n");
        }

        let contents = std::fs::read_to_string(&path).unwrap();
        let records: Vec<LogRecord> = contents
            .lines()
            .map(|line| LogRecord::from_line(line).unwrap())
            .collect();

        assert_eq!(records.len(), 3);
        assert_eq!(records[0].msg, "GET /");
        assert_eq!(records[1].msg, "POST /orders?id=3");
        assert_eq!(records[2].msg, "DELETE /deep/nested/path");
        for record in &records {
            assert_eq!(record.attrs["key"], "value");
            assert!(record.attrs.contains_key("request_id"));
        }
    }

    #[cfg(target_os = "linux")]
    #[tokio::test]
    async fn test_failed_append_still_acknowledges() {
        // Every write to /dev/full fails with ENOSPC
        let state = LogServerState::new(LogSink::open("/dev/full").await.unwrap());
        let app = log_server_router(state);

        let response = app.oneshot(request(Method::GET, "/")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), 1024).await.unwrap();
        assert_eq!(&body[..], b"got your request\n");
    }
}
