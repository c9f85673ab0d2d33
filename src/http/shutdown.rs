//! Graceful shutdown and signal handling.
//!
//! Handles SIGTERM (sent by the orchestrator when a pod stops) and SIGINT.

use std::future::Future;
use std::time::Duration;

use axum_server::Handle;

use crate::config::GRACEFUL_SHUTDOWN_SECS;

/// Resolves when SIGINT or SIGTERM is received, returning the signal name.
///
/// The SIGTERM handler is installed when this is called, not when the future
/// is first polled, so a signal arriving in between is not lost.
pub fn shutdown_signal() -> impl Future<Output = &'static str> + Send {
    #[cfg(unix)]
    let mut sigterm = tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
        .expect("Failed to install SIGTERM handler");

    async move {
        let ctrl_c = async {
            tokio::signal::ctrl_c()
                .await
                .expect("Failed to install Ctrl+C handler");
        };

        #[cfg(unix)]
        let terminate = async {
            sigterm.recv().await;
        };

        #[cfg(not(unix))]
        let terminate = std::future::pending::<()>();

        tokio::select! {
            _ = ctrl_c => "SIGINT",
            _ = terminate => "SIGTERM",
        }
    }
}

/// Setup graceful shutdown on SIGTERM and SIGINT.
///
/// When either signal is received, the server will:
/// 1. Stop accepting new connections
/// 2. Wait for existing connections to complete
/// 3. Shutdown gracefully
pub fn setup_shutdown_handler(handle: Handle) {
    let signal = shutdown_signal();

    tokio::spawn(async move {
        let signal = signal.await;
        tracing::info!(signal, "Received signal, initiating graceful shutdown");

        handle.graceful_shutdown(Some(Duration::from_secs(GRACEFUL_SHUTDOWN_SECS)));
        tracing::info!(
            timeout_secs = GRACEFUL_SHUTDOWN_SECS,
            "Graceful shutdown initiated, waiting for connections to close"
        );
    });
}
