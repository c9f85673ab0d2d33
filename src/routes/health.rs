//! Liveness probe endpoint that deliberately starts failing.
//!
//! The first `threshold` probes succeed; every later probe answers 500, so the
//! orchestrator eventually restarts the container. The counter lives for the
//! whole process and is never reset.

use std::sync::atomic::{AtomicU64, Ordering};

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::config::HEALTHCHECK_FAILURE_BODY;
use crate::state::LivenessState;

/// Process-wide probe counter.
#[derive(Debug)]
pub struct ProbeCounter {
    count: AtomicU64,
    threshold: u64,
}

/// Outcome of a single probe
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Probe {
    /// 1-based position of this probe in completion order
    pub number: u64,
    pub healthy: bool,
}

impl ProbeCounter {
    pub fn new(threshold: u64) -> Self {
        Self {
            count: AtomicU64::new(0),
            threshold,
        }
    }

    /// Count a probe and decide its outcome in one atomic step.
    ///
    /// Concurrent callers each get a distinct number; which caller gets which
    /// number follows increment order, not arrival order.
    pub fn record_probe(&self) -> Probe {
        let number = self.count.fetch_add(1, Ordering::Relaxed) + 1;
        Probe {
            number,
            healthy: number <= self.threshold,
        }
    }

    /// Probes counted so far
    pub fn probes(&self) -> u64 {
        self.count.load(Ordering::Relaxed)
    }
}

/// Liveness handler: empty 200 while under the threshold, 500 afterwards.
pub async fn healthcheck(State(state): State<LivenessState>) -> Response {
    let probe = state.probes.record_probe();
    tracing::info!(probe = probe.number, "Got healthcheck request");

    if probe.healthy {
        StatusCode::OK.into_response()
    } else {
        tracing::error!(probe = probe.number, "Healthcheck failed");
        (StatusCode::INTERNAL_SERVER_ERROR, HEALTHCHECK_FAILURE_BODY).into_response()
    }
}
