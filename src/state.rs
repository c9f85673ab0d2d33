//! Shared state for request handlers, one struct per server.

use std::sync::Arc;

use crate::routes::health::ProbeCounter;
use crate::sink::LogSink;

/// State of the log-writing server: the single shared file handle.
#[derive(Clone)]
pub struct LogServerState {
    pub sink: Arc<LogSink>,
}

impl LogServerState {
    pub fn new(sink: LogSink) -> Self {
        Self {
            sink: Arc::new(sink),
        }
    }
}

/// State of the liveness server: the process-wide probe counter.
#[derive(Clone)]
pub struct LivenessState {
    pub probes: Arc<ProbeCounter>,
}

impl LivenessState {
    pub fn new(threshold: u64) -> Self {
        Self {
            probes: Arc::new(ProbeCounter::new(threshold)),
        }
    }
}

/// State of the env-driven server.
#[derive(Clone)]
pub struct StageState {
    pub stage: Arc<str>,
}

impl StageState {
    pub fn new(stage: &str) -> Self {
        Self {
            stage: Arc::from(stage),
        }
    }
}
