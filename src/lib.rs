//! podkit: small services for exploring workload orchestrator concepts.
//!
//! The centrepiece is a log-shipping pair that only shares a file: `log-server`
//! appends one JSON record per HTTP request, and `log-collector` watches that
//! file for write notifications the way a sidecar would. The remaining binaries
//! are plain responders used for liveness-probe and ConfigMap demonstrations.

pub mod collector;
pub mod config;
pub mod error;
pub mod http;
pub mod logging;
pub mod middleware;
pub mod record;
pub mod routes;
pub mod sink;
pub mod state;

pub use error::*;
