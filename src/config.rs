//! Configuration types and constants.
//!
//! Every binary parses its own command line with clap and turns the result into
//! one of the typed configs below. Validation happens once, at startup, so a
//! missing value stops the process before any file, watch or listener exists.

use std::net::{SocketAddr, ToSocketAddrs};
use std::path::PathBuf;

// =============================================================================
// Response Bodies
// =============================================================================

/// Acknowledgement returned by the log server for every request
pub const ACK_BODY: &str = "got your request\n";

/// Body returned by the liveness endpoint once the probe threshold is exceeded
pub const HEALTHCHECK_FAILURE_BODY: &str = "healthcheck failed\n";

/// Message embedded in every env server response
pub const STAGE_MESSAGE: &str = "Hello From Env Server";

/// Body returned by the arg server
pub const ECHO_BODY: &str = "Hello World";

// =============================================================================
// Log Record Constants
// =============================================================================

/// Key of the fixed example attribute carried by every request record
pub const EXAMPLE_ATTRIBUTE_KEY: &str = "key";

/// Value of the fixed example attribute carried by every request record
pub const EXAMPLE_ATTRIBUTE_VALUE: &str = "value";

// =============================================================================
// Liveness Probe
// =============================================================================

/// Number of probes answered healthy before the endpoint starts failing
pub const LIVENESS_PROBE_THRESHOLD: u64 = 3;

// =============================================================================
// Default Addresses and Strings
// =============================================================================

/// Default bind address for the liveness server
pub const DEFAULT_LIVENESS_ADDRESS: &str = "0.0.0.0:8989";

/// Default bind address for the arg server
pub const DEFAULT_ECHO_ADDRESS: &str = "0.0.0.0:8080";

/// Default bind address for the hello server
pub const DEFAULT_HELLO_ADDRESS: &str = "0.0.0.0:9999";

/// Default log filter when RUST_LOG is not set
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Seconds to wait for open connections during graceful shutdown
pub const GRACEFUL_SHUTDOWN_SECS: u64 = 30;

/// Settings for the log-writing server.
#[derive(Debug, Clone)]
pub struct LogServerConfig {
    /// File every request record is appended to
    pub log_file: PathBuf,
    /// Address the HTTP listener binds to
    pub address: SocketAddr,
}

impl LogServerConfig {
    pub fn new(log_file: impl Into<PathBuf>, address: &str) -> Result<Self, ConfigError> {
        let log_file = require_path(log_file.into(), "log file path")?;
        let address = parse_bind_address(address)?;
        Ok(Self { log_file, address })
    }
}

/// Settings for the log collector.
#[derive(Debug, Clone)]
pub struct CollectorConfig {
    /// The single path watched for the lifetime of the process
    pub path: PathBuf,
}

impl CollectorConfig {
    pub fn new(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        Ok(Self {
            path: require_path(path.into(), "log file path")?,
        })
    }
}

/// Settings for the liveness server.
#[derive(Debug, Clone)]
pub struct LivenessConfig {
    pub address: SocketAddr,
    /// Probes answered healthy before failing permanently
    pub threshold: u64,
}

impl LivenessConfig {
    pub fn new(address: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            address: parse_bind_address(address)?,
            threshold: LIVENESS_PROBE_THRESHOLD,
        })
    }
}

/// Settings for the env-driven server, normally injected from a ConfigMap.
#[derive(Debug, Clone)]
pub struct StageConfig {
    pub port: u16,
    pub stage: String,
}

impl StageConfig {
    pub fn new(port: &str, stage: &str) -> Result<Self, ConfigError> {
        // Only unset or empty values count as missing; the stage is kept verbatim
        if port.is_empty() {
            return Err(ConfigError::Missing("PORT"));
        }
        if stage.is_empty() {
            return Err(ConfigError::Missing("STAGE"));
        }
        let port = port
            .parse()
            .map_err(|_| ConfigError::Validation(format!("PORT is not a valid port: {}", port)))?;

        Ok(Self {
            port,
            stage: stage.to_string(),
        })
    }

    /// Address the server listens on: every interface at the configured port
    pub fn address(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }
}

fn require_path(path: PathBuf, what: &'static str) -> Result<PathBuf, ConfigError> {
    if path.as_os_str().is_empty() {
        return Err(ConfigError::Missing(what));
    }
    Ok(path)
}

/// Parse a bind address.
///
/// Accepts a literal socket address (`127.0.0.1:8080`), a port-only form
/// (`:8080`, every interface) or a resolvable `host:port` pair.
pub fn parse_bind_address(address: &str) -> Result<SocketAddr, ConfigError> {
    let address = address.trim();
    if address.is_empty() {
        return Err(ConfigError::Missing("address"));
    }

    let candidate = if address.starts_with(':') {
        format!("0.0.0.0{}", address)
    } else {
        address.to_string()
    };

    if let Ok(addr) = candidate.parse::<SocketAddr>() {
        return Ok(addr);
    }

    candidate
        .to_socket_addrs()
        .ok()
        .and_then(|mut addrs| addrs.next())
        .ok_or_else(|| ConfigError::Validation(format!("Invalid bind address: {}", address)))
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required configuration: {0}")]
    Missing(&'static str),
    #[error("Configuration error: {0}")]
    Validation(String),
}
