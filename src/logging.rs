//! Diagnostic logging setup shared by every binary.
//!
//! This is the process's own output (startup messages, request spans, watcher
//! reports), separate from the record file written by `log-server`.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::DEFAULT_LOG_FILTER;

/// Output format for diagnostic logs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Text,
    /// One JSON object per event
    Json,
}

/// Logging flags, flattened into each binary's arguments
#[derive(Debug, Clone, clap::Args)]
pub struct LoggingArgs {
    /// Log level filter (e.g., "info" or "podkit=debug")
    #[arg(short, long)]
    pub log_level: Option<String>,

    /// Log output format
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

/// Pick the filter with priority: CLI > env > default.
pub fn resolve_filter(cli: Option<&str>, env: Option<String>) -> String {
    cli.map(str::to_string)
        .or(env)
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string())
}

/// Install the global subscriber. Call once, first thing in `main`.
pub fn init(args: &LoggingArgs) {
    let log_filter = resolve_filter(args.log_level.as_deref(), std::env::var("RUST_LOG").ok());
    let registry = tracing_subscriber::registry().with(EnvFilter::new(&log_filter));

    match args.log_format {
        LogFormat::Text => registry.with(tracing_subscriber::fmt::layer()).init(),
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json())
            .init(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_filter_prefers_cli() {
        let filter = resolve_filter(Some("debug"), Some("warn".to_string()));
        assert_eq!(filter, "debug");
    }

    #[test]
    fn test_resolve_filter_falls_back_to_env() {
        assert_eq!(resolve_filter(None, Some("warn".to_string())), "warn");
    }

    #[test]
    fn test_resolve_filter_default() {
        assert_eq!(resolve_filter(None, None), DEFAULT_LOG_FILTER);
    }
}
