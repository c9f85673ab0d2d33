//! Log collector: reports write events on a single file.
//!
//! Usage: `log-collector <LOG_FILE>`. Runs until SIGTERM/SIGINT.

use std::process::ExitCode;

use clap::builder::NonEmptyStringValueParser;
use clap::Parser;

use podkit::collector::{Collector, LogReporter};
use podkit::config::CollectorConfig;
use podkit::http::shutdown_signal;
use podkit::logging::{self, LoggingArgs};
use podkit::AppError;

/// Watch a log file and report every write to it
#[derive(Parser, Debug)]
#[command(name = "log-collector", version, about)]
struct Args {
    /// File to watch; it must already exist
    #[arg(value_parser = NonEmptyStringValueParser::new())]
    log_file: String,

    #[command(flatten)]
    logging: LoggingArgs,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    logging::init(&args.logging);

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "log-collector failed");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<(), AppError> {
    let config = CollectorConfig::new(&args.log_file)?;
    tracing::info!(path = %config.path.display(), "Log file path");

    let collector = Collector::watch(&config.path)?;
    let shutdown = shutdown_signal();
    tracing::info!(path = %collector.path().display(), "Log collector started");

    collector.run(&LogReporter, shutdown).await;
    Ok(())
}
