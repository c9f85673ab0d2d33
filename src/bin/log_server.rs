//! Log-writing server: appends one JSON record per request to a file.
//!
//! Usage: `log-server <LOG_FILE> <ADDRESS>`. Pair it with `log-collector`
//! watching the same file on a shared volume.

use std::process::ExitCode;

use clap::builder::NonEmptyStringValueParser;
use clap::Parser;

use podkit::config::LogServerConfig;
use podkit::http::start_server;
use podkit::logging::{self, LoggingArgs};
use podkit::routes::log_server_router;
use podkit::sink::LogSink;
use podkit::state::LogServerState;
use podkit::AppError;

/// Append a structured record to a log file for every HTTP request
#[derive(Parser, Debug)]
#[command(name = "log-server", version, about)]
struct Args {
    /// File the records are appended to (created if missing)
    #[arg(value_parser = NonEmptyStringValueParser::new())]
    log_file: String,

    /// Address to listen on, e.g. 0.0.0.0:8080 or :8080
    #[arg(value_parser = NonEmptyStringValueParser::new())]
    address: String,

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
            tracing::error!(error = %e, "log-server failed");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<(), AppError> {
    let config = LogServerConfig::new(&args.log_file, &args.address)?;
    tracing::info!(
        log_file = %config.log_file.display(),
        address = %config.address,
        "Loaded configuration"
    );

    let sink = LogSink::open(&config.log_file).await?;
    tracing::info!(path = %sink.path().display(), "Opened log file for appending");

    let state = LogServerState::new(sink);
    let app = log_server_router(state.clone());

    let served = start_server(app, config.address).await;

    // Flush whatever the handlers wrote before reporting the outcome
    state.sink.close().await?;
    tracing::info!("Log file closed");

    served.map_err(AppError::from)
}
