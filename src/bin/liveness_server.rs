//! Liveness demo: `/healthcheck` succeeds a few times, then fails for good.

use std::process::ExitCode;

use clap::Parser;

use podkit::config::{LivenessConfig, DEFAULT_LIVENESS_ADDRESS};
use podkit::http::start_server;
use podkit::logging::{self, LoggingArgs};
use podkit::routes::liveness_router;
use podkit::state::LivenessState;
use podkit::AppError;

/// Serve a liveness probe that starts failing after a few checks
#[derive(Parser, Debug)]
#[command(name = "liveness-server", version, about)]
struct Args {
    /// Address to listen on
    #[arg(short, long, default_value = DEFAULT_LIVENESS_ADDRESS)]
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
            tracing::error!(error = %e, "liveness-server failed");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<(), AppError> {
    let config = LivenessConfig::new(&args.address)?;
    tracing::info!(
        address = %config.address,
        threshold = config.threshold,
        "Starting liveness server"
    );

    let state = LivenessState::new(config.threshold);
    let served = start_server(liveness_router(state.clone()), config.address).await;

    tracing::info!(probes = state.probes.probes(), "Liveness server stopped");
    served.map_err(AppError::from)
}
