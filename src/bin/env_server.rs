//! Env demo: reads `PORT` and `STAGE`, typically injected from a ConfigMap.

use std::process::ExitCode;

use clap::Parser;

use podkit::config::StageConfig;
use podkit::http::start_server;
use podkit::logging::{self, LoggingArgs};
use podkit::routes::stage_router;
use podkit::state::StageState;
use podkit::AppError;

/// Serve the deployment stage taken from the environment
#[derive(Parser, Debug)]
#[command(name = "env-server", version, about)]
struct Args {
    /// Port to listen on
    #[arg(long, env = "PORT")]
    port: String,

    /// Deployment stage reported in every response
    #[arg(long, env = "STAGE")]
    stage: String,

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
            tracing::error!(error = %e, "env-server failed");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<(), AppError> {
    let config = StageConfig::new(&args.port, &args.stage)?;
    tracing::info!(port = config.port, stage = %config.stage, "Server is running");

    let app = stage_router(StageState::new(&config.stage));
    start_server(app, config.address()).await?;
    Ok(())
}
