//! Args demo: logs the command line it was started with.

use std::process::ExitCode;

use clap::Parser;

use podkit::config::{parse_bind_address, DEFAULT_ECHO_ADDRESS};
use podkit::http::start_server;
use podkit::logging::{self, LoggingArgs};
use podkit::routes::echo_router;
use podkit::AppError;

/// Log the container args and answer every request with a greeting
#[derive(Parser, Debug)]
#[command(name = "arg-server", version, about)]
struct Args {
    /// Address to listen on
    #[arg(short, long, default_value = DEFAULT_ECHO_ADDRESS)]
    address: String,

    /// Extra arguments, logged at startup
    #[arg(trailing_var_arg = true)]
    extra: Vec<String>,

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
            tracing::error!(error = %e, "arg-server failed");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<(), AppError> {
    let argv: Vec<String> = std::env::args().collect();
    tracing::info!(?argv, extra = ?args.extra, "Started with arguments");

    let address = parse_bind_address(&args.address)?;
    start_server(echo_router(), address).await?;
    Ok(())
}
