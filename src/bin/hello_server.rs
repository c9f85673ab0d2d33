//! Hello demo: `/hello` names the host that served the request.

use std::process::ExitCode;

use clap::Parser;

use podkit::config::{parse_bind_address, DEFAULT_HELLO_ADDRESS};
use podkit::http::start_server;
use podkit::logging::{self, LoggingArgs};
use podkit::routes::hello_router;
use podkit::AppError;

/// Answer /hello with the serving host's name
#[derive(Parser, Debug)]
#[command(name = "hello-server", version, about)]
struct Args {
    /// Address to listen on
    #[arg(short, long, default_value = DEFAULT_HELLO_ADDRESS)]
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
            tracing::error!(error = %e, "hello-server failed");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<(), AppError> {
    tracing::info!("Server is running...");
    let address = parse_bind_address(&args.address)?;
    start_server(hello_router(), address).await?;
    Ok(())
}
