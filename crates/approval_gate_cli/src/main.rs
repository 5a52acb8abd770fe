use std::io;

use approval_gate_cli::{
    check::{report, run},
    config::{ActionInputs, Cli, LogFormat},
};
use clap::Parser;
use tracing::error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Environment variable holding the log filter directives.
const LOG_FILTER_VARIABLE: &str = "APPROVAL_GATE_LOG";

fn init_logging(format: LogFormat) {
    let filter =
        EnvFilter::try_from_env(LOG_FILTER_VARIABLE).unwrap_or_else(|_| EnvFilter::new("info"));

    // Logs go to stderr so that stdout carries only workflow commands.
    match format {
        LogFormat::Text => tracing_subscriber::registry()
            .with(fmt::layer().with_writer(io::stderr))
            .with(filter)
            .init(),
        LogFormat::Json => tracing_subscriber::registry()
            .with(fmt::layer().json().with_writer(io::stderr))
            .with(filter)
            .init(),
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.log_format);

    let result = match ActionInputs::from_cli(cli) {
        Ok(inputs) => run(&inputs).await,
        Err(e) => Err(e),
    };

    let code = match report(&result, &mut io::stdout()) {
        Ok(code) => code,
        Err(e) => {
            error!("Failed to write to stdout: {e}");
            1
        }
    };
    std::process::exit(code);
}
