mod cli;
mod error;
mod setup;
mod terminal;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, LogLevel};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.log_level, cli.quiet);

    if let Err(err) = setup::run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

/// `RUST_LOG` wins; otherwise `--log-level`, forced to `error` by `--quiet`.
fn init_tracing(level: LogLevel, quiet: bool) {
    let level = if quiet { LogLevel::Error } else { level };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_filter())),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
