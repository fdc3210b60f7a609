use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};
use voltbill::cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG overrides the default derived from --verbose
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(cli.log_directive())),
        )
        .init();

    cli.run()
}
