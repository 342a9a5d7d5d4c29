//! gridcypher CLI entry point

use clap::Parser;
use gridcypher::cli::{Cli, Commands};
use gridcypher::core::error::Result;
use std::process::ExitCode;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Encode(args) => gridcypher::cli::encode::run(args),
        Commands::Search(args) => gridcypher::cli::search::run(args),
        Commands::Stats(args) => gridcypher::cli::stats::run(args),
    }
}

fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_env("GRIDCYPHER_LOG"))
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            // Query failures are the user's input, not a broken corpus or config.
            if e.is_query_error() {
                ExitCode::from(2)
            } else {
                ExitCode::FAILURE
            }
        }
    }
}
