//! Binary crate for the `forecast` tool.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Interactive configuration
//! - Terminal and HTML rendering of forecasts
//! - The HTTP route surface

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod display;
mod pages;
mod web;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cmd = cli::Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(cmd.command.default_log_filter())),
        )
        .with_writer(std::io::stderr)
        .init();

    cmd.run().await
}
