//! Binary crate for the `route-weather` service.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Interactive configuration
//! - Serving the weather lookup over HTTP

use clap::Parser;

mod cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    route_weather_server::init_logging();

    let cmd = cli::Cli::parse();
    cmd.run().await
}
