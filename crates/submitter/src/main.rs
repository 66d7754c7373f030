//! Celestia blob submitter.
//!
//! This binary submits a text payload to Celestia through a light node:
//! - settings validation (file + environment)
//! - auth token acquisition
//! - `state.SubmitPayForBlob` over JSON-RPC

#![warn(missing_docs)]

mod cli;
mod config;

use clap::Parser;
use eyre::Result;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let cli = Cli::parse();
    cli.run().await
}
