//! cmdref CLI — cached command-reference lookup.
//!
//! Searches a remote command catalog and reads per-command reference
//! documents, caching both locally with time-based expiry.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli).await
}
