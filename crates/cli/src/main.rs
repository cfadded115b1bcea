//! `stockline` — drive the inventory service from a terminal.

mod cli;
mod commands;

use anyhow::Context;
use clap::Parser;
use stockline_client::InventoryClient;

fn main() -> anyhow::Result<()> {
    stockline_observability::init();

    let cli = cli::Cli::parse();
    let config = cli
        .connection
        .to_config()
        .context("invalid inventory connection settings")?;
    tracing::debug!(?config, "connecting to inventory service");

    let client = InventoryClient::connect(config).context("failed to build inventory client")?;
    let output = commands::run(&client, cli.command)?;

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
