//! Subcommand dispatch.

use anyhow::Context;
use serde_json::Value;
use stockline_client::{InventoryApi, InventoryClient};

use crate::cli::Command;

/// Run one subcommand and return its result as JSON.
pub fn run<D: InventoryApi>(
    client: &InventoryClient<D>,
    command: Command,
) -> anyhow::Result<Value> {
    let output = match command {
        Command::Health => {
            let health = client.check_health().context("health check failed")?;
            serde_json::to_value(health)?
        }
        Command::List => {
            let products = client.list_products().context("failed to list products")?;
            serde_json::to_value(products)?
        }
        Command::Get { id } => {
            let product = client
                .get_product(&id)
                .with_context(|| format!("failed to fetch product {id}"))?;
            serde_json::to_value(product)?
        }
        Command::Create(record) => {
            let created = client
                .create_product(record.into_record()?)
                .context("failed to create product")?;
            tracing::info!(id = ?created.id(), "product created");
            serde_json::to_value(created)?
        }
        Command::Update { id, record } => {
            let record = record.into_record()?.with_id(&id);
            let updated = client
                .update_product(record)
                .with_context(|| format!("failed to update product {id}"))?;
            tracing::info!(%id, "product updated");
            serde_json::to_value(updated)?
        }
        Command::Delete { id } => {
            let deleted = client
                .delete_product(&id)
                .with_context(|| format!("failed to delete product {id}"))?;
            tracing::info!(%id, "product deleted");
            serde_json::to_value(deleted)?
        }
    };

    Ok(output)
}
