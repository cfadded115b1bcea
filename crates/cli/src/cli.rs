//! Command-line arguments.

use clap::{Args, Parser, Subcommand};
use serde_json::Value;
use stockline_client::config::{CLIENT_SECRET_ENV, EMPTY_HEADER_ENV, HOST_ENV, TIMEOUT_ENV};
use stockline_client::{ClientConfig, InventoryResult, ProductId, ProductRecord};

#[derive(Debug, Parser)]
#[command(name = "stockline", version, about = "Product inventory client")]
pub struct Cli {
    #[command(flatten)]
    pub connection: ConnectionArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// Connection flags; each one overrides its `INVENTORY_API_*` variable.
#[derive(Debug, Args)]
pub struct ConnectionArgs {
    /// Base URL of the inventory service [env: INVENTORY_API_HOST].
    #[arg(long)]
    pub host: Option<String>,

    /// Secret sent as the API key [env: INVENTORY_API_CLIENT_SECRET].
    #[arg(long)]
    pub client_secret: Option<String>,

    /// Send requests without the default headers [env: INVENTORY_API_EMPTY_HEADER].
    #[arg(long)]
    pub empty_header: bool,

    /// Request timeout in seconds [env: INVENTORY_API_TIMEOUT_SECS].
    #[arg(long)]
    pub timeout_secs: Option<u64>,
}

impl ConnectionArgs {
    /// Resolve the config from the flags, falling back to the environment.
    pub fn to_config(&self) -> InventoryResult<ClientConfig> {
        self.to_config_with(|name| std::env::var(name).ok())
    }

    /// Resolve through `lookup`; the same parsing and validation as
    /// [`ClientConfig::from_lookup`] applies to flags and variables alike.
    pub fn to_config_with(
        &self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> InventoryResult<ClientConfig> {
        ClientConfig::from_lookup(|name| {
            let explicit = match name {
                HOST_ENV => self.host.clone(),
                CLIENT_SECRET_ENV => self.client_secret.clone(),
                EMPTY_HEADER_ENV => self.empty_header.then(|| "true".to_string()),
                TIMEOUT_ENV => self.timeout_secs.map(|secs| secs.to_string()),
                _ => None,
            };
            explicit.or_else(|| lookup(name))
        })
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Check service health.
    Health,
    /// List all products.
    List,
    /// Fetch one product.
    Get { id: ProductId },
    /// Create a product.
    Create(RecordArgs),
    /// Replace a product.
    Update {
        id: ProductId,
        #[command(flatten)]
        record: RecordArgs,
    },
    /// Delete a product.
    Delete { id: ProductId },
}

#[derive(Debug, Args)]
pub struct RecordArgs {
    /// Whole record as a JSON object.
    #[arg(long, conflicts_with = "fields")]
    pub json: Option<String>,

    /// A single field; values that parse as JSON keep their type.
    #[arg(long = "field", value_name = "KEY=VALUE", value_parser = parse_field)]
    pub fields: Vec<(String, Value)>,
}

impl RecordArgs {
    pub fn into_record(self) -> anyhow::Result<ProductRecord> {
        if let Some(raw) = self.json {
            let value: Value = serde_json::from_str(&raw)?;
            return Ok(ProductRecord::from_value(value)?);
        }

        Ok(self
            .fields
            .into_iter()
            .fold(ProductRecord::new(), |record, (key, value)| record.with(key, value)))
    }
}

/// Parse `key=value`; `9.99` stays a number, `Widget` becomes a string.
pub fn parse_field(raw: &str) -> Result<(String, Value), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{raw}'"))?;

    let key = key.trim();
    if key.is_empty() {
        return Err(format!("field name missing in '{raw}'"));
    }

    let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
    Ok((key.to_string(), value))
}
