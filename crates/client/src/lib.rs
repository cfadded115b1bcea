//! `stockline-client`
//!
//! **Responsibility:** typed façade over a remote product-inventory service.
//!
//! This crate provides:
//! - [`InventoryApi`], the transport capability every delegate implements
//! - [`InventoryClient`], the façade that forwards to exactly one delegate
//! - [`HttpInventoryApi`], the blocking HTTP delegate
//! - [`InMemoryInventory`], an in-process delegate for tests and demos
//! - [`ClientConfig`], connection settings sourced from the environment

pub mod api;
pub mod client;
pub mod config;
pub mod http;
pub mod memory;

pub use api::{InventoryApi, Unconfigured};
pub use client::InventoryClient;
pub use config::ClientConfig;
pub use http::HttpInventoryApi;
pub use memory::InMemoryInventory;

pub use stockline_core::{
    Deleted, InventoryError, InventoryResult, ProductId, ProductRecord, ServiceHealth,
};
