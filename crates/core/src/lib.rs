//! `stockline-core` — shared types for the inventory client.
//!
//! This crate contains the **wire-independent** vocabulary: the error taxonomy,
//! product identifiers and the opaque product record (no IO, no HTTP).

pub mod error;
pub mod id;
pub mod product;

pub use error::{InventoryError, InventoryResult};
pub use id::ProductId;
pub use product::{Deleted, ID_FIELD, ProductRecord, ServiceHealth};
