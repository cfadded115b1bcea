//! In-memory inventory delegate.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use indexmap::IndexMap;
use serde_json::json;
use stockline_core::{
    Deleted, ID_FIELD, InventoryError, InventoryResult, ProductId, ProductRecord, ServiceHealth,
};

use crate::api::InventoryApi;

/// In-process inventory service.
///
/// Intended for tests/dev. Assigns identifiers `p1`, `p2`, ... in creation
/// order and lists products in insertion order.
#[derive(Debug, Default)]
pub struct InMemoryInventory {
    state: RwLock<State>,
}

#[derive(Debug, Default)]
struct State {
    next_seq: u64,
    products: IndexMap<ProductId, ProductRecord>,
}

impl InMemoryInventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> InventoryResult<usize> {
        Ok(self.read()?.products.len())
    }

    pub fn is_empty(&self) -> InventoryResult<bool> {
        Ok(self.len()? == 0)
    }

    fn read(&self) -> InventoryResult<RwLockReadGuard<'_, State>> {
        self.state
            .read()
            .map_err(|_| InventoryError::transport("inventory lock poisoned"))
    }

    fn write(&self) -> InventoryResult<RwLockWriteGuard<'_, State>> {
        self.state
            .write()
            .map_err(|_| InventoryError::transport("inventory lock poisoned"))
    }
}

impl InventoryApi for InMemoryInventory {
    fn check_health(&self) -> InventoryResult<ServiceHealth> {
        let state = self.read()?;
        Ok(ServiceHealth(json!({
            "status": "ok",
            "products": state.products.len(),
        })))
    }

    fn create_product(&self, product: ProductRecord) -> InventoryResult<ProductRecord> {
        if product.is_empty() {
            return Err(InventoryError::validation("product record must not be empty"));
        }
        if product.get(ID_FIELD).is_some() {
            return Err(InventoryError::validation(
                "new product must not carry an id; one is assigned on create",
            ));
        }

        let mut state = self.write()?;
        state.next_seq += 1;
        let id = ProductId::new(format!("p{}", state.next_seq))?;

        let stored = product.with_id(&id);
        state.products.insert(id, stored.clone());
        Ok(stored)
    }

    fn list_products(&self) -> InventoryResult<Vec<ProductRecord>> {
        let state = self.read()?;
        Ok(state.products.values().cloned().collect())
    }

    fn get_product(&self, id: &ProductId) -> InventoryResult<ProductRecord> {
        let state = self.read()?;
        state
            .products
            .get(id)
            .cloned()
            .ok_or_else(|| InventoryError::not_found(id.as_str()))
    }

    fn update_product(&self, product: ProductRecord) -> InventoryResult<ProductRecord> {
        let id = product
            .id()
            .ok_or_else(|| InventoryError::validation("product record must include an id"))?;

        let mut state = self.write()?;
        let slot = state
            .products
            .get_mut(&id)
            .ok_or_else(|| InventoryError::not_found(id.as_str()))?;

        // Normalize numeric ids to the stored string form.
        let product = product.with_id(&id);
        *slot = product.clone();
        Ok(product)
    }

    fn delete_product(&self, id: &ProductId) -> InventoryResult<Deleted> {
        let mut state = self.write()?;
        state
            .products
            .shift_remove(id)
            .map(|_| Deleted { id: id.clone() })
            .ok_or_else(|| InventoryError::not_found(id.as_str()))
    }
}
