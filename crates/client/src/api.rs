//! Delegate capability: the transport operations behind the façade.

use std::sync::Arc;

use stockline_core::{
    Deleted, InventoryError, InventoryResult, ProductId, ProductRecord, ServiceHealth,
};

/// Transport operations offered by an inventory backend.
///
/// Implementors own validation, transport and any retry policy; callers get
/// their errors back unchanged.
pub trait InventoryApi {
    fn check_health(&self) -> InventoryResult<ServiceHealth>;

    /// Create a product; the returned record carries the assigned identifier.
    fn create_product(&self, product: ProductRecord) -> InventoryResult<ProductRecord>;

    fn list_products(&self) -> InventoryResult<Vec<ProductRecord>>;

    fn get_product(&self, id: &ProductId) -> InventoryResult<ProductRecord>;

    /// Replace a product; `product` must carry its identifier.
    fn update_product(&self, product: ProductRecord) -> InventoryResult<ProductRecord>;

    fn delete_product(&self, id: &ProductId) -> InventoryResult<Deleted>;
}

macro_rules! impl_inventory_api_via_deref {
    ($($wrapper:ty),+ $(,)?) => {
        $(
            impl<T: InventoryApi + ?Sized> InventoryApi for $wrapper {
                fn check_health(&self) -> InventoryResult<ServiceHealth> {
                    (**self).check_health()
                }

                fn create_product(&self, product: ProductRecord) -> InventoryResult<ProductRecord> {
                    (**self).create_product(product)
                }

                fn list_products(&self) -> InventoryResult<Vec<ProductRecord>> {
                    (**self).list_products()
                }

                fn get_product(&self, id: &ProductId) -> InventoryResult<ProductRecord> {
                    (**self).get_product(id)
                }

                fn update_product(&self, product: ProductRecord) -> InventoryResult<ProductRecord> {
                    (**self).update_product(product)
                }

                fn delete_product(&self, id: &ProductId) -> InventoryResult<Deleted> {
                    (**self).delete_product(id)
                }
            }
        )+
    };
}

impl_inventory_api_via_deref!(&T, Box<T>, Arc<T>);

/// Stand-in for a delegate that was never wired up.
///
/// Every operation fails with [`InventoryError::Configuration`].
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct Unconfigured;

impl Unconfigured {
    fn error() -> InventoryError {
        InventoryError::configuration("inventory delegate is not configured")
    }
}

impl InventoryApi for Unconfigured {
    fn check_health(&self) -> InventoryResult<ServiceHealth> {
        Err(Self::error())
    }

    fn create_product(&self, _product: ProductRecord) -> InventoryResult<ProductRecord> {
        Err(Self::error())
    }

    fn list_products(&self) -> InventoryResult<Vec<ProductRecord>> {
        Err(Self::error())
    }

    fn get_product(&self, _id: &ProductId) -> InventoryResult<ProductRecord> {
        Err(Self::error())
    }

    fn update_product(&self, _product: ProductRecord) -> InventoryResult<ProductRecord> {
        Err(Self::error())
    }

    fn delete_product(&self, _id: &ProductId) -> InventoryResult<Deleted> {
        Err(Self::error())
    }
}
