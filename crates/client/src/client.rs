//! The inventory façade.

use stockline_core::{Deleted, InventoryResult, ProductId, ProductRecord, ServiceHealth};
use tracing::debug;

use crate::api::{InventoryApi, Unconfigured};
use crate::config::ClientConfig;
use crate::http::HttpInventoryApi;

/// Typed façade over an inventory delegate.
///
/// The delegate is fixed at construction and never replaced. Every operation
/// forwards its argument unchanged and returns whatever the delegate returns.
#[derive(Debug, Clone)]
pub struct InventoryClient<D> {
    delegate: D,
}

impl<D: InventoryApi> InventoryClient<D> {
    pub fn new(delegate: D) -> Self {
        Self { delegate }
    }

    pub fn delegate(&self) -> &D {
        &self.delegate
    }

    pub fn into_delegate(self) -> D {
        self.delegate
    }

    pub fn check_health(&self) -> InventoryResult<ServiceHealth> {
        debug!(operation = "check_health", "forwarding to inventory delegate");
        self.delegate.check_health()
    }

    pub fn create_product(&self, product: ProductRecord) -> InventoryResult<ProductRecord> {
        debug!(
            operation = "create_product",
            fields = product.len(),
            "forwarding to inventory delegate"
        );
        self.delegate.create_product(product)
    }

    pub fn list_products(&self) -> InventoryResult<Vec<ProductRecord>> {
        debug!(operation = "list_products", "forwarding to inventory delegate");
        self.delegate.list_products()
    }

    pub fn get_product(&self, id: &ProductId) -> InventoryResult<ProductRecord> {
        debug!(operation = "get_product", %id, "forwarding to inventory delegate");
        self.delegate.get_product(id)
    }

    pub fn update_product(&self, product: ProductRecord) -> InventoryResult<ProductRecord> {
        debug!(
            operation = "update_product",
            fields = product.len(),
            "forwarding to inventory delegate"
        );
        self.delegate.update_product(product)
    }

    pub fn delete_product(&self, id: &ProductId) -> InventoryResult<Deleted> {
        debug!(operation = "delete_product", %id, "forwarding to inventory delegate");
        self.delegate.delete_product(id)
    }
}

impl InventoryClient<HttpInventoryApi> {
    /// Connect to the service described by `config`.
    pub fn connect(config: ClientConfig) -> InventoryResult<Self> {
        Ok(Self::new(HttpInventoryApi::new(config)?))
    }

    /// Connect using [`ClientConfig::from_env`].
    pub fn from_env() -> InventoryResult<Self> {
        Self::connect(ClientConfig::from_env()?)
    }

    pub fn config(&self) -> &ClientConfig {
        self.delegate.config()
    }
}

impl InventoryClient<Unconfigured> {
    /// A client whose delegate was never wired; every call fails with a
    /// configuration error.
    pub fn unconfigured() -> Self {
        Self::new(Unconfigured)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use serde_json::json;
    use stockline_core::InventoryError;

    use super::*;
    use crate::memory::InMemoryInventory;

    fn id(raw: &str) -> ProductId {
        ProductId::new(raw).unwrap()
    }

    fn widget() -> ProductRecord {
        ProductRecord::new().with("name", "Widget").with("price", 9.99)
    }

    #[test]
    fn every_operation_fails_when_delegate_is_missing() {
        let client: InventoryClient<Unconfigured> = InventoryClient::unconfigured();

        let errors = vec![
            client.check_health().unwrap_err(),
            client.create_product(widget()).unwrap_err(),
            client.list_products().unwrap_err(),
            client.get_product(&id("p1")).unwrap_err(),
            client.update_product(widget().with("id", "p1")).unwrap_err(),
            client.delete_product(&id("p1")).unwrap_err(),
        ];

        for err in errors {
            assert_eq!(
                err,
                InventoryError::configuration("inventory delegate is not configured")
            );
        }
    }

    #[test]
    fn create_then_get_round_trips_the_record() {
        let client = InventoryClient::new(InMemoryInventory::new());

        let created = client.create_product(widget()).unwrap();
        let product_id = created.id().unwrap();

        let fetched = client.get_product(&product_id).unwrap();
        assert_eq!(fetched, created);
        assert_eq!(fetched.without_id(), widget());
    }

    #[test]
    fn delete_then_get_is_not_found() {
        let client = InventoryClient::new(InMemoryInventory::new());
        let product_id = client.create_product(widget()).unwrap().id().unwrap();

        let deleted = client.delete_product(&product_id).unwrap();
        assert_eq!(deleted.id, product_id);

        let err = client.get_product(&product_id).unwrap_err();
        assert_eq!(err, InventoryError::not_found("p1"));

        let err = client.delete_product(&product_id).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn update_of_unknown_id_is_not_found_rather_than_invalid() {
        let client = InventoryClient::new(InMemoryInventory::new());

        let err = client
            .update_product(widget().with("id", "missing"))
            .unwrap_err();
        assert_eq!(err, InventoryError::not_found("missing"));
    }

    #[test]
    fn update_replaces_the_stored_record() {
        let client = InventoryClient::new(InMemoryInventory::new());
        let created = client.create_product(widget()).unwrap();

        let changed = created.clone().with("price", 12.5);
        let updated = client.update_product(changed.clone()).unwrap();
        assert_eq!(updated, changed);
        assert_eq!(client.get_product(&created.id().unwrap()).unwrap(), changed);
    }

    #[test]
    fn created_widget_appears_in_listing() {
        let client = InventoryClient::new(InMemoryInventory::new());
        client.create_product(widget()).unwrap();

        let listed: Vec<_> = client
            .list_products()
            .unwrap()
            .into_iter()
            .map(ProductRecord::into_value)
            .collect();
        assert_eq!(listed, vec![json!({"id": "p1", "name": "Widget", "price": 9.99})]);
    }

    #[test]
    fn clients_can_share_one_delegate() {
        let inventory = Arc::new(InMemoryInventory::new());
        let writer = InventoryClient::new(Arc::clone(&inventory));
        let reader = InventoryClient::new(&*inventory);

        writer.create_product(widget()).unwrap();
        assert_eq!(reader.list_products().unwrap().len(), 1);
    }

    /// Delegate that records what it was asked and echoes inputs back.
    #[derive(Default)]
    struct Recorder {
        calls: Mutex<Vec<String>>,
    }

    impl Recorder {
        fn log(&self, entry: String) {
            self.calls.lock().unwrap().push(entry);
        }
    }

    impl InventoryApi for Recorder {
        fn check_health(&self) -> InventoryResult<ServiceHealth> {
            self.log("check_health".into());
            Ok(ServiceHealth(json!("up")))
        }

        fn create_product(&self, product: ProductRecord) -> InventoryResult<ProductRecord> {
            self.log(format!("create_product {}", product.clone().into_value()));
            Ok(product)
        }

        fn list_products(&self) -> InventoryResult<Vec<ProductRecord>> {
            self.log("list_products".into());
            Err(InventoryError::transport("connection reset"))
        }

        fn get_product(&self, id: &ProductId) -> InventoryResult<ProductRecord> {
            self.log(format!("get_product {id}"));
            Err(InventoryError::not_found(id.as_str()))
        }

        fn update_product(&self, product: ProductRecord) -> InventoryResult<ProductRecord> {
            self.log(format!("update_product {}", product.clone().into_value()));
            Err(InventoryError::validation("price must be positive"))
        }

        fn delete_product(&self, id: &ProductId) -> InventoryResult<Deleted> {
            self.log(format!("delete_product {id}"));
            Ok(Deleted { id: id.clone() })
        }
    }

    #[test]
    fn forwards_arguments_and_results_unchanged() {
        let client = InventoryClient::new(Recorder::default());

        assert_eq!(client.check_health().unwrap(), ServiceHealth(json!("up")));
        assert_eq!(client.create_product(widget()).unwrap(), widget());
        assert_eq!(
            client.list_products().unwrap_err(),
            InventoryError::transport("connection reset")
        );
        assert_eq!(
            client.get_product(&id("x9")).unwrap_err(),
            InventoryError::not_found("x9")
        );
        assert_eq!(
            client.update_product(widget().with("id", "x9")).unwrap_err(),
            InventoryError::validation("price must be positive")
        );
        assert_eq!(client.delete_product(&id("x9")).unwrap().id, id("x9"));

        let calls = client.into_delegate().calls.into_inner().unwrap();
        assert_eq!(
            calls,
            vec![
                "check_health".to_string(),
                r#"create_product {"name":"Widget","price":9.99}"#.to_string(),
                "list_products".to_string(),
                "get_product x9".to_string(),
                r#"update_product {"id":"x9","name":"Widget","price":9.99}"#.to_string(),
                "delete_product x9".to_string(),
            ]
        );
    }
}
