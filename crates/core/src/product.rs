use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{InventoryError, InventoryResult};
use crate::id::ProductId;

/// Name of the identifier field inside a [`ProductRecord`].
pub const ID_FIELD: &str = "id";

/// Opaque product data, shaped by whatever the inventory service accepts.
///
/// Always a JSON object. The only field this crate interprets is [`ID_FIELD`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductRecord(Map<String, Value>);

impl ProductRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an arbitrary JSON value; anything but an object is rejected.
    pub fn from_value(value: Value) -> InventoryResult<Self> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(InventoryError::validation(format!(
                "product record must be a JSON object, got {}",
                json_kind(&other)
            ))),
        }
    }

    /// Builder-style field setter.
    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(field.into(), value.into());
        self
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(field.into(), value.into())
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// The record's identifier, if it carries a usable one.
    ///
    /// Services differ on whether ids are strings or numbers; both are accepted.
    pub fn id(&self) -> Option<ProductId> {
        match self.0.get(ID_FIELD)? {
            Value::String(s) => ProductId::new(s.as_str()).ok(),
            Value::Number(n) => ProductId::new(n.to_string()).ok(),
            _ => None,
        }
    }

    pub fn set_id(&mut self, id: &ProductId) {
        self.0.insert(ID_FIELD.to_string(), Value::String(id.to_string()));
    }

    pub fn with_id(mut self, id: &ProductId) -> Self {
        self.set_id(id);
        self
    }

    pub fn without_id(mut self) -> Self {
        self.0.remove(ID_FIELD);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

impl From<Map<String, Value>> for ProductRecord {
    fn from(value: Map<String, Value>) -> Self {
        Self(value)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Health payload returned by the service; shape is service-defined.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ServiceHealth(pub Value);

impl ServiceHealth {
    /// The conventional `status` field, when present.
    pub fn status(&self) -> Option<&str> {
        self.0.get("status").and_then(Value::as_str)
    }
}

/// Confirmation that a product was deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deleted {
    pub id: ProductId,
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn from_value_rejects_non_objects() {
        let err = ProductRecord::from_value(json!([1, 2])).unwrap_err();
        assert_eq!(
            err,
            InventoryError::validation("product record must be a JSON object, got an array")
        );
    }

    #[test]
    fn serializes_transparently_as_object() {
        let record = ProductRecord::new().with("name", "Widget").with("price", 9.99);
        assert_eq!(
            serde_json::to_value(&record).unwrap(),
            json!({"name": "Widget", "price": 9.99})
        );
    }

    #[test]
    fn id_accepts_numeric_and_string_ids() {
        let numeric = ProductRecord::from_value(json!({"id": 42})).unwrap();
        assert_eq!(numeric.id().unwrap().as_str(), "42");

        let blank = ProductRecord::from_value(json!({"id": ""})).unwrap();
        assert!(blank.id().is_none());

        let nested = ProductRecord::from_value(json!({"id": {"k": 1}})).unwrap();
        assert!(nested.id().is_none());
    }

    #[test]
    fn health_status_reads_status_field() {
        let health = ServiceHealth(json!({"status": "ok"}));
        assert_eq!(health.status(), Some("ok"));
        assert_eq!(ServiceHealth(json!("up")).status(), None);
    }

    proptest! {
        #[test]
        fn with_id_then_without_id_restores_record(
            name in "[a-zA-Z ]{1,16}",
            qty in 0u32..10_000,
            raw_id in "[a-z0-9-]{1,12}",
        ) {
            let record = ProductRecord::new().with("name", name).with("quantity", qty);
            let id = ProductId::new(raw_id).unwrap();

            let tagged = record.clone().with_id(&id);
            prop_assert_eq!(tagged.id(), Some(id));
            prop_assert_eq!(tagged.without_id(), record);
        }
    }
}
