//! Stored documents.
//!
//! A document is a JSON object with an id kept outside the field map. Typed
//! entities and reference records are decoded from documents with serde; the
//! id is injected as an `id` field before decoding.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::core::{Entity, StoreError};

/// A raw document as returned by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Document id, unique within its collection.
    pub id: String,
    /// Field values.
    pub fields: Map<String, Value>,
}

impl Document {
    /// Create an empty document.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            fields: Map::new(),
        }
    }

    /// Build a document from a JSON value.
    ///
    /// The value must be an object. An `id` field inside it is dropped in
    /// favour of the explicit id.
    pub fn from_value(id: impl Into<String>, value: Value) -> Result<Self, StoreError> {
        match value {
            Value::Object(mut fields) => {
                fields.remove("id");
                Ok(Self {
                    id: id.into(),
                    fields,
                })
            }
            other => Err(StoreError::DecodingFailed(format!(
                "document body must be an object, got {other}"
            ))),
        }
    }

    /// Serialize a value into a document.
    pub fn from_serialize<T: Serialize>(id: impl Into<String>, value: &T) -> Result<Self, StoreError> {
        let value =
            serde_json::to_value(value).map_err(|e| StoreError::DecodingFailed(e.to_string()))?;
        Self::from_value(id, value)
    }

    /// Set a field, builder style.
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Read a field.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Read a field, treating `null` like a missing field.
    pub fn field_or_null(&self, name: &str) -> &Value {
        self.fields.get(name).unwrap_or(&Value::Null)
    }

    /// Decode into any deserializable type.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, StoreError> {
        let mut fields = self.fields.clone();
        fields.insert("id".to_string(), Value::String(self.id.clone()));
        serde_json::from_value(Value::Object(fields))
            .map_err(|e| StoreError::DecodingFailed(format!("{}: {e}", self.id)))
    }

    /// Decode into an entity.
    pub fn decode_entity<T: Entity>(&self) -> Result<T, StoreError> {
        self.decode()
    }
}
