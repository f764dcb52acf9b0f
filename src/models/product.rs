use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Catalog product. Only `id` is fixed; every other field is carried through
/// untouched, so clients own the rest of the schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl Product {
    /// Decode a request payload. Fails unless the body is a JSON object with a string `id`.
    pub fn from_json(data: &[u8]) -> serde_json::Result<Self> {
        serde_json::from_slice(data)
    }
}

#[cfg(test)]
impl Product {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            attributes: Map::new(),
        }
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }
}
