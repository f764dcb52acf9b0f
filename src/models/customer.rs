use serde::{Deserialize, Serialize};

/// A customer row posted to the max-age endpoint. Never persisted.
/// Only `age` is required; missing names and ids decode as empty strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerRecord {
    #[serde(default)]
    pub customer_id: String,
    #[serde(default)]
    pub customer_name: String,
    pub age: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerList {
    pub data: Vec<CustomerRecord>,
}

impl CustomerList {
    /// `None` when the list is empty.
    pub fn max_age(&self) -> Option<i64> {
        self.data.iter().map(|c| c.age).max()
    }
}
