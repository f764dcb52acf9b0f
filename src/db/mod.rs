mod memory;
mod postgres;

pub use memory::InMemoryProductRepository;
pub use postgres::PgProductRepository;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::RepoResult;
use crate::models::Product;

/// Owner of all product state. Each operation is atomic with respect to the
/// others, so handlers can run concurrently without locking of their own.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Raw health document returned verbatim by `GET /health-check`.
    async fn health_check(&self) -> RepoResult<Vec<u8>>;

    /// Every product as a pre-serialized JSON array.
    async fn list_products(&self) -> RepoResult<Vec<u8>>;

    async fn get_product(&self, id: &str) -> RepoResult<Product>;

    /// Fails with `Duplicate` when a product with the same id is stored.
    async fn add_product(&self, product: Product) -> RepoResult<()>;

    async fn delete_product(&self, id: &str) -> RepoResult<()>;

    /// Remove `id` and store `product` in one step. Nothing changes unless both succeed.
    async fn replace_product(&self, id: &str, product: Product) -> RepoResult<()>;
}

#[derive(Debug, Serialize)]
struct HealthReport {
    status: &'static str,
    backend: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    products: Option<u64>,
    checked_at: DateTime<Utc>,
}

impl HealthReport {
    fn ok(backend: &'static str, products: Option<u64>) -> Self {
        Self {
            status: "ok",
            backend,
            products,
            checked_at: Utc::now(),
        }
    }

    fn to_bytes(&self) -> RepoResult<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }
}
