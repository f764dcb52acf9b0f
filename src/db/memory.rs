use async_trait::async_trait;
use indexmap::IndexMap;
use tokio::sync::RwLock;

use super::{HealthReport, ProductRepository};
use crate::error::{RepoResult, RepositoryError};
use crate::models::Product;

/// Process-local store. Listing follows insertion order.
#[derive(Debug, Default)]
pub struct InMemoryProductRepository {
    products: RwLock<IndexMap<String, Product>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn health_check(&self) -> RepoResult<Vec<u8>> {
        let count = self.products.read().await.len();
        HealthReport::ok("memory", Some(count as u64)).to_bytes()
    }

    async fn list_products(&self) -> RepoResult<Vec<u8>> {
        let products = self.products.read().await;
        let all: Vec<&Product> = products.values().collect();
        Ok(serde_json::to_vec(&all)?)
    }

    async fn get_product(&self, id: &str) -> RepoResult<Product> {
        self.products
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| RepositoryError::NotFound(id.to_string()))
    }

    async fn add_product(&self, product: Product) -> RepoResult<()> {
        let mut products = self.products.write().await;
        if products.contains_key(&product.id) {
            return Err(RepositoryError::Duplicate(product.id));
        }
        products.insert(product.id.clone(), product);
        Ok(())
    }

    async fn delete_product(&self, id: &str) -> RepoResult<()> {
        self.products
            .write()
            .await
            .shift_remove(id)
            .map(|_| ())
            .ok_or_else(|| RepositoryError::NotFound(id.to_string()))
    }

    async fn replace_product(&self, id: &str, product: Product) -> RepoResult<()> {
        let mut products = self.products.write().await;
        if !products.contains_key(id) {
            return Err(RepositoryError::NotFound(id.to_string()));
        }

        if product.id == id {
            // Same key: overwrite in place and keep the listing position.
            products.insert(product.id.clone(), product);
            return Ok(());
        }

        if products.contains_key(&product.id) {
            return Err(RepositoryError::Duplicate(product.id));
        }
        products.shift_remove(id);
        products.insert(product.id.clone(), product);
        Ok(())
    }
}
