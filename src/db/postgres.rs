use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::types::Json;
use sqlx::PgPool;
use tracing::info;

use super::{HealthReport, ProductRepository};
use crate::error::{RepoResult, RepositoryError};
use crate::models::Product;

/// Products stored as JSONB documents keyed by id.
#[derive(Debug, Clone)]
pub struct PgProductRepository {
    pool: PgPool,
}

impl PgProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Open a pool and bring the schema up to date.
    pub async fn connect(database_url: &str, max_connections: u32) -> anyhow::Result<Self> {
        info!("Connecting to PostgreSQL...");
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;
        info!("Database connection pool established.");

        info!("Running migrations...");
        sqlx::migrate!("./migrations").run(&pool).await?;
        info!("Migrations complete.");

        Ok(Self::new(pool))
    }
}

fn insert_error(err: sqlx::Error, id: &str) -> RepositoryError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            RepositoryError::Duplicate(id.to_string())
        }
        _ => RepositoryError::Database(err),
    }
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn health_check(&self) -> RepoResult<Vec<u8>> {
        // Liveness only; counting rows would scan the table on every probe.
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        HealthReport::ok("postgres", None).to_bytes()
    }

    async fn list_products(&self) -> RepoResult<Vec<u8>> {
        let rows = sqlx::query_as::<_, (Json<Product>,)>(
            "SELECT body FROM products ORDER BY created_at ASC, id ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        let products: Vec<Product> = rows.into_iter().map(|(Json(p),)| p).collect();
        Ok(serde_json::to_vec(&products)?)
    }

    async fn get_product(&self, id: &str) -> RepoResult<Product> {
        sqlx::query_as::<_, (Json<Product>,)>("SELECT body FROM products WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .map(|(Json(p),)| p)
            .ok_or_else(|| RepositoryError::NotFound(id.to_string()))
    }

    async fn add_product(&self, product: Product) -> RepoResult<()> {
        sqlx::query("INSERT INTO products (id, body) VALUES ($1, $2)")
            .bind(&product.id)
            .bind(Json(&product))
            .execute(&self.pool)
            .await
            .map_err(|e| insert_error(e, &product.id))?;
        Ok(())
    }

    async fn delete_product(&self, id: &str) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(id.to_string()));
        }
        Ok(())
    }

    async fn replace_product(&self, id: &str, product: Product) -> RepoResult<()> {
        if product.id == id {
            let result = sqlx::query("UPDATE products SET body = $2 WHERE id = $1")
                .bind(id)
                .bind(Json(&product))
                .execute(&self.pool)
                .await?;
            if result.rows_affected() == 0 {
                return Err(RepositoryError::NotFound(id.to_string()));
            }
            return Ok(());
        }

        // Dropping the transaction on an early return rolls it back.
        let mut tx = self.pool.begin().await?;

        let deleted = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        if deleted.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(id.to_string()));
        }

        sqlx::query("INSERT INTO products (id, body) VALUES ($1, $2)")
            .bind(&product.id)
            .bind(Json(&product))
            .execute(&mut *tx)
            .await
            .map_err(|e| insert_error(e, &product.id))?;

        tx.commit().await?;
        Ok(())
    }
}
