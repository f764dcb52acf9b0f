//! Router fixtures shared by the handler tests.

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{HeaderMap, Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use crate::db::{InMemoryProductRepository, ProductRepository};
use crate::error::{RepoResult, RepositoryError};
use crate::models::Product;
use crate::{build_router, AppState};

pub fn memory_app() -> Router {
    build_router(AppState::new(Arc::new(InMemoryProductRepository::new())))
}

pub fn failing_app() -> Router {
    build_router(AppState::new(Arc::new(FailingRepository)))
}

pub async fn send(
    app: Router,
    method: Method,
    uri: &str,
    body: &str,
) -> (StatusCode, HeaderMap, Vec<u8>) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, headers, bytes.to_vec())
}

/// Every call fails as if the database were down.
pub struct FailingRepository;

fn outage<T>() -> RepoResult<T> {
    Err(RepositoryError::Database(sqlx::Error::PoolTimedOut))
}

#[async_trait]
impl ProductRepository for FailingRepository {
    async fn health_check(&self) -> RepoResult<Vec<u8>> {
        outage()
    }

    async fn list_products(&self) -> RepoResult<Vec<u8>> {
        outage()
    }

    async fn get_product(&self, _id: &str) -> RepoResult<Product> {
        outage()
    }

    async fn add_product(&self, _product: Product) -> RepoResult<()> {
        outage()
    }

    async fn delete_product(&self, _id: &str) -> RepoResult<()> {
        outage()
    }

    async fn replace_product(&self, _id: &str, _product: Product) -> RepoResult<()> {
        outage()
    }
}
