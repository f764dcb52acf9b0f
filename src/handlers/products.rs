use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
};
use tracing::{info, warn};

use crate::{
    error::{AppError, AppResult},
    handlers::read_body,
    models::Product,
    AppState,
};

/// Successful reads answer `302 Found`; existing clients depend on it.
const READ_STATUS: StatusCode = StatusCode::FOUND;

fn json_found(data: Vec<u8>) -> impl IntoResponse {
    (READ_STATUS, [(header::CONTENT_TYPE, "application/json")], data)
}

fn decode_product(body: Result<Bytes, BytesRejection>) -> AppResult<Product> {
    let data = read_body(body)?;
    Product::from_json(&data).map_err(|err| {
        warn!(%err, "Rejected product payload");
        AppError::InvalidDataFormat
    })
}

// ── List ──────────────────────────────────────────────────────────────────────

pub async fn list_products(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let data = state.repo.list_products().await?;
    info!(bytes = data.len(), "Listed products");
    Ok(json_found(data))
}

// ── Create ────────────────────────────────────────────────────────────────────

pub async fn create_product(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> AppResult<(StatusCode, &'static str)> {
    let product = decode_product(body)?;
    let id = product.id.clone();
    state.repo.add_product(product).await?;

    info!(id = %id, "Created product");
    Ok((StatusCode::CREATED, "Added New Product"))
}

// ── Get by ID ─────────────────────────────────────────────────────────────────

pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let product = state.repo.get_product(&id).await?;
    let data = serde_json::to_vec(&product).map_err(|e| AppError::Internal(e.to_string()))?;

    info!(id = %id, "Fetched product");
    Ok(json_found(data))
}

// ── Update ────────────────────────────────────────────────────────────────────

/// Replaces the stored product wholesale. The payload is validated before the
/// repository is touched, so a bad body never removes the existing record.
pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Bytes, BytesRejection>,
) -> AppResult<StatusCode> {
    let product = decode_product(body)?;
    let new_id = product.id.clone();
    state.repo.replace_product(&id, product).await?;

    info!(id = %id, new_id = %new_id, "Updated product");
    Ok(StatusCode::ACCEPTED)
}

// ── Delete ────────────────────────────────────────────────────────────────────

pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    state.repo.delete_product(&id).await?;

    info!(id = %id, "Deleted product");
    Ok(StatusCode::ACCEPTED)
}
