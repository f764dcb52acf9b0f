pub mod products;

use axum::{
    body::{Body, Bytes},
    extract::{rejection::BytesRejection, State},
    response::Response,
};
use tracing::{info, warn};

use crate::{
    error::{AppError, AppResult},
    models::CustomerList,
    AppState,
};

/// Read the whole request body, turning any transport failure into a 400.
pub(crate) fn read_body(body: Result<Bytes, BytesRejection>) -> AppResult<Bytes> {
    body.map_err(|rejection| {
        warn!(%rejection, "Failed to read request body");
        AppError::UnreadableBody
    })
}

// ── Health ────────────────────────────────────────────────────────────────────

/// Echoes the repository's health document as-is, without a content type.
pub async fn health_check(State(state): State<AppState>) -> AppResult<Response> {
    let data = state.repo.health_check().await?;
    Ok(Response::new(Body::from(data)))
}

// ── Max age ───────────────────────────────────────────────────────────────────

pub async fn max_age(body: Result<Bytes, BytesRejection>) -> AppResult<String> {
    let data = read_body(body)?;

    let customers: CustomerList = serde_json::from_slice(&data).map_err(|err| {
        warn!(%err, "Rejected customer list");
        AppError::BadRequest(format!("Invalid customer list: {}", err))
    })?;

    let max = customers.max_age().ok_or_else(|| {
        warn!("Rejected empty customer list");
        AppError::BadRequest("Customer list must not be empty".to_string())
    })?;

    info!(count = customers.data.len(), max_age = max, "Computed max age");
    Ok(format!("Max age of customers is: {}", max))
}
