pub mod employee;
pub mod exhibition;
pub mod login;
pub mod report;

use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};

use crate::backend::{Gateway, SqlValue};
use crate::error::{AppError, AppResult};
use crate::schema::{Reference, ResourceSchema};
use crate::state::AppState;

pub const ROUTE_NOT_FOUND: &str = "Route not found";

pub async fn welcome() -> Json<Value> {
    Json(json!({ "message": "Welcome to the Museum Database API" }))
}

pub async fn health(State(state): State<AppState>) -> AppResult<Json<Value>> {
    state
        .gateway
        .health_check()
        .await
        .map_err(|e| e.in_context("Database unavailable"))?;

    Ok(Json(json!({
        "status": "ok",
        "database": format!("{:?}", state.gateway.database_type()),
    })))
}

/// Fallback for unknown paths and methods
pub async fn not_found() -> AppError {
    AppError::NotFound(ROUTE_NOT_FOUND.to_string())
}

/// Fail with 404 unless the referenced row exists
pub async fn ensure_exists(gateway: &dyn Gateway, reference: &Reference, id: i64) -> AppResult<()> {
    let found = gateway
        .fetch_optional(&reference.exists_sql(), &[SqlValue::Integer(id)])
        .await
        .map_err(|e| e.in_context(&format!("Error retrieving {}", reference.label.to_lowercase())))?;

    match found {
        Some(_) => Ok(()),
        None => Err(AppError::NotFound(format!(
            "{} {} not found",
            reference.label, id
        ))),
    }
}

/// Validate a body, check its references and run exactly one insert.
///
/// Returns the identifier of the new row.
pub async fn create_record(
    gateway: &dyn Gateway,
    schema: &ResourceSchema,
    body: &Value,
    failure: &str,
) -> AppResult<i64> {
    let record = schema.validate(body)?;

    for (reference, id) in &record.references {
        ensure_exists(gateway, reference, *id).await?;
    }

    gateway
        .insert(&schema.insert_sql(), &record.values, schema.key_column)
        .await
        .map_err(|e| e.in_context(failure))
}

pub fn created(message: &str, inserted_id: i64) -> (StatusCode, Json<Value>) {
    (
        StatusCode::CREATED,
        Json(json!({ "message": message, "insertedId": inserted_id })),
    )
}
