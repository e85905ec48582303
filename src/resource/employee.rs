use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde_json::Value;

use super::created;
use crate::auth::RequireAdmin;
use crate::backend::{Row, SqlValue};
use crate::error::{AppError, AppResult};
use crate::extractors::JsonBody;
use crate::models::Role;
use crate::schema::definitions::EMPLOYEE;
use crate::schema::MISSING_FIELDS;
use crate::state::AppState;

/// Public columns of the employees table. The password hash is never selected.
const EMPLOYEE_COLUMNS: &str = r#""Staff_ID", "Name", "Email", "Role""#;

pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Row>>> {
    let sql = format!(
        r#"SELECT {} FROM "employees" ORDER BY "Staff_ID""#,
        EMPLOYEE_COLUMNS
    );
    let rows = state
        .gateway
        .fetch_all(&sql, &[])
        .await
        .map_err(|e| e.in_context("Error retrieving employees"))?;

    Ok(Json(rows))
}

pub async fn get_employee(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Row>> {
    let staff_id = id
        .parse::<i64>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| AppError::BadRequest(format!("Invalid staff id: {}", id)))?;

    let sql = format!(
        r#"SELECT {} FROM "employees" WHERE "Staff_ID" = ?"#,
        EMPLOYEE_COLUMNS
    );
    state
        .gateway
        .fetch_optional(&sql, &[SqlValue::Integer(staff_id)])
        .await
        .map_err(|e| e.in_context("Error retrieving employee"))?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Employee not found".to_string()))
}

/// Create a staff account. The role must be `staff` or `admin` and the
/// password is hashed before it is stored.
pub async fn create_employee(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    JsonBody(body): JsonBody<Value>,
) -> AppResult<(StatusCode, Json<Value>)> {
    let mut record = EMPLOYEE.validate(&body)?;

    let role_index = field_index("role")?;
    let role = match &record.values[role_index] {
        SqlValue::Text(role) => Role::from_db(role),
        _ => Role::Customer,
    };
    if role == Role::Customer {
        return Err(AppError::BadRequest(
            "Role must be 'staff' or 'admin'".to_string(),
        ));
    }
    record.values[role_index] = SqlValue::from(role.as_str());

    let password_index = field_index("password")?;
    let password = match &record.values[password_index] {
        SqlValue::Text(password) => password.clone(),
        _ => return Err(AppError::BadRequest(MISSING_FIELDS.to_string())),
    };
    let passwords = state.passwords.clone();
    let hash = tokio::task::spawn_blocking(move || passwords.hash_password(&password))
        .await
        .map_err(|e| AppError::Internal(format!("Password hashing task failed: {}", e)))??;
    record.values[password_index] = SqlValue::Text(hash);

    let staff_id = state
        .gateway
        .insert(&EMPLOYEE.insert_sql(), &record.values, EMPLOYEE.key_column)
        .await
        .map_err(|e| e.in_context("Error adding employee"))?;

    tracing::info!(
        created_by = admin.staff_id,
        staff_id,
        role = %role,
        "Created employee account"
    );
    Ok(created("employee added successfully!", staff_id))
}

fn field_index(name: &str) -> AppResult<usize> {
    EMPLOYEE
        .field_index(name)
        .ok_or_else(|| AppError::Internal(format!("Employee schema has no '{}' field", name)))
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/employees", get(list).post(create_employee))
        .route("/employees/{id}", get(get_employee))
}
