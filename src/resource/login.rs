use axum::{extract::State, routing::post, Json, Router};

use crate::backend::SqlValue;
use crate::error::{AppError, AppResult};
use crate::extractors::JsonBody;
use crate::models::{LoginRequest, LoginResponse, Role};
use crate::state::AppState;

const INVALID_CREDENTIALS: &str = "Invalid email or password";

fn required(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Exchange staff credentials for a bearer token
pub async fn login(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let (Some(email), Some(password)) = (required(request.email), required(request.password))
    else {
        return Err(AppError::BadRequest(
            "Email and password are required".to_string(),
        ));
    };

    let account = state
        .gateway
        .fetch_optional(
            r#"SELECT "Staff_ID", "Role", "Password_Hash" FROM "employees" WHERE "Email" = ?"#,
            &[SqlValue::from(email.trim())],
        )
        .await
        .map_err(|e| e.in_context("Error during login"))?;

    let Some(account) = account else {
        tracing::info!("Login failed for unknown email");
        return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_string()));
    };

    let staff_id = account
        .get("Staff_ID")
        .and_then(|v| v.as_i64())
        .ok_or_else(|| AppError::Internal("Employee row without Staff_ID".to_string()))?;
    let role = Role::from_db(account.get("Role").and_then(|v| v.as_str()).unwrap_or(""));
    let hash = account
        .get("Password_Hash")
        .and_then(|v| v.as_str())
        .unwrap_or("")
        .to_string();

    let passwords = state.passwords.clone();
    let verified = tokio::task::spawn_blocking(move || passwords.verify_password(&password, &hash))
        .await
        .map_err(|e| AppError::Internal(format!("Password verification task failed: {}", e)))??;

    if !verified {
        tracing::info!(staff_id, "Login failed: wrong password");
        return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_string()));
    }

    let token = state.tokens.issue(staff_id, role)?;
    tracing::info!(staff_id, role = %role, "Login succeeded");

    Ok(Json(LoginResponse {
        message: "Login successful".to_string(),
        token,
        role,
        staff_id,
    }))
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/auth/login", post(login))
}
