use axum::{middleware, routing::get, Router};
use std::sync::Arc;

use crate::auth::auth_middleware;
use crate::backend::database::DatabaseBackendConfig;
use crate::backend::{Gateway, GatewayFactory, SqlValue};
use crate::config::{AppConfig, BootstrapAdmin};
use crate::cors::cors_middleware;
use crate::error::AppResult;
use crate::logging::logging_middleware;
use crate::models::Role;
use crate::resource;
use crate::schema::definitions::EMPLOYEE;
use crate::state::AppState;

/// Connect to the configured database and create missing tables
pub async fn initialize_database(config: &AppConfig) -> AppResult<Arc<dyn Gateway>> {
    let backend_config = DatabaseBackendConfig::try_from(&config.database)?;
    let gateway = GatewayFactory::create(&backend_config).await?;

    if config.database.initialize_schema {
        gateway.init_schema().await?;
        tracing::info!("Museum schema ready ({})", config.database.db_type);
    }

    Ok(gateway)
}

/// Create the configured admin account unless its email is already taken.
///
/// Returns the staff id of the new account.
pub async fn seed_admin(state: &AppState, admin: &BootstrapAdmin) -> AppResult<Option<i64>> {
    let existing = state
        .gateway
        .fetch_optional(
            r#"SELECT "Staff_ID" FROM "employees" WHERE "Email" = ?"#,
            &[SqlValue::from(admin.email.as_str())],
        )
        .await
        .map_err(|e| e.in_context("Error checking bootstrap admin"))?;
    if existing.is_some() {
        tracing::debug!("Bootstrap admin {} already exists", admin.email);
        return Ok(None);
    }

    let hash = state.passwords.hash_password(&admin.password)?;
    let staff_id = state
        .gateway
        .insert(
            &EMPLOYEE.insert_sql(),
            &[
                SqlValue::from(admin.name.as_str()),
                SqlValue::from(admin.email.as_str()),
                SqlValue::from(Role::Admin.as_str()),
                SqlValue::Text(hash),
            ],
            EMPLOYEE.key_column,
        )
        .await
        .map_err(|e| e.in_context("Error creating bootstrap admin"))?;

    tracing::info!(staff_id, "Created bootstrap admin {}", admin.email);
    Ok(Some(staff_id))
}

/// Compose the routers and wrap them, outermost first, in access logging,
/// CORS and authentication
pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/", get(resource::welcome))
        .route("/health", get(resource::health))
        .merge(resource::login::routes())
        .merge(resource::exhibition::routes())
        .merge(resource::employee::routes())
        .merge(resource::report::routes())
        .fallback(resource::not_found)
        .method_not_allowed_fallback(resource::not_found)
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware))
        .layer(middleware::from_fn(cors_middleware))
        .layer(middleware::from_fn(logging_middleware))
        .with_state(state)
}
