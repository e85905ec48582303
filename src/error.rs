use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    Unauthorized(String),
    Forbidden(String),
    NotFound(String),
    PayloadTooLarge(String),
    Database { context: String, detail: String },
    Serialization(serde_json::Error),
    Internal(String),
    Configuration(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::BadRequest(e) => write!(f, "Bad request: {}", e),
            AppError::Unauthorized(e) => write!(f, "Unauthorized: {}", e),
            AppError::Forbidden(e) => write!(f, "Forbidden: {}", e),
            AppError::NotFound(e) => write!(f, "Not found: {}", e),
            AppError::PayloadTooLarge(e) => write!(f, "Payload too large: {}", e),
            AppError::Database { context, detail } => {
                write!(f, "Database error: {}: {}", context, detail)
            }
            AppError::Serialization(e) => write!(f, "Serialization error: {}", e),
            AppError::Internal(e) => write!(f, "Internal error: {}", e),
            AppError::Configuration(e) => write!(f, "Configuration error: {}", e),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Serialization(e) => Some(e),
            _ => None,
        }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::Database {
            context: "Database operation failed".to_string(),
            detail: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err)
    }
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Build a database error from a driver failure
    pub fn database(context: impl Into<String>, err: impl fmt::Display) -> Self {
        AppError::Database {
            context: context.into(),
            detail: err.to_string(),
        }
    }

    /// Replace the context of a database error, leaving other variants untouched.
    ///
    /// Routers use this to report which operation failed ("Error adding artwork")
    /// while the driver message is kept in `detail`.
    pub fn in_context(self, context: &str) -> Self {
        match self {
            AppError::Database { detail, .. } => AppError::Database {
                context: context.to_string(),
                detail,
            },
            other => other,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::Database { .. }
            | AppError::Serialization(_)
            | AppError::Internal(_)
            | AppError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn to_response(&self) -> (StatusCode, Json<serde_json::Value>) {
        let status = self.status_code();
        let body = match self {
            AppError::BadRequest(message)
            | AppError::Unauthorized(message)
            | AppError::Forbidden(message)
            | AppError::NotFound(message)
            | AppError::PayloadTooLarge(message) => json!({ "message": message }),
            AppError::Database { context, detail } => {
                tracing::error!(context = %context, "Database error: {}", detail);
                json!({ "message": context, "error": detail })
            }
            AppError::Serialization(e) => {
                tracing::error!("Serialization error: {}", e);
                json!({ "message": "Failed to serialize response" })
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {}", e);
                json!({ "message": "Internal server error" })
            }
            AppError::Configuration(e) => {
                tracing::error!("Configuration error: {}", e);
                json!({ "message": "Server misconfigured" })
            }
        };

        (status, Json(body))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.to_response().into_response()
    }
}
