use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::Value;
use sqlx::postgres::{PgArguments, PgPoolOptions, PgRow, Postgres};
use sqlx::query::Query;
use sqlx::{Column, PgPool, Row as _, TypeInfo, ValueRef};
use std::time::Duration;

use super::super::config::DatabaseBackendConfig;
use crate::backend::{quote_ident, DatabaseType, Gateway, Row, SqlValue};
use crate::error::{AppError, AppResult};

/// PostgreSQL implementation of the Database Access Gateway
pub struct PostgresGateway {
    pool: PgPool,
}

impl PostgresGateway {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn connect(config: &DatabaseBackendConfig) -> AppResult<Self> {
        config
            .validate()
            .map_err(|e| AppError::Configuration(format!("Invalid backend config: {}", e)))?;

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout))
            .connect(&config.connection_url)
            .await
            .map_err(|e| AppError::database("Failed to connect to PostgreSQL", e))?;

        Ok(Self::new(pool))
    }
}

/// Rewrite `?` placeholders into PostgreSQL's `$1, $2, ...` form.
///
/// Question marks inside quoted literals and quoted identifiers are left alone.
pub fn numbered_placeholders(sql: &str) -> String {
    let mut rewritten = String::with_capacity(sql.len() + 8);
    let mut index = 0;
    let mut in_literal = false;
    let mut in_identifier = false;

    for ch in sql.chars() {
        match ch {
            '\'' if !in_identifier => {
                in_literal = !in_literal;
                rewritten.push(ch);
            }
            '"' if !in_literal => {
                in_identifier = !in_identifier;
                rewritten.push(ch);
            }
            '?' if !in_literal && !in_identifier => {
                index += 1;
                rewritten.push('$');
                rewritten.push_str(&index.to_string());
            }
            _ => rewritten.push(ch),
        }
    }

    rewritten
}

fn bind_params<'q>(
    mut query: Query<'q, Postgres, PgArguments>,
    params: &'q [SqlValue],
) -> Query<'q, Postgres, PgArguments> {
    for param in params {
        query = match param {
            SqlValue::Integer(v) => query.bind(*v),
            SqlValue::Decimal(v) => query.bind(*v),
            SqlValue::Text(v) => query.bind(v.as_str()),
            SqlValue::Date(v) => query.bind(*v),
            SqlValue::Null => query.bind(None::<String>),
        };
    }
    query
}

/// Convert a row to JSON using the declared column types
fn row_to_json(row: &PgRow) -> Result<Row, sqlx::Error> {
    let mut object = Row::new();

    for (index, column) in row.columns().iter().enumerate() {
        if row.try_get_raw(index)?.is_null() {
            object.insert(column.name().to_string(), Value::Null);
            continue;
        }

        let value = match column.type_info().name() {
            "INT2" => Value::from(row.try_get::<i16, _>(index)?),
            "INT4" => Value::from(row.try_get::<i32, _>(index)?),
            "INT8" => Value::from(row.try_get::<i64, _>(index)?),
            "FLOAT4" => Value::from(row.try_get::<f32, _>(index)?),
            "FLOAT8" => Value::from(row.try_get::<f64, _>(index)?),
            "BOOL" => Value::from(row.try_get::<bool, _>(index)?),
            "TEXT" | "VARCHAR" | "BPCHAR" | "NAME" => Value::from(row.try_get::<String, _>(index)?),
            "DATE" => Value::from(row.try_get::<NaiveDate, _>(index)?.to_string()),
            "TIMESTAMP" => Value::from(row.try_get::<NaiveDateTime, _>(index)?.to_string()),
            "TIMESTAMPTZ" => Value::from(row.try_get::<DateTime<Utc>, _>(index)?.to_rfc3339()),
            other => {
                tracing::warn!(
                    column = column.name(),
                    "Unsupported PostgreSQL column type {}, returning null",
                    other
                );
                Value::Null
            }
        };
        object.insert(column.name().to_string(), value);
    }

    Ok(object)
}

#[async_trait]
impl Gateway for PostgresGateway {
    fn database_type(&self) -> DatabaseType {
        DatabaseType::PostgreSQL
    }

    async fn health_check(&self) -> AppResult<()> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::database("Health check failed", e))?;

        Ok(())
    }

    async fn init_schema(&self) -> AppResult<()> {
        super::schema::init_schema(&self.pool).await
    }

    async fn fetch_all(&self, sql: &str, params: &[SqlValue]) -> AppResult<Vec<Row>> {
        let sql = numbered_placeholders(sql);
        let rows = bind_params(sqlx::query(&sql), params)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database("Failed to execute query", e))?;

        rows.iter()
            .map(row_to_json)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| AppError::database("Failed to decode row", e))
    }

    async fn insert(&self, sql: &str, params: &[SqlValue], key_column: &str) -> AppResult<i64> {
        let sql = format!(
            "{} RETURNING {}",
            numbered_placeholders(sql),
            quote_ident(key_column)
        );
        let row = bind_params(sqlx::query(&sql), params)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::database("Failed to insert row", e))?;

        row.try_get::<i64, _>(0)
            .map_err(|e| AppError::database("Failed to read inserted key", e))
    }

    async fn execute(&self, sql: &str, params: &[SqlValue]) -> AppResult<u64> {
        let sql = numbered_placeholders(sql);
        let result = bind_params(sqlx::query(&sql), params)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database("Failed to execute statement", e))?;

        Ok(result.rows_affected())
    }
}
