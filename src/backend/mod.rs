use crate::error::AppResult;
use async_trait::async_trait;
use chrono::NaiveDate;
use serde_json::{Map, Value};
use std::sync::Arc;

pub mod database;

/// Supported database backend types
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DatabaseType {
    PostgreSQL,
    SQLite,
}

impl DatabaseType {
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "postgresql" | "postgres" => Some(DatabaseType::PostgreSQL),
            "sqlite" => Some(DatabaseType::SQLite),
            _ => None,
        }
    }
}

/// A positional statement parameter
///
/// Values are always bound to `?` placeholders, never spliced into SQL text.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Integer(i64),
    Decimal(f64),
    Text(String),
    Date(NaiveDate),
    /// Untyped NULL, bound as a nullable text parameter
    Null,
}

impl From<i64> for SqlValue {
    fn from(value: i64) -> Self {
        SqlValue::Integer(value)
    }
}

impl From<&str> for SqlValue {
    fn from(value: &str) -> Self {
        SqlValue::Text(value.to_string())
    }
}

impl From<String> for SqlValue {
    fn from(value: String) -> Self {
        SqlValue::Text(value)
    }
}

/// A result row keyed by column name
pub type Row = Map<String, Value>;

/// Database Access Gateway
///
/// The only component that talks to the relational store. Statements use `?`
/// placeholders with a positional parameter list; each implementation adapts
/// the placeholder syntax of its dialect. Driver failures surface as
/// `AppError::Database` and it is up to the caller to decide on the status.
#[async_trait]
pub trait Gateway: Send + Sync {
    fn database_type(&self) -> DatabaseType;

    /// Check if the database is reachable
    async fn health_check(&self) -> AppResult<()>;

    /// Create the museum tables if they do not exist yet
    async fn init_schema(&self) -> AppResult<()>;

    /// Run a query and return every row
    async fn fetch_all(&self, sql: &str, params: &[SqlValue]) -> AppResult<Vec<Row>>;

    /// Run a query and return the first row, if any
    async fn fetch_optional(&self, sql: &str, params: &[SqlValue]) -> AppResult<Option<Row>> {
        Ok(self.fetch_all(sql, params).await?.into_iter().next())
    }

    /// Run an INSERT and return the identifier of the new row
    async fn insert(&self, sql: &str, params: &[SqlValue], key_column: &str) -> AppResult<i64>;

    /// Run an UPDATE/DELETE and return the number of affected rows
    async fn execute(&self, sql: &str, params: &[SqlValue]) -> AppResult<u64>;
}

/// Factory for creating gateway instances
pub struct GatewayFactory;

impl GatewayFactory {
    pub async fn create(
        config: &database::DatabaseBackendConfig,
    ) -> AppResult<Arc<dyn Gateway>> {
        match config.database_type {
            DatabaseType::PostgreSQL => {
                let gateway = database::postgres::PostgresGateway::connect(config).await?;
                Ok(Arc::new(gateway))
            }
            DatabaseType::SQLite => {
                let gateway = database::sqlite::SqliteGateway::connect(config).await?;
                Ok(Arc::new(gateway))
            }
        }
    }
}

/// Quote an SQL identifier. Column names are mixed-case, so they must be quoted
/// for PostgreSQL to keep them; SQLite accepts the same syntax.
pub fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
