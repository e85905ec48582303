//! Database access layer for the museum server
//!
//! ```text
//! Gateway trait (backend/mod.rs)
//!     ↓
//! Database-specific implementations
//!     ├── postgres/ (PostgreSQL-specific code)
//!     └── sqlite/   (SQLite-specific code)
//! ```

pub mod config;
pub mod postgres;
pub mod sqlite;

pub use config::DatabaseBackendConfig;
pub use postgres::PostgresGateway;
pub use sqlite::SqliteGateway;
