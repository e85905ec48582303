pub mod auth;
pub mod backend;
pub mod config;
pub mod cors;
pub mod error;
pub mod extractors;
pub mod logging;
pub mod models;
pub mod password;
pub mod resource;
pub mod schema;
pub mod startup;
pub mod state;
pub mod token;

pub use error::{AppError, AppResult};
pub use startup::build_app;
pub use state::AppState;
