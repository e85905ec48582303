mod backend_impl;
pub mod schema;

pub use backend_impl::{numbered_placeholders, PostgresGateway};
