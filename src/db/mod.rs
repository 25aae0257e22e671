//! Database access layer.
//!
//! This module provides:
//! - Per-request connection provisioning
//! - Raw SQL execution
//! - Schema introspection
//! - PostgreSQL value to JSON conversion

pub mod executor;
pub mod pool;
pub mod schema;
pub mod types;

pub use executor::QueryExecutor;
pub use pool::{PoolSettings, RequestPool, normalize_connection_url};
pub use schema::SchemaInspector;
