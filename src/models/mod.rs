//! Data models for the data connector.
//!
//! This module re-exports all model types used throughout the application.

pub mod policy;
pub mod query;
pub mod schema;

// Re-export commonly used types
pub use policy::PolicyInfo;
pub use query::{ExecuteSqlParams, JsonRow, QueryResult};
pub use schema::{ColumnInfo, ColumnRow, SchemaParams, SchemaSnapshot, TableColumns};
