//! Query-related data models.
//!
//! This module defines the request parameters and response body of the
//! raw SQL endpoint.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// A single result row, keyed by column name in cursor order.
pub type JsonRow = serde_json::Map<String, JsonValue>;

/// Query string parameters of `POST /execute_sql`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecuteSqlParams {
    /// Raw SQL, executed verbatim.
    pub query: String,
    /// Contains credentials - never log
    #[serde(rename = "DATABASE_URL")]
    pub database_url: String,
}

/// Result set of a raw SQL statement.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryResult {
    pub columns: Vec<String>,
    pub data: Vec<JsonRow>,
}

impl QueryResult {
    pub fn new(columns: Vec<String>, data: Vec<JsonRow>) -> Self {
        Self { columns, data }
    }

    pub fn row_count(&self) -> usize {
        self.data.len()
    }
}
