//! Schema-related data models.
//!
//! This module defines the schema snapshot returned by the introspection
//! endpoint and the flat catalog rows it is built from.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Query string parameters of `GET /database_schema`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaParams {
    /// Contains credentials - never log
    #[serde(rename = "DATABASE_URL")]
    pub database_url: String,
}

/// One column as reported by the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnInfo {
    pub column_name: String,
    /// Output of `pg_catalog.format_type`, e.g. "character varying(255)"
    pub data_type: String,
}

/// Columns of a single table, in attribute order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableColumns {
    pub columns: Vec<ColumnInfo>,
}

/// A flat row of the per-table column listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnRow {
    pub table_name: String,
    pub column_name: String,
    pub data_type: String,
}

impl ColumnRow {
    pub fn new(
        table_name: impl Into<String>,
        column_name: impl Into<String>,
        data_type: impl Into<String>,
    ) -> Self {
        Self {
            table_name: table_name.into(),
            column_name: column_name.into(),
            data_type: data_type.into(),
        }
    }
}

/// Table count plus the columns of every user table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaSnapshot {
    pub total_tables: i64,
    pub tables: IndexMap<String, TableColumns>,
}

impl SchemaSnapshot {
    /// Group flat column rows by table name.
    ///
    /// Tables keep the order in which they first appear; columns keep row order.
    pub fn from_rows(total_tables: i64, rows: impl IntoIterator<Item = ColumnRow>) -> Self {
        let mut tables: IndexMap<String, TableColumns> = IndexMap::new();
        for row in rows {
            tables
                .entry(row.table_name)
                .or_default()
                .columns
                .push(ColumnInfo {
                    column_name: row.column_name,
                    data_type: row.data_type,
                });
        }
        Self {
            total_tables,
            tables,
        }
    }

    pub fn column_count(&self) -> usize {
        self.tables.values().map(|t| t.columns.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_snapshot_serialization() {
        let snapshot = SchemaSnapshot::from_rows(0, Vec::new());
        assert_eq!(
            serde_json::to_value(&snapshot).unwrap(),
            json!({"total_tables": 0, "tables": {}})
        );
    }

    #[test]
    fn test_rows_grouped_by_table() {
        let snapshot = SchemaSnapshot::from_rows(
            2,
            vec![
                ColumnRow::new("orders", "id", "integer"),
                ColumnRow::new("orders", "total", "numeric(10,2)"),
                ColumnRow::new("users", "id", "bigint"),
                ColumnRow::new("users", "email", "character varying(255)"),
                ColumnRow::new("users", "created_at", "timestamp with time zone"),
            ],
        );

        assert_eq!(snapshot.total_tables, 2);
        assert_eq!(snapshot.tables.len(), 2);
        assert_eq!(snapshot.tables["orders"].columns.len(), 2);
        assert_eq!(snapshot.column_count(), 5);

        let users = &snapshot.tables["users"].columns;
        assert_eq!(users[1].column_name, "email");
        assert_eq!(users[1].data_type, "character varying(255)");
    }

    #[test]
    fn test_table_order_follows_first_appearance() {
        let snapshot = SchemaSnapshot::from_rows(
            2,
            vec![
                ColumnRow::new("zebra", "a", "integer"),
                ColumnRow::new("apple", "b", "text"),
            ],
        );
        let names: Vec<&str> = snapshot.tables.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["zebra", "apple"]);
    }

    #[test]
    fn test_nested_serialization_shape() {
        let snapshot = SchemaSnapshot::from_rows(
            1,
            vec![
                ColumnRow::new("t", "a", "integer"),
                ColumnRow::new("t", "b", "text"),
            ],
        );
        assert_eq!(
            serde_json::to_value(&snapshot).unwrap(),
            json!({
                "total_tables": 1,
                "tables": {
                    "t": {
                        "columns": [
                            {"column_name": "a", "data_type": "integer"},
                            {"column_name": "b", "data_type": "text"}
                        ]
                    }
                }
            })
        );
    }

    #[test]
    fn test_total_tables_is_not_derived_from_rows() {
        // A table without user columns is counted but has no rows.
        let snapshot = SchemaSnapshot::from_rows(3, vec![ColumnRow::new("t", "a", "integer")]);
        assert_eq!(snapshot.total_tables, 3);
        assert_eq!(snapshot.tables.len(), 1);
    }
}
