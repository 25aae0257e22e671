//! Schema introspection module.
//!
//! Two fixed catalog statements are run against the caller's database: a
//! count of user tables and a flat listing of every user table's columns.
//! The listing is grouped into a [`SchemaSnapshot`].
//!
//! The statements target PostgreSQL system catalogs (`pg_catalog.pg_tables`,
//! `pg_class`, `pg_attribute`). Another engine would need its own versions of
//! both; the snapshot shape stays the same.

use crate::db::pool::RequestPool;
use crate::error::DbResult;
use crate::models::{ColumnRow, SchemaSnapshot};
use sqlx::Row;
use tracing::{debug, info};

// =============================================================================
// SQL Query Templates
// =============================================================================

mod queries {
    pub const COUNT_USER_TABLES: &str = r#"
        SELECT COUNT(*)
        FROM pg_catalog.pg_tables
        WHERE schemaname NOT IN ('pg_catalog', 'information_schema')
        "#;

    pub const LIST_USER_TABLE_COLUMNS: &str = r#"
        SELECT
            t.tablename::text AS tablename,
            a.attname::text AS column_name,
            pg_catalog.format_type(a.atttypid, a.atttypmod) AS data_type
        FROM pg_catalog.pg_tables t
        JOIN pg_catalog.pg_namespace n ON n.nspname = t.schemaname
        JOIN pg_catalog.pg_class c ON c.relnamespace = n.oid AND c.relname = t.tablename
        JOIN pg_catalog.pg_attribute a ON a.attrelid = c.oid
        WHERE t.schemaname NOT IN ('pg_catalog', 'information_schema')
        AND a.attnum > 0 AND NOT a.attisdropped
        ORDER BY t.tablename, t.schemaname, a.attnum
        "#;
}

/// Schema inspector for database introspection.
pub struct SchemaInspector;

impl SchemaInspector {
    /// Open a pool for `connection_url`, take a snapshot, and release the pool.
    pub async fn snapshot(connection_url: &str) -> DbResult<SchemaSnapshot> {
        let mut pool = RequestPool::open(connection_url).await?;
        let result = Self::snapshot_on(&mut pool).await;
        pool.release().await;
        result
    }

    /// Take a snapshot using the session of an already open pool.
    pub async fn snapshot_on(pool: &mut RequestPool) -> DbResult<SchemaSnapshot> {
        info!(target_db = %pool.target(), "Fetching database schema information");
        let session = pool.session()?;

        let total_tables: i64 = sqlx::query_scalar(queries::COUNT_USER_TABLES)
            .fetch_one(&mut *session)
            .await?;

        let rows = sqlx::query(queries::LIST_USER_TABLE_COLUMNS)
            .fetch_all(&mut *session)
            .await?;

        let columns = rows
            .iter()
            .map(|row| -> Result<ColumnRow, sqlx::Error> {
                Ok(ColumnRow {
                    table_name: row.try_get("tablename")?,
                    column_name: row.try_get("column_name")?,
                    data_type: row.try_get("data_type")?,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        debug!(
            total_tables,
            column_rows = columns.len(),
            "Fetched catalog rows"
        );

        let snapshot = SchemaSnapshot::from_rows(total_tables, columns);
        info!(
            total_tables = snapshot.total_tables,
            tables_with_columns = snapshot.tables.len(),
            columns = snapshot.column_count(),
            "Database schema fetched"
        );
        Ok(snapshot)
    }
}
