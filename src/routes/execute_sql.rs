use crate::db::QueryExecutor;
use crate::error::ApiError;
use crate::models::{ExecuteSqlParams, QueryResult};
use axum::Json;
use axum::extract::Query;
use axum::extract::rejection::QueryRejection;
use tracing::error;

/// Execute a raw SQL statement and return its columns and rows.
pub async fn execute_sql(
    params: Result<Query<ExecuteSqlParams>, QueryRejection>,
) -> Result<Json<QueryResult>, ApiError> {
    let Query(params) = params.map_err(|e| ApiError::invalid_params(e.body_text()))?;

    match QueryExecutor::execute(&params.database_url, &params.query).await {
        Ok(result) => Ok(Json(result)),
        Err(e) => {
            error!(error = %e, "Error executing SQL query");
            Err(ApiError::execution("Error executing query", &e))
        }
    }
}
