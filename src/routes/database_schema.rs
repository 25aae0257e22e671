use crate::db::SchemaInspector;
use crate::error::ApiError;
use crate::models::{SchemaParams, SchemaSnapshot};
use axum::Json;
use axum::extract::Query;
use axum::extract::rejection::QueryRejection;
use tracing::error;

/// Return the table count and per-table columns of the target database.
pub async fn get_database_schema(
    params: Result<Query<SchemaParams>, QueryRejection>,
) -> Result<Json<SchemaSnapshot>, ApiError> {
    let Query(params) = params.map_err(|e| ApiError::invalid_params(e.body_text()))?;

    match SchemaInspector::snapshot(&params.database_url).await {
        Ok(snapshot) => Ok(Json(snapshot)),
        Err(e) => {
            error!(error = %e, "Error fetching database schema");
            Err(ApiError::execution("Error fetching database schema", &e))
        }
    }
}
