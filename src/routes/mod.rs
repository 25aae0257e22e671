//! HTTP routes.
//!
//! Each handler is self-contained: the database handlers build their own
//! connection pool per request, so the only shared state is the immutable
//! service configuration.

mod database_schema;
mod execute_sql;
mod openapi;
mod policy;

use crate::config::ServiceConfig;
use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub use database_schema::get_database_schema;
pub use execute_sql::execute_sql;
pub use openapi::{api_document, get_openapi};
pub use policy::get_policy;

/// State shared by all handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: Arc<ServiceConfig>,
}

impl AppState {
    pub fn new(config: ServiceConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/execute_sql", post(execute_sql))
        .route("/database_schema", get(get_database_schema))
        .route("/policy", get(get_policy))
        .route("/openapi.json", get(get_openapi))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
