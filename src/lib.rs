//! Data Connector Library
//!
//! An HTTP microservice that runs raw SQL and inspects table/column schemas
//! against PostgreSQL databases named by the caller on every request.

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod transport;

pub use config::{Config, ServiceConfig};
pub use error::{ApiError, DbError};
pub use routes::{AppState, create_router};
