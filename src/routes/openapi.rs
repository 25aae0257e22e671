//! OpenAPI document for the public endpoints.
//!
//! `/policy` and this document's own route are deliberately absent.

use crate::config::ServiceConfig;
use crate::routes::AppState;
use axum::Json;
use axum::extract::State;
use serde_json::{Value as JsonValue, json};

const SERVER_DESCRIPTION: &str = "CloudFlare Server";

pub async fn get_openapi(State(state): State<AppState>) -> Json<JsonValue> {
    Json(api_document(&state.config))
}

fn database_url_param() -> JsonValue {
    json!({
        "name": "DATABASE_URL",
        "in": "query",
        "required": true,
        "schema": {"type": "string", "title": "Database Url"}
    })
}

fn error_response(description: &str) -> JsonValue {
    json!({
        "description": description,
        "content": {
            "application/json": {
                "schema": {
                    "type": "object",
                    "properties": {"detail": {"type": "string"}},
                    "required": ["detail"]
                }
            }
        }
    })
}

fn execute_sql_result_schema() -> JsonValue {
    json!({
        "type": "object",
        "properties": {
            "columns": {"type": "array", "items": {"type": "string"}},
            "data": {"type": "array", "items": {"type": "object"}}
        },
        "required": ["columns", "data"]
    })
}

fn schema_snapshot_schema() -> JsonValue {
    let column = json!({
        "type": "object",
        "properties": {
            "column_name": {"type": "string"},
            "data_type": {"type": "string"}
        }
    });
    let table = json!({
        "type": "object",
        "properties": {"columns": {"type": "array", "items": column}}
    });
    json!({
        "type": "object",
        "properties": {
            "total_tables": {"type": "integer"},
            "tables": {"type": "object", "additionalProperties": table}
        },
        "required": ["total_tables", "tables"]
    })
}

fn success_response(schema: JsonValue) -> JsonValue {
    json!({
        "description": "Successful Response",
        "content": {"application/json": {"schema": schema}}
    })
}

fn execute_sql_operation() -> JsonValue {
    let query_param = json!({
        "name": "query",
        "in": "query",
        "required": true,
        "schema": {"type": "string", "title": "Query"}
    });
    json!({
        "summary": "Execute Sql Query",
        "description": "Execute a raw SQL query and return the results including column names.",
        "operationId": "execute_sql_query_execute_sql_post",
        "parameters": [query_param, database_url_param()],
        "responses": {
            "200": success_response(execute_sql_result_schema()),
            "400": error_response("Connection, execution or serialization failure"),
            "422": error_response("Validation Error")
        }
    })
}

fn database_schema_operation() -> JsonValue {
    json!({
        "summary": "Get Database Schema",
        "description": "Get the database schema including total tables, columns in each table, and column details.",
        "operationId": "get_database_schema_database_schema_get",
        "parameters": [database_url_param()],
        "responses": {
            "200": success_response(schema_snapshot_schema()),
            "400": error_response("Connection or catalog query failure"),
            "422": error_response("Validation Error")
        }
    })
}

/// Build the API document advertising `config.server_url` as the server.
pub fn api_document(config: &ServiceConfig) -> JsonValue {
    json!({
        "openapi": "3.1.0",
        "info": {
            "title": "Data Connector",
            "version": env!("CARGO_PKG_VERSION")
        },
        "servers": [
            {"url": config.server_url, "description": SERVER_DESCRIPTION}
        ],
        "paths": {
            "/execute_sql": {"post": execute_sql_operation()},
            "/database_schema": {"get": database_schema_operation()}
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_advertises_configured_server() {
        let doc = api_document(&ServiceConfig::new("https://connector.example.com"));
        assert_eq!(doc["servers"][0]["url"], "https://connector.example.com");
        assert_eq!(doc["servers"][0]["description"], SERVER_DESCRIPTION);
    }

    #[test]
    fn test_document_hides_policy() {
        let doc = api_document(&ServiceConfig::default());
        let paths = doc["paths"].as_object().unwrap();
        assert!(paths.contains_key("/execute_sql"));
        assert!(paths.contains_key("/database_schema"));
        assert!(!paths.contains_key("/policy"));
    }

    #[test]
    fn test_execute_sql_parameters() {
        let doc = api_document(&ServiceConfig::default());
        let names: Vec<&str> = doc["paths"]["/execute_sql"]["post"]["parameters"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|p| p["name"].as_str())
            .collect();
        assert_eq!(names, vec!["query", "DATABASE_URL"]);
    }
}
