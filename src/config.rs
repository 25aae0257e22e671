//! Configuration handling for the data connector.
//!
//! Settings come from command line arguments with environment variable
//! fallbacks. A `.env` file in the working directory is loaded by `main`
//! before parsing, so its entries behave like environment variables.

use clap::Parser;

pub const DEFAULT_HTTP_HOST: &str = "127.0.0.1";
pub const DEFAULT_HTTP_PORT: u16 = 9020;
pub const DEFAULT_SERVER_URL: &str = "http://localhost:9020";
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Service-level settings handed to the router at startup.
///
/// `server_url` only feeds the `servers` entry of the published API document;
/// it has no effect on request handling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    pub server_url: String,
}

impl ServiceConfig {
    pub fn new(server_url: impl Into<String>) -> Self {
        Self {
            server_url: server_url.into(),
        }
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self::new(DEFAULT_SERVER_URL)
    }
}

/// Configuration for the data connector process.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "data-connector",
    about = "HTTP microservice that runs raw SQL and inspects schemas against caller-supplied PostgreSQL databases",
    version,
    author
)]
pub struct Config {
    /// HTTP host to bind to
    #[arg(long, default_value = DEFAULT_HTTP_HOST, env = "CONNECTOR_HTTP_HOST")]
    pub http_host: String,

    /// HTTP port to bind to
    #[arg(long, default_value_t = DEFAULT_HTTP_PORT, env = "CONNECTOR_HTTP_PORT")]
    pub http_port: u16,

    /// Public base URL advertised in the API document
    #[arg(
        long,
        default_value = DEFAULT_SERVER_URL,
        env = "DATA_CONNECTER_SERVER_URL"
    )]
    pub server_url: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = DEFAULT_LOG_LEVEL, env = "CONNECTOR_LOG_LEVEL")]
    pub log_level: String,

    /// Enable JSON logging format
    #[arg(long, env = "CONNECTOR_JSON_LOGS")]
    pub json_logs: bool,
}

impl Config {
    /// Create a default configuration (useful for testing).
    pub fn default_config() -> Self {
        Self {
            http_host: DEFAULT_HTTP_HOST.to_string(),
            http_port: DEFAULT_HTTP_PORT,
            server_url: DEFAULT_SERVER_URL.to_string(),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            json_logs: false,
        }
    }

    /// Extract the settings the router needs.
    pub fn service_config(&self) -> ServiceConfig {
        ServiceConfig::new(self.server_url.clone())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::default_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.http_host, DEFAULT_HTTP_HOST);
        assert_eq!(config.http_port, DEFAULT_HTTP_PORT);
        assert_eq!(config.server_url, "http://localhost:9020");
        assert!(!config.json_logs);
    }

    #[test]
    fn test_service_config_carries_server_url() {
        let config = Config {
            server_url: "https://connector.example.com".to_string(),
            ..Config::default()
        };
        assert_eq!(
            config.service_config(),
            ServiceConfig::new("https://connector.example.com")
        );
    }

    #[test]
    fn test_parse_from_args() {
        let config = Config::try_parse_from([
            "data-connector",
            "--http-port",
            "8000",
            "--server-url",
            "https://api.example.com",
            "--json-logs",
        ])
        .unwrap();
        assert_eq!(config.http_port, 8000);
        assert_eq!(config.server_url, "https://api.example.com");
        assert!(config.json_logs);
    }

    #[test]
    fn test_service_config_default() {
        assert_eq!(ServiceConfig::default().server_url, DEFAULT_SERVER_URL);
    }
}
