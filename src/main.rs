//! Data Connector - Main entry point.

use clap::Parser;
use data_connector::config::Config;
use data_connector::transport::HttpTransport;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Initialize the tracing subscriber for logging.
fn init_tracing(config: &Config) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let subscriber = tracing_subscriber::registry().with(filter);

    if config.json_logs {
        subscriber.with(fmt::layer().json()).init();
    } else {
        subscriber
            .with(fmt::layer().with_target(true).with_thread_ids(false))
            .init();
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // A missing .env file is fine; real environment variables still apply
    let dotenv_path = dotenvy::dotenv().ok();

    let config = Config::parse();
    init_tracing(&config);

    if let Some(path) = dotenv_path {
        info!(path = %path.display(), "Loaded environment file");
    }

    info!("Starting Data Connector v{}", env!("CARGO_PKG_VERSION"));

    let transport = HttpTransport::new(
        config.service_config(),
        &config.http_host,
        config.http_port,
    );

    if let Err(e) = transport.run().await {
        error!(error = %e, "Server error");
        return Err(e.into());
    }

    info!("Server shutdown complete");
    Ok(())
}
