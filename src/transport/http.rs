//! HTTP transport: binds the listener and serves the router until shutdown.

use crate::config::ServiceConfig;
use crate::routes::{AppState, create_router};
use std::io;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{error, info, warn};

/// Graceful shutdown window. Caller queries have no execution deadline, so
/// in-flight requests are abandoned once this elapses.
const GRACEFUL_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP transport serving the connector's routes.
pub struct HttpTransport {
    service_config: ServiceConfig,
    /// Host to bind to
    host: String,
    /// Port to bind to
    port: u16,
}

impl HttpTransport {
    /// Create a new HTTP transport.
    pub fn new(service_config: ServiceConfig, host: impl Into<String>, port: u16) -> Self {
        Self {
            service_config,
            host: host.into(),
            port,
        }
    }

    /// Get the bind address.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Start serving; returns after a shutdown signal.
    pub async fn run(&self) -> io::Result<()> {
        let bind_addr = self.bind_addr();
        let app = create_router(AppState::new(self.service_config.clone()));

        let listener = TcpListener::bind(&bind_addr)
            .await
            .map_err(|e| {
                io::Error::new(e.kind(), format!("Failed to bind to {}: {}", bind_addr, e))
            })?;

        info!(
            addr = %bind_addr,
            server_url = %self.service_config.server_url,
            "HTTP server listening"
        );

        let shutdown_notify = Arc::new(tokio::sync::Notify::new());
        let shutdown_notify_clone = shutdown_notify.clone();

        let shutdown_signal = async move {
            wait_for_signal().await;
            shutdown_notify_clone.notify_one();
        };

        let server = axum::serve(listener, app).with_graceful_shutdown(shutdown_signal);

        // Race between: server draining normally vs forced timeout/second signal
        tokio::select! {
            result = server => {
                match result {
                    Ok(()) => info!("HTTP server stopped"),
                    Err(e) => {
                        error!(error = %e, "HTTP server error");
                        return Err(e);
                    }
                }
            }
            _ = async {
                shutdown_notify.notified().await;
                info!(
                    timeout_secs = GRACEFUL_TIMEOUT.as_secs(),
                    "Waiting for in-flight requests (send signal again to force exit)..."
                );

                tokio::select! {
                    _ = tokio::time::sleep(GRACEFUL_TIMEOUT) => {
                        warn!("Graceful shutdown timeout, forcing exit");
                    }
                    _ = wait_for_signal() => {
                        warn!("Received second signal, forcing immediate exit");
                    }
                }
            } => {}
        }

        Ok(())
    }
}

/// Wait for a shutdown signal (SIGINT or SIGTERM).
async fn wait_for_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for SIGINT");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received SIGINT"),
        _ = terminate => info!("Received SIGTERM"),
    }
}
