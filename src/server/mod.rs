//! HTTP server
//!
//! Binds the axum router over an explicitly constructed [`AppState`] and
//! serves until shut down. The state (store, relay, registry, ledger) is
//! created with the server and torn down with it.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;

pub use config::ServerConfig;
pub use error::ApiError;
pub use routes::router;
pub use state::AppState;

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;

use crate::error::Result;
use crate::registry::BotRegistry;
use crate::relay::RelayConfig;

/// The monitoring service
pub struct MonitorServer {
    config: ServerConfig,
    state: AppState,
}

impl MonitorServer {
    /// Create a new server with the given configuration
    pub fn new(config: ServerConfig) -> Self {
        Self::with_relay_config(config, RelayConfig::default())
    }

    /// Create a new server with custom relay tuning
    pub fn with_relay_config(config: ServerConfig, relay_config: RelayConfig) -> Self {
        Self {
            config,
            state: AppState::new(relay_config),
        }
    }

    /// Get the shared application state
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Get a reference to the bot registry
    pub fn registry(&self) -> &Arc<BotRegistry> {
        &self.state.registry
    }

    /// Get the bind address
    pub fn bind_addr(&self) -> SocketAddr {
        self.config.bind_addr
    }

    /// Run the server
    ///
    /// This method blocks until the server is shut down.
    pub async fn run(&self) -> Result<()> {
        let listener = TcpListener::bind(self.config.bind_addr).await?;
        tracing::info!(addr = %self.config.bind_addr, "Web monitor listening");

        axum::serve(listener, routes::router(self.state.clone())).await?;
        Ok(())
    }

    /// Run the server with graceful shutdown
    pub async fn run_until<F>(&self, shutdown: F) -> Result<()>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let listener = TcpListener::bind(self.config.bind_addr).await?;
        tracing::info!(addr = %self.config.bind_addr, "Web monitor listening");

        axum::serve(listener, routes::router(self.state.clone()))
            .with_graceful_shutdown(shutdown)
            .await?;

        tracing::info!("Shutdown complete");
        Ok(())
    }
}
