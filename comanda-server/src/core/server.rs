//! Server Implementation
//!
//! HTTP server startup and shutdown

use tokio::net::TcpListener;

use crate::api::build_router;
use crate::core::{Config, Result, ServerError, ServerState};

/// HTTP Server
pub struct Server {
    config: Config,
    state: Option<ServerState>,
}

impl Server {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            state: None,
        }
    }

    /// Create server with existing state (for sharing with oneshot)
    pub fn with_state(config: Config, state: ServerState) -> Self {
        Self {
            config,
            state: Some(state),
        }
    }

    /// Serve until Ctrl-C
    ///
    /// Background tasks are stopped and store subscriptions closed after the
    /// listener shuts down.
    pub async fn run(&self) -> Result<()> {
        let state = match &self.state {
            Some(s) => s.clone(),
            None => ServerState::initialize(&self.config).await?,
        };

        let tasks = state.start_background_tasks();

        let addr = std::net::SocketAddr::from(([0, 0, 0, 0], self.config.http_port));
        let listener = TcpListener::bind(addr).await?;
        tracing::info!("🦀 Comanda server listening on {}", addr);

        let shutdown = async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("Shutting down...");
        };

        let served = axum::serve(listener, build_router(state.clone()))
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(ServerError::from);

        tasks.shutdown().await;
        state.store.close_subscriptions();

        served
    }
}
