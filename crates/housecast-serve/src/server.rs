//! Server startup and shutdown.

use axum::Router;
use tokio::net::TcpListener;

use housecast_core::config::ServeConfig;
use housecast_core::errors::ConfigError;

use crate::adapter::PredictionAdapter;
use crate::http::{router, AppState};

#[derive(Debug, thiserror::Error)]
pub enum ServeError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    Io(#[from] std::io::Error),
}

/// Load the model named by `config` and serve until Ctrl+C.
pub async fn run(config: &ServeConfig) -> Result<(), ServeError> {
    let adapter = PredictionAdapter::load(&config.effective_model_path());
    serve(&config.bind_addr(), router(AppState::new(adapter))).await
}

/// Bind `addr` and serve `app` with graceful shutdown.
pub async fn serve(addr: &str, app: Router) -> Result<(), ServeError> {
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| ServeError::Bind {
            addr: addr.to_string(),
            source,
        })?;
    tracing::info!(addr = %addr, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
