//! Leadflow server entry point.
//!
//! Loads configuration, seeds the record stores, builds the workflow client,
//! then starts the Axum HTTP server with graceful shutdown.

use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;

use leadflow_server::config::ServerConfig;
use leadflow_server::routes;
use leadflow_server::state::{AppState, Stores};
use leadflow_workflows::WorkflowClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::from_env();

    // Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level)),
        )
        .json()
        .init();

    info!(version = env!("CARGO_PKG_VERSION"), "Leadflow starting");

    let stores = match &config.fixtures_dir {
        Some(dir) => {
            info!(dir = %dir.display(), "loading fixtures");
            Stores::from_dir(dir)
                .await
                .with_context(|| format!("failed to load fixtures from {}", dir.display()))?
        }
        None => {
            info!("using built-in demo data (changes will not persist)");
            Stores::builtin().context("failed to load built-in fixtures")?
        }
    };

    let workflows = WorkflowClient::with_config(config.workflows.clone())
        .context("failed to build workflow client")?;
    info!(url = %workflows.base_url(), "workflow backend configured");

    let state = Arc::new(AppState::new(stores, workflows));
    let app = routes::router(state, config.form_concurrency);

    let listener = TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind to {}", config.bind_addr))?;

    info!(addr = %config.bind_addr, "Leadflow server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("Leadflow server stopped");
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c().await.ok();
    };

    #[cfg(unix)]
    let terminate = async {
        if let Ok(mut sig) =
            tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
        {
            sig.recv().await;
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("shutdown signal received, stopping server");
}
