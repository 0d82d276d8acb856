//! Server configuration for Leadflow.
//!
//! Loads configuration from environment variables with sensible defaults.
//! All settings can be overridden via `LEADFLOW_*` environment variables.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use leadflow_workflows::WorkflowConfig;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind the HTTP listener to.
    pub bind_addr: SocketAddr,
    /// Log level filter (e.g., `info`, `debug`, `warn`).
    pub log_level: String,
    /// Directory holding `clients.json`, `campaigns.json`, ... seed files.
    /// `None` uses the built-in demo data.
    pub fixtures_dir: Option<PathBuf>,
    /// Automation backend settings.
    pub workflows: WorkflowConfig,
    /// Maximum concurrent requests on the form routes.
    pub form_concurrency: usize,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `PORT` — port to bind on (binds to `0.0.0.0`)
    /// - `LEADFLOW_BIND_ADDR` — full bind address (overrides `PORT`, default: `127.0.0.1:8300`)
    /// - `LEADFLOW_LOG_LEVEL` — log filter (default: `info`)
    /// - `LEADFLOW_FIXTURES_DIR` — seed data directory (optional)
    /// - `LEADFLOW_WORKFLOWS_URL` / `LEADFLOW_WORKFLOWS_KEY` — automation backend
    /// - `LEADFLOW_WORKFLOWS_TIMEOUT` — seconds per submission (default: `15`, `0` disables)
    /// - `LEADFLOW_FORM_CONCURRENCY` — concurrent form requests (default: `16`)
    #[must_use]
    pub fn from_env() -> Self {
        let bind_addr = if let Ok(addr) = std::env::var("LEADFLOW_BIND_ADDR") {
            addr.parse()
                .unwrap_or_else(|_| SocketAddr::from(([127, 0, 0, 1], 8300)))
        } else if let Ok(port_str) = std::env::var("PORT") {
            let port: u16 = port_str.parse().unwrap_or(8300);
            SocketAddr::from(([0, 0, 0, 0], port))
        } else {
            SocketAddr::from(([127, 0, 0, 1], 8300))
        };

        let log_level = std::env::var("LEADFLOW_LOG_LEVEL").unwrap_or_else(|_| "info".to_owned());

        let fixtures_dir = std::env::var("LEADFLOW_FIXTURES_DIR")
            .ok()
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);

        let timeout_secs: u64 = std::env::var("LEADFLOW_WORKFLOWS_TIMEOUT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(15);

        let workflows = WorkflowConfig {
            base_url: std::env::var("LEADFLOW_WORKFLOWS_URL").unwrap_or_default(),
            api_key: std::env::var("LEADFLOW_WORKFLOWS_KEY").ok(),
            timeout: (timeout_secs > 0).then(|| Duration::from_secs(timeout_secs)),
        };

        let form_concurrency = std::env::var("LEADFLOW_FORM_CONCURRENCY")
            .ok()
            .and_then(|v| v.parse().ok())
            .filter(|n| *n > 0)
            .unwrap_or(16);

        Self {
            bind_addr,
            log_level,
            fixtures_dir,
            workflows,
            form_concurrency,
        }
    }
}
