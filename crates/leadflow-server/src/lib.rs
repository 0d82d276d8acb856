//! Leadflow HTTP server.
//!
//! Serves the admin and client dashboard tables as JSON views at `/v1/*`,
//! and relays form submissions to the workflow-automation backend.

pub mod config;
pub mod error;
pub mod routes;
pub mod seed;
pub mod state;
