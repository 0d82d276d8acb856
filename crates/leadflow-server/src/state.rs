//! Shared application state for the Leadflow server.
//!
//! A single [`AppState`] is constructed at startup and shared across all
//! Axum handlers via `Arc`. It holds one record store per dashboard table,
//! the workflow client, and the in-flight submission guard.

use std::sync::Arc;

use leadflow_core::models::{Campaign, Client, ClientRequest, Domain, Meeting};
use leadflow_storage::RecordStore;
use leadflow_workflows::{SubmissionGuard, WorkflowClient};

/// The record stores behind every table.
#[derive(Clone)]
pub struct Stores {
    pub clients: Arc<dyn RecordStore<Client>>,
    pub campaigns: Arc<dyn RecordStore<Campaign>>,
    pub domains: Arc<dyn RecordStore<Domain>>,
    pub meetings: Arc<dyn RecordStore<Meeting>>,
    pub requests: Arc<dyn RecordStore<ClientRequest>>,
}

/// Shared application state passed to all HTTP handlers.
pub struct AppState {
    pub stores: Stores,
    /// Delivers form payloads to the automation backend.
    pub workflows: WorkflowClient,
    /// At most one outstanding submission per form key.
    pub submissions: SubmissionGuard,
}

impl AppState {
    #[must_use]
    pub fn new(stores: Stores, workflows: WorkflowClient) -> Self {
        Self {
            stores,
            workflows,
            submissions: SubmissionGuard::new(),
        }
    }
}

impl std::fmt::Debug for Stores {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Stores").finish_non_exhaustive()
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("workflows", &self.workflows.base_url())
            .finish_non_exhaustive()
    }
}
