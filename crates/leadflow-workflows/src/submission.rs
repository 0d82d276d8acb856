//! Single in-flight submission per form.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::error::WorkflowError;

/// Tracks which submission keys currently have a request outstanding.
///
/// Clones share state, so one guard can sit in shared server state and be
/// consulted from every handler.
#[derive(Debug, Clone, Default)]
pub struct SubmissionGuard {
    in_flight: Arc<Mutex<HashSet<String>>>,
}

/// Proof that a submission for `key` is outstanding.
///
/// Dropping it, whether the submission succeeded or failed, frees the key.
#[derive(Debug)]
#[must_use = "the key is released as soon as the token is dropped"]
pub struct InFlight {
    key: String,
    in_flight: Arc<Mutex<HashSet<String>>>,
}

impl SubmissionGuard {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim `key`.
    ///
    /// # Errors
    ///
    /// Returns `WorkflowError::InFlight` while an earlier token for the same
    /// key is alive.
    pub fn begin(&self, key: impl Into<String>) -> Result<InFlight, WorkflowError> {
        let key = key.into();
        if !lock(&self.in_flight).insert(key.clone()) {
            tracing::debug!(key = %key, "submission already in flight");
            return Err(WorkflowError::InFlight(key));
        }
        Ok(InFlight {
            key,
            in_flight: Arc::clone(&self.in_flight),
        })
    }
}

impl InFlight {
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        lock(&self.in_flight).remove(&self.key);
    }
}

// The set stays consistent even if a holder panicked mid-insert.
fn lock(set: &Mutex<HashSet<String>>) -> MutexGuard<'_, HashSet<String>> {
    set.lock().unwrap_or_else(PoisonError::into_inner)
}
