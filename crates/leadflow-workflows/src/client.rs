//! `WorkflowClient` implementation.

use serde::Serialize;

use crate::error::WorkflowError;
use crate::types::{SubmitReceipt, WorkflowResponse};
use crate::{API_KEY_HEADER, DEFAULT_BASE_URL, USER_AGENT, Workflow, WorkflowConfig};

/// Sends payloads to workflow webhooks.
///
/// Cheap to clone; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct WorkflowClient {
    base_url: String,
    api_key: Option<String>,
    client: reqwest::Client,
}

impl WorkflowClient {
    /// Build a client, filling empty config fields from the environment.
    ///
    /// # Errors
    ///
    /// Returns `WorkflowError::Config` if the base URL is not http(s) or the
    /// HTTP client cannot be built.
    #[allow(clippy::needless_pass_by_value)]
    pub fn with_config(cfg: WorkflowConfig) -> Result<Self, WorkflowError> {
        let base_url = first_non_empty(&[
            &cfg.base_url,
            &std::env::var("LEADFLOW_WORKFLOWS_URL").unwrap_or_default(),
            DEFAULT_BASE_URL,
        ])
        .trim_end_matches('/')
        .to_owned();

        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(WorkflowError::Config(format!(
                "workflow base URL must start with http:// or https://, got {base_url}"
            )));
        }

        let api_key = cfg
            .api_key
            .filter(|k| !k.is_empty())
            .or_else(|| std::env::var("LEADFLOW_WORKFLOWS_KEY").ok())
            .filter(|k| !k.is_empty());

        let mut builder = reqwest::Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = cfg.timeout.filter(|t| !t.is_zero()) {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| WorkflowError::Config(format!("http client: {e}")))?;

        Ok(Self {
            base_url,
            api_key,
            client,
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full webhook URL for `workflow`.
    #[must_use]
    pub fn webhook_url(&self, workflow: Workflow) -> String {
        format!(
            "{}/webhook/{}",
            self.base_url,
            urlencoding::encode(workflow.path())
        )
    }

    /// POST `payload` to `workflow`'s webhook once.
    ///
    /// There is no retry: a failed submission is reported to the caller,
    /// who may resubmit.
    ///
    /// # Errors
    ///
    /// - `Timeout` / `Network` when the backend could not be reached
    /// - `Api` for a non-2xx answer
    /// - `Json` for a 2xx answer that is not a workflow response
    /// - `Rejected` when the backend answers `success: false`
    pub async fn submit<P>(
        &self,
        workflow: Workflow,
        payload: &P,
    ) -> Result<SubmitReceipt, WorkflowError>
    where
        P: Serialize + ?Sized + Sync,
    {
        let url = self.webhook_url(workflow);
        let mut req = self.client.post(&url).json(payload);
        if let Some(key) = &self.api_key {
            req = req.header(API_KEY_HEADER, key);
        }

        tracing::debug!(workflow = %workflow, url = %url, "submitting workflow");

        let resp = req.send().await.map_err(|e| {
            tracing::warn!(workflow = %workflow, error = %e, "workflow unreachable");
            if e.is_timeout() {
                WorkflowError::Timeout
            } else {
                WorkflowError::Network(e)
            }
        })?;

        let status = resp.status();
        let text = resp.text().await.map_err(|e| {
            if e.is_timeout() {
                WorkflowError::Timeout
            } else {
                WorkflowError::Network(e)
            }
        })?;

        if !status.is_success() {
            let message = serde_json::from_str::<WorkflowResponse>(&text)
                .ok()
                .and_then(|b| b.error)
                .unwrap_or_else(|| format!("HTTP {}", status.as_u16()));
            tracing::warn!(
                workflow = %workflow,
                status = status.as_u16(),
                "workflow returned an error status"
            );
            return Err(WorkflowError::Api {
                status_code: status.as_u16(),
                message,
            });
        }

        let body: WorkflowResponse = serde_json::from_str(&text)?;
        if body.success {
            tracing::info!(workflow = %workflow, "workflow confirmed submission");
            Ok(SubmitReceipt { data: body.data })
        } else {
            let message = body.error.unwrap_or_default();
            tracing::info!(workflow = %workflow, reason = %message, "workflow rejected submission");
            Err(WorkflowError::Rejected(message))
        }
    }
}

fn first_non_empty(vals: &[&str]) -> String {
    vals.iter()
        .find(|v| !v.is_empty())
        .map(|v| (*v).to_owned())
        .unwrap_or_default()
}
