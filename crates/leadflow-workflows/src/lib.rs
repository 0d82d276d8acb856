//! Client for the workflow-automation backend.
//!
//! Every form in Leadflow (contact, demo request, client invite, support
//! request) and every campaign pause/resume is delivered to a webhook on an
//! external automation service. The backend answers with
//! `{ "success": bool, "error"?: string, "data"?: any }`; only a `success:
//! true` answer counts as a confirmed submission.
//!
//! ```rust,no_run
//! use leadflow_workflows::{ContactForm, Validate, Workflow, WorkflowClient, WorkflowConfig};
//!
//! # async fn example() -> Result<(), leadflow_workflows::WorkflowError> {
//! let client = WorkflowClient::with_config(WorkflowConfig::default())?;
//! let form = ContactForm {
//!     name: "Ada".to_owned(),
//!     email: "ada@example.com".to_owned(),
//!     company: "Analytical Engines".to_owned(),
//!     message: "Tell me more".to_owned(),
//! };
//! form.validate()?;
//! client.submit(Workflow::ContactForm, &form).await?;
//! # Ok(())
//! # }
//! ```

mod client;
mod error;
mod submission;
mod types;

pub use client::WorkflowClient;
pub use error::WorkflowError;
pub use submission::{InFlight, SubmissionGuard};
pub use types::{
    CampaignAction, ClientInvite, ClientRequestForm, ContactForm, DemoRequest, SubmitReceipt,
    Validate, WorkflowResponse,
};

use std::fmt;
use std::time::Duration;

use serde::Serialize;

const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5678";
const API_KEY_HEADER: &str = "X-Api-Key";
const USER_AGENT: &str = concat!("leadflow-workflows/", env!("CARGO_PKG_VERSION"));

/// Configuration for [`WorkflowClient`].
///
/// Empty fields fall back to `LEADFLOW_WORKFLOWS_URL` and
/// `LEADFLOW_WORKFLOWS_KEY`.
#[derive(Debug, Clone, Default)]
pub struct WorkflowConfig {
    /// Automation service base URL; webhooks live under `{base_url}/webhook/`.
    pub base_url: String,
    /// Sent as `X-Api-Key` when set.
    pub api_key: Option<String>,
    /// Per-request timeout. `None` waits for the transport's own limits.
    pub timeout: Option<Duration>,
}

/// A webhook on the automation backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Workflow {
    ContactForm,
    DemoRequest,
    CampaignPause,
    CampaignResume,
    ClientInvite,
    ClientRequest,
}

impl Workflow {
    pub const ALL: [Self; 6] = [
        Self::ContactForm,
        Self::DemoRequest,
        Self::CampaignPause,
        Self::CampaignResume,
        Self::ClientInvite,
        Self::ClientRequest,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ContactForm => "contact_form",
            Self::DemoRequest => "demo_request",
            Self::CampaignPause => "campaign_pause",
            Self::CampaignResume => "campaign_resume",
            Self::ClientInvite => "client_invite",
            Self::ClientRequest => "client_request",
        }
    }

    /// Path segment under `/webhook/`.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::ContactForm => "contact-form",
            Self::DemoRequest => "demo-request",
            Self::CampaignPause => "campaign-pause",
            Self::CampaignResume => "campaign-resume",
            Self::ClientInvite => "client-invite",
            Self::ClientRequest => "client-request",
        }
    }
}

impl fmt::Display for Workflow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
