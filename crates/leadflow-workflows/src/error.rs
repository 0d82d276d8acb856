//! Error types for workflow submissions.

const UNREACHABLE: &str = "We couldn't reach the server. Check your connection and try again.";
const UNAVAILABLE: &str = "Something went wrong on our side. Please try again in a moment.";

/// Everything that can stop a submission from being confirmed.
#[derive(Debug, thiserror::Error)]
pub enum WorkflowError {
    /// Missing or unusable client configuration.
    #[error("workflow config error: {0}")]
    Config(String),

    /// The payload failed validation and was never sent.
    #[error("invalid submission: {0}")]
    Invalid(String),

    /// A submission for the same key has not settled yet.
    #[error("submission \"{0}\" is already in flight")]
    InFlight(String),

    /// The backend answered `success: false`.
    #[error("workflow rejected the submission: {0}")]
    Rejected(String),

    /// The backend answered with a non-2xx status.
    #[error("workflow API error {status_code}: {message}")]
    Api {
        status_code: u16,
        message: String,
    },

    #[error("workflow request timed out")]
    Timeout,

    #[error("workflow network error: {0}")]
    Network(#[from] reqwest::Error),

    /// A 2xx answer that is not a workflow response.
    #[error("workflow json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl WorkflowError {
    /// The one message shown to the person who submitted the form.
    ///
    /// Validation and rejection messages are passed through; transport and
    /// backend failures collapse to a generic line.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Invalid(msg) => msg.clone(),
            Self::Rejected(msg) if !msg.trim().is_empty() => msg.clone(),
            Self::InFlight(_) => "This form is already being submitted.".to_owned(),
            Self::Timeout | Self::Network(_) => UNREACHABLE.to_owned(),
            Self::Rejected(_) | Self::Config(_) | Self::Api { .. } | Self::Json(_) => {
                UNAVAILABLE.to_owned()
            }
        }
    }

    /// True for failures where nothing was delivered to the backend.
    #[must_use]
    pub const fn is_local(&self) -> bool {
        matches!(self, Self::Config(_) | Self::Invalid(_) | Self::InFlight(_))
    }
}
