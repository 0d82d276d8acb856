//! Webhook payloads and the backend's response envelope.

use serde::{Deserialize, Serialize};

use crate::error::WorkflowError;

/// Local checks run before a payload is sent.
pub trait Validate {
    /// # Errors
    ///
    /// Returns [`WorkflowError::Invalid`] naming the first bad field.
    fn validate(&self) -> Result<(), WorkflowError>;
}

/// The envelope every webhook answers with.
#[derive(Debug, Clone, Deserialize)]
pub struct WorkflowResponse {
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub data: Option<serde_json::Value>,
}

/// A confirmed submission.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SubmitReceipt {
    /// Whatever the workflow chose to return, e.g. a created record id.
    pub data: Option<serde_json::Value>,
}

impl SubmitReceipt {
    /// A string field of `data`, if present.
    #[must_use]
    pub fn data_str(&self, key: &str) -> Option<&str> {
        self.data.as_ref()?.get(key)?.as_str()
    }
}

/// Public contact form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub company: String,
    pub message: String,
}

/// Public demo booking form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DemoRequest {
    pub name: String,
    pub email: String,
    pub company: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Pause or resume a campaign. The workflow decides which.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CampaignAction {
    pub campaign_id: String,
    pub client_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Invite a new client to the dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientInvite {
    pub company: String,
    pub contact_name: String,
    pub email: String,
    pub plan: String,
}

/// Support request raised from a client dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientRequestForm {
    /// Filled from the dashboard route rather than the form body.
    #[serde(default)]
    pub client_id: String,
    pub subject: String,
    pub category: String,
    #[serde(default)]
    pub details: String,
}

fn required(field: &str, value: &str) -> Result<(), WorkflowError> {
    if value.trim().is_empty() {
        return Err(WorkflowError::Invalid(format!("{field} is required")));
    }
    Ok(())
}

fn email(value: &str) -> Result<(), WorkflowError> {
    required("email", value)?;
    let value = value.trim();
    let valid = match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !value.contains(char::is_whitespace)
        }
        None => false,
    };
    if valid {
        Ok(())
    } else {
        Err(WorkflowError::Invalid(
            "email must be a valid email address".to_owned(),
        ))
    }
}

impl Validate for ContactForm {
    fn validate(&self) -> Result<(), WorkflowError> {
        required("name", &self.name)?;
        email(&self.email)?;
        required("message", &self.message)
    }
}

impl Validate for DemoRequest {
    fn validate(&self) -> Result<(), WorkflowError> {
        required("name", &self.name)?;
        email(&self.email)?;
        required("company", &self.company)
    }
}

impl Validate for CampaignAction {
    fn validate(&self) -> Result<(), WorkflowError> {
        required("campaign_id", &self.campaign_id)?;
        required("client_id", &self.client_id)
    }
}

impl Validate for ClientInvite {
    fn validate(&self) -> Result<(), WorkflowError> {
        required("company", &self.company)?;
        required("contact_name", &self.contact_name)?;
        email(&self.email)?;
        required("plan", &self.plan)
    }
}

impl Validate for ClientRequestForm {
    fn validate(&self) -> Result<(), WorkflowError> {
        required("client_id", &self.client_id)?;
        required("subject", &self.subject)?;
        required("category", &self.category)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn contact(email: &str) -> ContactForm {
        ContactForm {
            name: "Ada".to_owned(),
            email: email.to_owned(),
            company: String::new(),
            message: "Hello".to_owned(),
        }
    }

    fn invalid_message(result: Result<(), WorkflowError>) -> String {
        match result {
            Err(WorkflowError::Invalid(msg)) => msg,
            other => format!("not an Invalid error: {other:?}"),
        }
    }

    #[test]
    fn accepts_plain_addresses() {
        assert!(contact("ada@example.com").validate().is_ok());
        assert!(contact(" ada.l@mail.example.co.uk ").validate().is_ok());
    }

    #[test]
    fn rejects_malformed_addresses() {
        for bad in ["ada", "@example.com", "ada@", "ada@example", "a@b@c.com", "ada @x.com", "ada@.com"] {
            assert_eq!(
                invalid_message(contact(bad).validate()),
                "email must be a valid email address",
                "{bad}"
            );
        }
    }

    #[test]
    fn whitespace_is_not_a_value() {
        let mut form = contact("ada@example.com");
        form.message = "   ".to_owned();
        assert_eq!(invalid_message(form.validate()), "message is required");
    }

    #[test]
    fn client_request_needs_route_client() {
        let form = ClientRequestForm {
            client_id: String::new(),
            subject: "New domain".to_owned(),
            category: "domain".to_owned(),
            details: String::new(),
        };
        assert_eq!(invalid_message(form.validate()), "client_id is required");
    }

    #[test]
    fn optional_fields_are_omitted_on_the_wire() {
        let demo = DemoRequest {
            name: "Ada".to_owned(),
            email: "ada@example.com".to_owned(),
            company: "AE".to_owned(),
            team_size: None,
            notes: None,
        };
        let json = serde_json::to_value(&demo).unwrap();
        assert!(json.get("team_size").is_none());
    }

    #[test]
    fn response_envelope_tolerates_missing_fields() {
        let resp: WorkflowResponse = serde_json::from_str(r#"{"success":true}"#).unwrap();
        assert!(resp.success);
        assert!(resp.error.is_none());
        assert!(resp.data.is_none());
    }

    #[test]
    fn receipt_reads_string_data() {
        let receipt = SubmitReceipt {
            data: Some(serde_json::json!({ "id": "req_42", "count": 3 })),
        };
        assert_eq!(receipt.data_str("id"), Some("req_42"));
        assert_eq!(receipt.data_str("count"), None);
        assert_eq!(SubmitReceipt::default().data_str("id"), None);
    }
}
