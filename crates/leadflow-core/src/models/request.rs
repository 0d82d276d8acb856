//! Support requests raised by clients from their dashboard.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::record::{vocabulary, Record, SortKey};
use crate::view::{status_counts, Aggregates};
use crate::Identified;

vocabulary! {
    pub enum RequestStatus: UnknownStatus {
        Open => "open",
        InProgress => "in_progress",
        Resolved => "resolved",
    }
}

vocabulary! {
    pub enum RequestCategory: UnknownValue {
        CopyChange => "copy_change",
        NewCampaign => "new_campaign",
        Domain => "domain",
        Billing => "billing",
        Other => "other",
    }
}

vocabulary! {
    pub enum RequestField: UnknownSortField {
        Subject => "subject",
        CreatedAt => "created_at",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientRequest {
    pub id: String,
    pub client_id: String,
    pub subject: String,
    pub category: RequestCategory,
    pub status: RequestStatus,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl ClientRequest {
    #[must_use]
    pub fn summary(all: &[Self], _rows: &[Self]) -> Aggregates {
        status_counts(all)
    }
}

impl Identified for ClientRequest {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for ClientRequest {
    type Field = RequestField;
    type Status = RequestStatus;

    fn search_text(&self) -> Vec<&str> {
        vec![&self.subject]
    }

    fn status(&self) -> Option<RequestStatus> {
        Some(self.status)
    }

    fn sort_key(&self, field: RequestField) -> SortKey<'_> {
        match field {
            RequestField::Subject => SortKey::Text(&self.subject),
            RequestField::CreatedAt => self.created_at.into(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::query::FilterState;
    use crate::view::compute_view_with;

    fn request(id: &str, subject: &str, status: RequestStatus) -> ClientRequest {
        ClientRequest {
            id: id.to_owned(),
            client_id: "c1".to_owned(),
            subject: subject.to_owned(),
            category: RequestCategory::Other,
            status,
            created_at: None,
        }
    }

    #[test]
    fn open_count_covers_all_requests() {
        let all = vec![
            request("1", "Swap CTA copy", RequestStatus::Open),
            request("2", "New domain", RequestStatus::Open),
            request("3", "Invoice", RequestStatus::Resolved),
        ];
        let state = FilterState::new(RequestField::Subject).with_search("invoice");
        let view = compute_view_with(&all, &state, ClientRequest::summary);
        assert_eq!(view.matched, 1);
        assert_eq!(view.aggregates.get_count("open"), Some(2));
        assert_eq!(view.aggregates.get_count("in_progress"), Some(0));
    }

    #[test]
    fn category_is_a_closed_vocabulary() {
        assert_eq!(
            "copy_change".parse::<RequestCategory>().unwrap(),
            RequestCategory::CopyChange
        );
        assert!("refund".parse::<RequestCategory>().is_err());
    }
}
