//! Agency clients, as listed on the admin clients page.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::bands::{HealthBand, HEALTH_SCORE};
use crate::record::{vocabulary, Record, SortKey};
use crate::view::Aggregates;
use crate::Identified;

use super::{mean, round1};

vocabulary! {
    /// Lifecycle status of a client account.
    pub enum ClientStatus: UnknownStatus {
        Active => "active",
        Onboarding => "onboarding",
        Paused => "paused",
        Churned => "churned",
    }
}

vocabulary! {
    /// Sortable columns of the clients table.
    pub enum ClientField: UnknownSortField {
        Company => "company",
        HealthScore => "health_score",
        Mrr => "mrr",
        LeadsDelivered => "leads_delivered",
        LastActivity => "last_activity",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    pub id: String,
    pub company: String,
    pub contact_name: String,
    pub email: String,
    pub plan: String,
    pub status: ClientStatus,
    /// 0-100.
    pub health_score: u8,
    /// Monthly recurring revenue in dollars.
    pub mrr: f64,
    pub leads_delivered: u64,
    #[serde(default)]
    pub last_activity: Option<DateTime<Utc>>,
}

impl Client {
    #[must_use]
    pub fn health_band(&self) -> HealthBand {
        HEALTH_SCORE.classify(f64::from(self.health_score))
    }

    /// Totals for the clients page header.
    ///
    /// Client and MRR totals describe the whole book; the health average and
    /// band counts follow the current filter.
    #[must_use]
    pub fn summary(all: &[Self], rows: &[Self]) -> Aggregates {
        let mut out = Aggregates::new();
        out.count("total_clients", all.len())
            .count(
                "active_clients",
                all.iter().filter(|c| c.status == ClientStatus::Active).count(),
            )
            .number("total_mrr", all.iter().map(|c| c.mrr).sum())
            .number(
                "avg_health_score",
                round1(mean(rows.iter().map(|c| f64::from(c.health_score)))),
            );
        for band in [HealthBand::Healthy, HealthBand::AtRisk, HealthBand::Critical] {
            let n = rows.iter().filter(|c| c.health_band() == band).count();
            out.count(format!("health_{}", band.as_str()), n);
        }
        out
    }
}

impl Identified for Client {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for Client {
    type Field = ClientField;
    type Status = ClientStatus;

    fn search_text(&self) -> Vec<&str> {
        vec![&self.company, &self.contact_name, &self.email]
    }

    fn status(&self) -> Option<ClientStatus> {
        Some(self.status)
    }

    fn sort_key(&self, field: ClientField) -> SortKey<'_> {
        match field {
            ClientField::Company => SortKey::Text(&self.company),
            ClientField::HealthScore => SortKey::Number(f64::from(self.health_score)),
            ClientField::Mrr => SortKey::Number(self.mrr),
            ClientField::LeadsDelivered => SortKey::count(self.leads_delivered),
            ClientField::LastActivity => self.last_activity.into(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::query::{FilterState, SortDirection};
    use crate::view::compute_view_with;

    fn client(id: &str, company: &str, status: ClientStatus, health: u8, mrr: f64) -> Client {
        Client {
            id: id.to_owned(),
            company: company.to_owned(),
            contact_name: format!("Owner of {company}"),
            email: format!("ops@{}.com", company.to_lowercase()),
            plan: "growth".to_owned(),
            status,
            health_score: health,
            mrr,
            leads_delivered: u64::from(health) * 2,
            last_activity: None,
        }
    }

    fn book() -> Vec<Client> {
        vec![
            client("c1", "Acme", ClientStatus::Active, 92, 4_000.0),
            client("c2", "Globex", ClientStatus::Paused, 50, 2_500.0),
            client("c3", "Initech", ClientStatus::Active, 49, 1_500.0),
            client("c4", "Umbrella", ClientStatus::Churned, 80, 0.0),
        ]
    }

    #[test]
    fn health_band_uses_inclusive_thresholds() {
        let b = book();
        assert_eq!(b[0].health_band(), HealthBand::Healthy);
        assert_eq!(b[1].health_band(), HealthBand::AtRisk);
        assert_eq!(b[2].health_band(), HealthBand::Critical);
        assert_eq!(b[3].health_band(), HealthBand::Healthy);
    }

    #[test]
    fn summary_mixes_book_totals_and_filtered_figures() {
        let all = book();
        let state = FilterState::new(ClientField::Company).with_status(ClientStatus::Active);
        let view = compute_view_with(&all, &state, Client::summary);

        assert_eq!(view.matched, 2);
        assert_eq!(view.aggregates.get_count("total_clients"), Some(4));
        assert_eq!(view.aggregates.get_count("active_clients"), Some(2));
        assert_eq!(view.aggregates.get_number("total_mrr"), Some(8_000.0));
        assert_eq!(view.aggregates.get_number("avg_health_score"), Some(70.5));
        assert_eq!(view.aggregates.get_count("health_healthy"), Some(1));
        assert_eq!(view.aggregates.get_count("health_at_risk"), Some(0));
        assert_eq!(view.aggregates.get_count("health_critical"), Some(1));
    }

    #[test]
    fn summary_of_empty_filter_has_zero_average() {
        let all = book();
        let state = FilterState::new(ClientField::Company).with_search("nobody");
        let view = compute_view_with(&all, &state, Client::summary);
        assert_eq!(view.aggregates.get_number("avg_health_score"), Some(0.0));
        assert_eq!(view.aggregates.get_count("total_clients"), Some(4));
    }

    #[test]
    fn sorts_by_mrr_descending() {
        let all = book();
        let state = FilterState::new(ClientField::Company).sorted_by(ClientField::Mrr, SortDirection::Desc);
        let view = compute_view_with(&all, &state, Client::summary);
        let ids: Vec<&str> = view.rows.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, ["c1", "c2", "c3", "c4"]);
    }

    #[test]
    fn search_covers_email() {
        let all = book();
        let state = FilterState::new(ClientField::Company).with_search("@GLOBEX");
        let view = compute_view_with(&all, &state, Client::summary);
        assert_eq!(view.rows.len(), 1);
        assert_eq!(view.rows[0].id, "c2");
    }

    #[test]
    fn deserializes_without_last_activity() {
        let json = r#"{
            "id": "c9", "company": "Hooli", "contact_name": "Gavin", "email": "g@hooli.com",
            "plan": "scale", "status": "onboarding", "health_score": 64,
            "mrr": 9000, "leads_delivered": 12
        }"#;
        let c: Client = serde_json::from_str(json).unwrap();
        assert_eq!(c.status, ClientStatus::Onboarding);
        assert!(c.last_activity.is_none());
        assert_eq!(c.sort_key(ClientField::LastActivity), SortKey::Missing);
    }
}
