//! Sending domains and their deliverability signals.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::bands::{SignalBand, BOUNCE_RATE, DELIVERABILITY_RATE};
use crate::record::{vocabulary, Record, SortKey};
use crate::view::Aggregates;
use crate::Identified;

use super::{mean, round1};

vocabulary! {
    pub enum DomainStatus: UnknownStatus {
        Active => "active",
        Warming => "warming",
        Paused => "paused",
    }
}

vocabulary! {
    pub enum DomainField: UnknownSortField {
        Domain => "domain",
        DeliverabilityRate => "deliverability_rate",
        BounceRate => "bounce_rate",
        Inboxes => "inboxes",
        LastChecked => "last_checked",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Domain {
    pub id: String,
    pub domain: String,
    pub client_id: String,
    pub status: DomainStatus,
    pub inboxes: u32,
    /// Inbox placement, percent.
    pub deliverability_rate: f64,
    /// Percent.
    pub bounce_rate: f64,
    #[serde(default)]
    pub last_checked: Option<DateTime<Utc>>,
}

const SIGNAL_BANDS: [SignalBand; 3] = [SignalBand::Healthy, SignalBand::Warning, SignalBand::Critical];

impl Domain {
    #[must_use]
    pub fn deliverability_band(&self) -> SignalBand {
        DELIVERABILITY_RATE.classify(self.deliverability_rate)
    }

    #[must_use]
    pub fn bounce_band(&self) -> SignalBand {
        BOUNCE_RATE.classify(self.bounce_rate)
    }

    #[must_use]
    pub fn summary(all: &[Self], rows: &[Self]) -> Aggregates {
        let mut out = Aggregates::new();
        out.count("total_domains", all.len())
            .count(
                "total_inboxes",
                rows.iter()
                    .map(|d| usize::try_from(d.inboxes).unwrap_or(0))
                    .sum(),
            )
            .number(
                "avg_deliverability",
                round1(mean(rows.iter().map(|d| d.deliverability_rate))),
            );
        for band in SIGNAL_BANDS {
            let n = rows.iter().filter(|d| d.deliverability_band() == band).count();
            out.count(format!("deliverability_{}", band.as_str()), n);
            let n = rows.iter().filter(|d| d.bounce_band() == band).count();
            out.count(format!("bounce_{}", band.as_str()), n);
        }
        out
    }
}

impl Identified for Domain {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for Domain {
    type Field = DomainField;
    type Status = DomainStatus;

    fn search_text(&self) -> Vec<&str> {
        vec![&self.domain]
    }

    fn status(&self) -> Option<DomainStatus> {
        Some(self.status)
    }

    fn sort_key(&self, field: DomainField) -> SortKey<'_> {
        match field {
            DomainField::Domain => SortKey::Text(&self.domain),
            DomainField::DeliverabilityRate => SortKey::Number(self.deliverability_rate),
            DomainField::BounceRate => SortKey::Number(self.bounce_rate),
            DomainField::Inboxes => SortKey::Number(f64::from(self.inboxes)),
            DomainField::LastChecked => self.last_checked.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::FilterState;
    use crate::view::compute_view_with;

    fn domain(id: &str, deliverability: f64, bounce: f64) -> Domain {
        Domain {
            id: id.to_owned(),
            domain: format!("{id}.example.com"),
            client_id: "c1".to_owned(),
            status: DomainStatus::Active,
            inboxes: 3,
            deliverability_rate: deliverability,
            bounce_rate: bounce,
            last_checked: None,
        }
    }

    #[test]
    fn signals_classify_on_threshold() {
        let d = domain("mail", 95.0, 5.0);
        assert_eq!(d.deliverability_band(), SignalBand::Healthy);
        assert_eq!(d.bounce_band(), SignalBand::Critical);

        let d = domain("mail", 84.9, 1.99);
        assert_eq!(d.deliverability_band(), SignalBand::Critical);
        assert_eq!(d.bounce_band(), SignalBand::Healthy);
    }

    #[test]
    fn summary_bands_and_average() {
        let all = vec![
            domain("a", 97.0, 0.5),
            domain("b", 90.0, 2.0),
            domain("c", 80.0, 6.0),
        ];
        let view = compute_view_with(&all, &FilterState::new(DomainField::Domain), Domain::summary);
        let agg = &view.aggregates;

        assert_eq!(agg.get_number("avg_deliverability"), Some(89.0));
        assert_eq!(agg.get_count("total_inboxes"), Some(9));
        assert_eq!(agg.get_count("deliverability_healthy"), Some(1));
        assert_eq!(agg.get_count("deliverability_warning"), Some(1));
        assert_eq!(agg.get_count("deliverability_critical"), Some(1));
        assert_eq!(agg.get_count("bounce_healthy"), Some(1));
        assert_eq!(agg.get_count("bounce_warning"), Some(1));
        assert_eq!(agg.get_count("bounce_critical"), Some(1));
    }

    #[test]
    fn empty_summary_is_zeroed() {
        let view = compute_view_with(&[], &FilterState::new(DomainField::Domain), Domain::summary);
        assert_eq!(view.aggregates.get_number("avg_deliverability"), Some(0.0));
        assert_eq!(view.aggregates.get_count("bounce_critical"), Some(0));
    }
}
