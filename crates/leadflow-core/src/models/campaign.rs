//! Outbound campaigns, on both the admin and client dashboards.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::percent::{percent_of, Sentiment};
use crate::record::{vocabulary, Record, SortKey};
use crate::view::{status_counts, Aggregates};
use crate::Identified;

use super::round1;

vocabulary! {
    pub enum CampaignStatus: UnknownStatus {
        Active => "active",
        Paused => "paused",
        Completed => "completed",
        Draft => "draft",
    }
}

vocabulary! {
    pub enum CampaignField: UnknownSortField {
        Name => "name",
        EmailsSent => "emails_sent",
        Replies => "replies",
        MeetingsBooked => "meetings_booked",
        StartedAt => "started_at",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Campaign {
    pub id: String,
    pub name: String,
    pub client_id: String,
    pub client_name: String,
    pub status: CampaignStatus,
    pub emails_sent: u64,
    #[serde(default)]
    pub replies: Sentiment,
    pub meetings_booked: u64,
    #[serde(default)]
    pub started_at: Option<DateTime<Utc>>,
}

impl Campaign {
    /// Replies as a percentage of emails sent.
    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn reply_rate(&self) -> f64 {
        percent_of(self.replies.total() as f64, self.emails_sent as f64)
    }

    /// Campaign page header.
    ///
    /// Status counts cover every campaign so the tabs keep their numbers
    /// while a filter is applied; volume and reply figures follow the rows.
    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn summary(all: &[Self], rows: &[Self]) -> Aggregates {
        let mut out = status_counts(all);

        let sent: u64 = rows.iter().map(|c| c.emails_sent).sum();
        let meetings: u64 = rows.iter().map(|c| c.meetings_booked).sum();
        let replies: Sentiment = rows.iter().map(|c| c.replies).sum();
        let shares = replies.shares();

        out.number("emails_sent", sent as f64)
            .number("meetings_booked", meetings as f64)
            .number("replies", replies.total() as f64)
            .number("reply_rate", round1(percent_of(replies.total() as f64, sent as f64)))
            .number("positive_share", f64::from(shares.positive))
            .number("neutral_share", f64::from(shares.neutral))
            .number("negative_share", f64::from(shares.negative));
        out
    }
}

impl Identified for Campaign {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for Campaign {
    type Field = CampaignField;
    type Status = CampaignStatus;

    fn search_text(&self) -> Vec<&str> {
        vec![&self.name, &self.client_name]
    }

    fn status(&self) -> Option<CampaignStatus> {
        Some(self.status)
    }

    fn sort_key(&self, field: CampaignField) -> SortKey<'_> {
        match field {
            CampaignField::Name => SortKey::Text(&self.name),
            CampaignField::EmailsSent => SortKey::count(self.emails_sent),
            CampaignField::Replies => SortKey::count(self.replies.total()),
            CampaignField::MeetingsBooked => SortKey::count(self.meetings_booked),
            CampaignField::StartedAt => self.started_at.into(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::query::{FilterState, SortDirection, StatusFilter};
    use crate::view::compute_view_with;

    fn campaign(id: &str, status: CampaignStatus, sent: u64, replies: [u64; 3]) -> Campaign {
        Campaign {
            id: id.to_owned(),
            name: format!("Campaign {id}"),
            client_id: "c1".to_owned(),
            client_name: "Acme".to_owned(),
            status,
            emails_sent: sent,
            replies: Sentiment {
                positive: replies[0],
                neutral: replies[1],
                negative: replies[2],
            },
            meetings_booked: replies[0] / 2,
            started_at: None,
        }
    }

    fn sample() -> Vec<Campaign> {
        vec![
            campaign("a", CampaignStatus::Active, 1_000, [10, 5, 5]),
            campaign("b", CampaignStatus::Paused, 500, [1, 1, 1]),
            campaign("c", CampaignStatus::Active, 0, [0, 0, 0]),
            campaign("d", CampaignStatus::Draft, 0, [0, 0, 0]),
        ]
    }

    #[test]
    fn reply_rate_guards_unsent_campaigns() {
        let s = sample();
        assert!((s[0].reply_rate() - 2.0).abs() < f64::EPSILON);
        assert!(s[2].reply_rate().abs() < f64::EPSILON);
    }

    #[test]
    fn summary_counts_every_status_over_all_campaigns() {
        let all = sample();
        let state = FilterState::new(CampaignField::Name).with_status(CampaignStatus::Paused);
        let view = compute_view_with(&all, &state, Campaign::summary);

        assert_eq!(view.aggregates.get_count("active"), Some(2));
        assert_eq!(view.aggregates.get_count("paused"), Some(1));
        assert_eq!(view.aggregates.get_count("completed"), Some(0));
        assert_eq!(view.aggregates.get_count("draft"), Some(1));
        assert_eq!(view.aggregates.get_number("emails_sent"), Some(500.0));
        assert_eq!(view.aggregates.get_number("reply_rate"), Some(0.6));
    }

    #[test]
    fn sentiment_shares_sum_to_100() {
        let all = sample();
        let state = FilterState::new(CampaignField::Name).with_status(CampaignStatus::Paused);
        let view = compute_view_with(&all, &state, Campaign::summary);

        let shares: Vec<f64> = ["positive_share", "neutral_share", "negative_share"]
            .iter()
            .map(|k| view.aggregates.get_number(k).unwrap())
            .collect();
        assert_eq!(shares, vec![34.0, 33.0, 33.0]);
    }

    #[test]
    fn no_replies_means_zero_shares() {
        let all = sample();
        let state = FilterState::new(CampaignField::Name).with_status(CampaignStatus::Draft);
        let view = compute_view_with(&all, &state, Campaign::summary);
        assert_eq!(view.aggregates.get_number("positive_share"), Some(0.0));
        assert_eq!(view.aggregates.get_number("reply_rate"), Some(0.0));
    }

    #[test]
    fn sorts_by_total_replies() {
        let all = sample();
        let mut state = FilterState::new(CampaignField::Name);
        state.status = StatusFilter::All;
        let state = state.sorted_by(CampaignField::Replies, SortDirection::Desc);
        let view = compute_view_with(&all, &state, Campaign::summary);
        let ids: Vec<&str> = view.rows.iter().map(|c| c.id.as_str()).collect();
        // c and d tie at zero replies and keep their input order.
        assert_eq!(ids, ["a", "b", "c", "d"]);
    }
}
