//! Booked prospect meetings on the client dashboard.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::percent::rounded_percent;
use crate::record::{vocabulary, Record, SortKey};
use crate::view::{status_counts, Aggregates};
use crate::Identified;

vocabulary! {
    pub enum MeetingStatus: UnknownStatus {
        Scheduled => "scheduled",
        Completed => "completed",
        NoShow => "no_show",
        Cancelled => "cancelled",
    }
}

vocabulary! {
    pub enum MeetingField: UnknownSortField {
        ProspectName => "prospect_name",
        ProspectCompany => "prospect_company",
        ScheduledAt => "scheduled_at",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meeting {
    pub id: String,
    pub prospect_name: String,
    pub prospect_company: String,
    pub client_id: String,
    pub status: MeetingStatus,
    #[serde(default)]
    pub scheduled_at: Option<DateTime<Utc>>,
}

impl Meeting {
    /// Status tab counts plus the show rate over meetings that have happened.
    #[must_use]
    pub fn summary(all: &[Self], _rows: &[Self]) -> Aggregates {
        let mut out = status_counts(all);
        let count = |status: MeetingStatus| {
            u64::try_from(all.iter().filter(|m| m.status == status).count()).unwrap_or(u64::MAX)
        };
        let completed = count(MeetingStatus::Completed);
        let no_show = count(MeetingStatus::NoShow);
        out.number(
            "show_rate",
            f64::from(rounded_percent(completed, completed + no_show)),
        );
        out
    }
}

impl Identified for Meeting {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for Meeting {
    type Field = MeetingField;
    type Status = MeetingStatus;

    fn search_text(&self) -> Vec<&str> {
        vec![&self.prospect_name, &self.prospect_company]
    }

    fn status(&self) -> Option<MeetingStatus> {
        Some(self.status)
    }

    fn sort_key(&self, field: MeetingField) -> SortKey<'_> {
        match field {
            MeetingField::ProspectName => SortKey::Text(&self.prospect_name),
            MeetingField::ProspectCompany => SortKey::Text(&self.prospect_company),
            MeetingField::ScheduledAt => self.scheduled_at.into(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::query::{FilterState, SortDirection};
    use crate::view::compute_view_with;
    use chrono::TimeZone;

    fn meeting(id: &str, status: MeetingStatus, day: Option<u32>) -> Meeting {
        Meeting {
            id: id.to_owned(),
            prospect_name: format!("Prospect {id}"),
            prospect_company: "Initech".to_owned(),
            client_id: "c1".to_owned(),
            status,
            scheduled_at: day.map(|d| Utc.with_ymd_and_hms(2024, 5, d, 15, 0, 0).unwrap()),
        }
    }

    #[test]
    fn show_rate_ignores_scheduled_and_cancelled() {
        let all = vec![
            meeting("1", MeetingStatus::Completed, Some(1)),
            meeting("2", MeetingStatus::Completed, Some(2)),
            meeting("3", MeetingStatus::NoShow, Some(3)),
            meeting("4", MeetingStatus::Scheduled, Some(20)),
            meeting("5", MeetingStatus::Cancelled, None),
        ];
        let view = compute_view_with(&all, &FilterState::new(MeetingField::ScheduledAt), Meeting::summary);
        assert_eq!(view.aggregates.get_number("show_rate"), Some(67.0));
        assert_eq!(view.aggregates.get_count("no_show"), Some(1));
        assert_eq!(view.aggregates.get_count("cancelled"), Some(1));
    }

    #[test]
    fn show_rate_without_history_is_zero() {
        let all = vec![meeting("1", MeetingStatus::Scheduled, Some(9))];
        let view = compute_view_with(&all, &FilterState::new(MeetingField::ScheduledAt), Meeting::summary);
        assert_eq!(view.aggregates.get_number("show_rate"), Some(0.0));
    }

    #[test]
    fn unscheduled_meetings_sort_last() {
        let all = vec![
            meeting("a", MeetingStatus::Cancelled, None),
            meeting("b", MeetingStatus::Scheduled, Some(12)),
            meeting("c", MeetingStatus::Completed, Some(3)),
        ];
        let state = FilterState::new(MeetingField::ProspectName)
            .sorted_by(MeetingField::ScheduledAt, SortDirection::Asc);
        let view = compute_view_with(&all, &state, Meeting::summary);
        let ids: Vec<&str> = view.rows.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, ["c", "b", "a"]);
    }

    #[test]
    fn no_show_uses_snake_case() {
        assert_eq!("no_show".parse::<MeetingStatus>().unwrap(), MeetingStatus::NoShow);
        assert_eq!(
            serde_json::to_string(&MeetingStatus::NoShow).unwrap(),
            "\"no_show\""
        );
    }
}
