//! Filter state: search text, status filter, and the sort directive.
//!
//! Filter state is transient and owned by whoever renders the table. It is
//! created with [`FilterState::new`] at mount time, mutated by user input,
//! and never persisted. The sort directive follows a small state machine
//! ([`SortState::toggle`]): clicking the active column flips direction,
//! clicking any other column selects it ascending.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize, Serializer};

use crate::error::ViewError;
use crate::record::Vocabulary;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// The opposite direction.
    #[must_use]
    pub const fn flip(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    /// Apply this direction to an ascending comparison result.
    #[must_use]
    pub const fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Asc => ordering,
            Self::Desc => ordering.reverse(),
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortDirection {
    type Err = ViewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "asc" | "ascending" => Ok(Self::Asc),
            "desc" | "descending" => Ok(Self::Desc),
            _ => Err(ViewError::UnknownDirection {
                value: s.to_owned(),
            }),
        }
    }
}

/// The active sort column and direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SortState<F> {
    pub field: F,
    pub direction: SortDirection,
}

impl<F: Copy + Eq> SortState<F> {
    /// Initial state: `field`, ascending.
    #[must_use]
    pub const fn new(field: F) -> Self {
        Self {
            field,
            direction: SortDirection::Asc,
        }
    }

    /// Handle a click on the sort control for `clicked`.
    ///
    /// Same column flips the direction; a different column is selected and
    /// the direction resets to ascending.
    pub fn toggle(&mut self, clicked: F) {
        if self.field == clicked {
            self.direction = self.direction.flip();
        } else {
            self.field = clicked;
            self.direction = SortDirection::Asc;
        }
    }

    /// By-value form of [`toggle`](Self::toggle).
    #[must_use]
    pub fn toggled(mut self, clicked: F) -> Self {
        self.toggle(clicked);
        self
    }
}

/// A status filter: everything, or exactly one status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter<S> {
    #[default]
    All,
    Only(S),
}

impl<S: PartialEq> StatusFilter<S> {
    /// Whether a record with `status` passes this filter.
    ///
    /// Records without a status only pass [`StatusFilter::All`].
    pub fn admits(&self, status: Option<&S>) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => status == Some(wanted),
        }
    }
}

impl<S: Vocabulary> FromStr for StatusFilter<S> {
    type Err = ViewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        s.parse::<S>().map(Self::Only).map_err(|err| match err {
            ViewError::UnknownSortField { value, expected }
            | ViewError::UnknownValue { value, expected } => {
                ViewError::UnknownStatus { value, expected }
            }
            other => other,
        })
    }
}

impl<S: Vocabulary> Serialize for StatusFilter<S> {
    fn serialize<Z: Serializer>(&self, serializer: Z) -> Result<Z::Ok, Z::Error> {
        match self {
            Self::All => serializer.serialize_str("all"),
            Self::Only(status) => serializer.serialize_str(status.as_str()),
        }
    }
}

/// The full set of active table controls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(bound(serialize = "F: Serialize, S: Vocabulary"))]
pub struct FilterState<F, S> {
    /// Search text; empty means no text filtering.
    pub search: String,
    pub status: StatusFilter<S>,
    pub sort: SortState<F>,
}

impl<F: Copy + Eq, S> FilterState<F, S> {
    /// Mount-time defaults: no search, every status, `default_field` ascending.
    #[must_use]
    pub const fn new(default_field: F) -> Self {
        Self {
            search: String::new(),
            status: StatusFilter::All,
            sort: SortState::new(default_field),
        }
    }

    /// A filter that retains everything, sorted by `field` ascending.
    #[must_use]
    pub const fn identity(field: F) -> Self {
        Self::new(field)
    }

    #[must_use]
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    #[must_use]
    pub fn with_status(mut self, status: S) -> Self {
        self.status = StatusFilter::Only(status);
        self
    }

    #[must_use]
    pub fn sorted_by(mut self, field: F, direction: SortDirection) -> Self {
        self.sort = SortState { field, direction };
        self
    }
}

/// Filter state as it arrives over the wire, every control optional.
///
/// `click` names a column whose sort control was just clicked; it is applied
/// through [`SortState::toggle`] after `sort` and `dir` are read, so a client
/// can echo back the state it was given plus one click.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FilterParams {
    pub search: Option<String>,
    pub status: Option<String>,
    pub sort: Option<String>,
    pub dir: Option<String>,
    pub click: Option<String>,
}

impl FilterParams {
    /// Parse into typed filter state, filling gaps with mount-time defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError`] if any present control names an unknown
    /// status, field, or direction.
    pub fn parse<F: Vocabulary, S: Vocabulary>(
        &self,
        default_field: F,
    ) -> Result<FilterState<F, S>, ViewError> {
        let mut state = FilterState::new(default_field);

        if let Some(search) = &self.search {
            state.search.clone_from(search);
        }
        if let Some(status) = non_empty(self.status.as_deref()) {
            state.status = status.parse()?;
        }
        if let Some(field) = non_empty(self.sort.as_deref()) {
            state.sort.field = field.parse()?;
        }
        if let Some(dir) = non_empty(self.dir.as_deref()) {
            state.sort.direction = dir.parse()?;
        }
        if let Some(clicked) = non_empty(self.click.as_deref()) {
            state.sort.toggle(clicked.parse()?);
        }

        Ok(state)
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::record::vocabulary;

    vocabulary! {
        enum Col: UnknownSortField {
            Name => "name",
            Score => "score",
        }
    }

    vocabulary! {
        enum Phase: UnknownStatus {
            Active => "active",
            Paused => "paused",
        }
    }

    #[test]
    fn toggle_same_field_flips_direction() {
        let mut sort = SortState::new(Col::Name);
        sort.toggle(Col::Name);
        assert_eq!(sort, SortState { field: Col::Name, direction: SortDirection::Desc });
        sort.toggle(Col::Name);
        assert_eq!(sort, SortState { field: Col::Name, direction: SortDirection::Asc });
    }

    #[test]
    fn toggle_other_field_resets_to_ascending() {
        let sort = SortState::new(Col::Name).toggled(Col::Name);
        assert_eq!(sort.direction, SortDirection::Desc);

        let sort = sort.toggled(Col::Score);
        assert_eq!(sort, SortState { field: Col::Score, direction: SortDirection::Asc });

        let sort = SortState::new(Col::Name).toggled(Col::Score);
        assert_eq!(sort, SortState { field: Col::Score, direction: SortDirection::Asc });
    }

    #[test]
    fn toggle_cycles_indefinitely() {
        let mut sort = SortState::new(Col::Score);
        for i in 0..7 {
            sort.toggle(Col::Score);
            let expected = if i % 2 == 0 { SortDirection::Desc } else { SortDirection::Asc };
            assert_eq!(sort.direction, expected);
        }
    }

    #[test]
    fn direction_parses_both_spellings() {
        assert_eq!("DESC".parse::<SortDirection>().unwrap(), SortDirection::Desc);
        assert_eq!("ascending".parse::<SortDirection>().unwrap(), SortDirection::Asc);
        assert!(matches!(
            "up".parse::<SortDirection>(),
            Err(ViewError::UnknownDirection { .. })
        ));
    }

    #[test]
    fn status_filter_all_admits_everything() {
        let filter: StatusFilter<Phase> = "all".parse().unwrap();
        assert!(filter.admits(Some(&Phase::Paused)));
        assert!(filter.admits(None));
    }

    #[test]
    fn status_filter_only_is_exact() {
        let filter: StatusFilter<Phase> = "paused".parse().unwrap();
        assert!(filter.admits(Some(&Phase::Paused)));
        assert!(!filter.admits(Some(&Phase::Active)));
        assert!(!filter.admits(None));
    }

    #[test]
    fn status_filter_reports_unknown_status() {
        let err = "Paused".parse::<StatusFilter<Phase>>().unwrap_err();
        assert!(matches!(err, ViewError::UnknownStatus { .. }));
    }

    #[test]
    fn params_default_to_mount_state() {
        let state: FilterState<Col, Phase> = FilterParams::default().parse(Col::Name).unwrap();
        assert_eq!(state, FilterState::new(Col::Name));
    }

    #[test]
    fn params_apply_click_after_sort() {
        let params = FilterParams {
            sort: Some("score".to_owned()),
            dir: Some("desc".to_owned()),
            click: Some("name".to_owned()),
            ..FilterParams::default()
        };
        let state: FilterState<Col, Phase> = params.parse(Col::Score).unwrap();
        assert_eq!(state.sort, SortState::new(Col::Name));

        let params = FilterParams {
            sort: Some("score".to_owned()),
            dir: Some("asc".to_owned()),
            click: Some("score".to_owned()),
            ..FilterParams::default()
        };
        let state: FilterState<Col, Phase> = params.parse(Col::Name).unwrap();
        assert_eq!(state.sort.direction, SortDirection::Desc);
    }

    #[test]
    fn params_reject_unknown_field() {
        let params = FilterParams {
            sort: Some("revenue".to_owned()),
            ..FilterParams::default()
        };
        let err = params.parse::<Col, Phase>(Col::Name).unwrap_err();
        assert!(matches!(err, ViewError::UnknownSortField { ref value, .. } if value == "revenue"));
    }

    #[test]
    fn empty_params_are_ignored() {
        let params = FilterParams {
            status: Some(String::new()),
            sort: Some(String::new()),
            ..FilterParams::default()
        };
        let state: FilterState<Col, Phase> = params.parse(Col::Score).unwrap();
        assert_eq!(state.status, StatusFilter::All);
        assert_eq!(state.sort.field, Col::Score);
    }

    #[test]
    fn filter_state_serializes_for_round_trip() {
        let state = FilterState::<Col, Phase>::new(Col::Name)
            .with_status(Phase::Active)
            .sorted_by(Col::Score, SortDirection::Desc);
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "search": "",
                "status": "active",
                "sort": { "field": "score", "direction": "desc" }
            })
        );
    }
}
