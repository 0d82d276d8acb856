//! The filter → sort → derive pipeline.
//!
//! [`compute_view`] is a pure function of a record snapshot and a filter
//! state. Stages run in a fixed order:
//!
//! 1. text filter — keep records where any searchable field, lower-cased,
//!    contains the lower-cased query (empty query keeps everything);
//! 2. status filter — keep records whose status equals the filter exactly;
//! 3. stable sort by the chosen field, descending negating the comparator;
//! 4. aggregate derivation, over the full snapshot and/or the filtered rows.
//!
//! The input slice is never reordered; rows are cloned before sorting.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::query::FilterState;
use crate::record::{Record, Vocabulary};

/// A derived scalar shown beside a table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AggregateValue {
    Count(u64),
    Number(f64),
    Text(String),
}

/// Named aggregates, ordered by name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Aggregates(BTreeMap<String, AggregateValue>);

impl Aggregates {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&mut self, name: impl Into<String>, value: usize) -> &mut Self {
        let value = u64::try_from(value).unwrap_or(u64::MAX);
        self.0.insert(name.into(), AggregateValue::Count(value));
        self
    }

    pub fn number(&mut self, name: impl Into<String>, value: f64) -> &mut Self {
        self.0.insert(name.into(), AggregateValue::Number(value));
        self
    }

    pub fn text(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.0.insert(name.into(), AggregateValue::Text(value.into()));
        self
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&AggregateValue> {
        self.0.get(name)
    }

    /// Convenience for tests and callers that know the value is a count.
    #[must_use]
    pub fn get_count(&self, name: &str) -> Option<u64> {
        match self.0.get(name) {
            Some(AggregateValue::Count(n)) => Some(*n),
            _ => None,
        }
    }

    #[must_use]
    pub fn get_number(&self, name: &str) -> Option<f64> {
        match self.0.get(name) {
            Some(AggregateValue::Number(n)) => Some(*n),
            _ => None,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// The ready-to-render output of the pipeline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct View<R> {
    /// Filtered and sorted rows.
    pub rows: Vec<R>,
    /// Size of the unfiltered snapshot.
    pub total: usize,
    /// Number of rows that survived filtering.
    pub matched: usize,
    pub aggregates: Aggregates,
}

/// Apply `state` to `records`.
#[must_use]
pub fn compute_view<R: Record>(
    records: &[R],
    state: &FilterState<R::Field, R::Status>,
) -> View<R> {
    compute_view_with(records, state, |_, _| Aggregates::new())
}

/// Apply `state` to `records`, then derive aggregates.
///
/// `derive` receives the full snapshot first and the filtered, sorted rows
/// second, so a page can report global context ("3 of 12 clients") and
/// filtered figures side by side.
#[must_use]
pub fn compute_view_with<R, D>(
    records: &[R],
    state: &FilterState<R::Field, R::Status>,
    derive: D,
) -> View<R>
where
    R: Record,
    D: FnOnce(&[R], &[R]) -> Aggregates,
{
    let needle = state.search.to_lowercase();

    let mut rows: Vec<R> = records
        .iter()
        .filter(|r| needle.is_empty() || matches_search(*r, &needle))
        .filter(|r| state.status.admits(r.status().as_ref()))
        .cloned()
        .collect();

    let field = state.sort.field;
    let direction = state.sort.direction;
    // `sort_by` is stable: equal keys keep their input order in both directions.
    rows.sort_by(|a, b| direction.apply(a.sort_key(field).compare(&b.sort_key(field))));

    let aggregates = derive(records, &rows);

    tracing::trace!(
        total = records.len(),
        matched = rows.len(),
        sort = %field,
        direction = %direction,
        "computed view"
    );

    View {
        total: records.len(),
        matched: rows.len(),
        rows,
        aggregates,
    }
}

fn matches_search<R: Record>(record: &R, needle: &str) -> bool {
    record
        .search_text()
        .iter()
        .any(|text| text.to_lowercase().contains(needle))
}

/// Count records per status, including statuses with no records.
///
/// Keys are the statuses' wire spellings; records without a status are not
/// counted.
#[must_use]
pub fn status_counts<R: Record>(records: &[R]) -> Aggregates {
    let mut counts = Aggregates::new();
    for status in R::Status::all() {
        let n = records
            .iter()
            .filter(|r| r.status().as_ref() == Some(status))
            .count();
        counts.count(status.as_str(), n);
    }
    counts
}
