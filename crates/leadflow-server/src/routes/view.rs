//! The JSON shape every table endpoint answers with.

use axum::Json;
use serde::Serialize;

use leadflow_core::query::{FilterParams, FilterState};
use leadflow_core::record::Record;
use leadflow_core::view::{compute_view_with, Aggregates};

use crate::error::AppError;

/// A computed table view.
///
/// `filter` echoes the effective filter state, with any `click` already
/// applied, so a client can send it straight back.
#[derive(Serialize)]
#[serde(bound(serialize = "T: Serialize"))]
pub struct ViewResponse<R: Record, T> {
    pub filter: FilterState<R::Field, R::Status>,
    pub total: usize,
    pub matched: usize,
    pub rows: Vec<T>,
    pub aggregates: Aggregates,
}

/// Parse `params`, run the pipeline over `records`, and project each row.
pub(crate) fn respond<R, T, D, P>(
    records: &[R],
    params: &FilterParams,
    default_field: R::Field,
    derive: D,
    project: P,
) -> Result<Json<ViewResponse<R, T>>, AppError>
where
    R: Record,
    D: FnOnce(&[R], &[R]) -> Aggregates,
    P: FnMut(R) -> T,
{
    let filter = params.parse::<R::Field, R::Status>(default_field)?;
    let view = compute_view_with(records, &filter, derive);

    Ok(Json(ViewResponse {
        filter,
        total: view.total,
        matched: view.matched,
        rows: view.rows.into_iter().map(project).collect(),
        aggregates: view.aggregates,
    }))
}
