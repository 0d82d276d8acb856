//! Client dashboard table routes: `/v1/dashboard/{client_id}/*`
//!
//! The same views as the admin pages, computed over one client's records.
//! An unknown client is a 404 rather than an empty table.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use tower::limit::ConcurrencyLimitLayer;

use leadflow_core::models::{
    Campaign, CampaignField, ClientRequest, Domain, DomainField, Meeting, MeetingField,
    RequestField,
};
use leadflow_core::query::FilterParams;
use leadflow_storage::RecordStore;

use super::forms;
use super::rows::{CampaignRow, DomainRow};
use super::view::{respond, ViewResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Build the `/v1/dashboard/{client_id}` router.
///
/// Request submission is capped like the form routes.
pub fn router(form_concurrency: usize) -> Router<Arc<AppState>> {
    Router::new()
        .route("/campaigns", get(list_campaigns))
        .route("/meetings", get(list_meetings))
        .route("/domains", get(list_domains))
        .route(
            "/requests",
            get(list_requests).merge(
                post(forms::create_request).layer(ConcurrencyLimitLayer::new(form_concurrency)),
            ),
        )
}

pub(crate) async fn require_client(state: &AppState, client_id: &str) -> Result<(), AppError> {
    match state.stores.clients.get(client_id).await? {
        Some(_) => Ok(()),
        None => Err(AppError::NotFound(format!("client '{client_id}' not found"))),
    }
}

async fn list_campaigns(
    State(state): State<Arc<AppState>>,
    Path(client_id): Path<String>,
    Query(params): Query<FilterParams>,
) -> Result<Json<ViewResponse<Campaign, CampaignRow>>, AppError> {
    require_client(&state, &client_id).await?;
    let records: Vec<Campaign> = state
        .stores
        .campaigns
        .all()
        .await?
        .into_iter()
        .filter(|c| c.client_id == client_id)
        .collect();
    respond(
        &records,
        &params,
        CampaignField::StartedAt,
        Campaign::summary,
        CampaignRow::from,
    )
}

async fn list_meetings(
    State(state): State<Arc<AppState>>,
    Path(client_id): Path<String>,
    Query(params): Query<FilterParams>,
) -> Result<Json<ViewResponse<Meeting, Meeting>>, AppError> {
    require_client(&state, &client_id).await?;
    let records: Vec<Meeting> = state
        .stores
        .meetings
        .all()
        .await?
        .into_iter()
        .filter(|m| m.client_id == client_id)
        .collect();
    respond(
        &records,
        &params,
        MeetingField::ScheduledAt,
        Meeting::summary,
        std::convert::identity,
    )
}

async fn list_domains(
    State(state): State<Arc<AppState>>,
    Path(client_id): Path<String>,
    Query(params): Query<FilterParams>,
) -> Result<Json<ViewResponse<Domain, DomainRow>>, AppError> {
    require_client(&state, &client_id).await?;
    let records: Vec<Domain> = state
        .stores
        .domains
        .all()
        .await?
        .into_iter()
        .filter(|d| d.client_id == client_id)
        .collect();
    respond(&records, &params, DomainField::Domain, Domain::summary, DomainRow::from)
}

async fn list_requests(
    State(state): State<Arc<AppState>>,
    Path(client_id): Path<String>,
    Query(params): Query<FilterParams>,
) -> Result<Json<ViewResponse<ClientRequest, ClientRequest>>, AppError> {
    require_client(&state, &client_id).await?;
    let records: Vec<ClientRequest> = state
        .stores
        .requests
        .all()
        .await?
        .into_iter()
        .filter(|r| r.client_id == client_id)
        .collect();
    respond(
        &records,
        &params,
        RequestField::CreatedAt,
        ClientRequest::summary,
        std::convert::identity,
    )
}
