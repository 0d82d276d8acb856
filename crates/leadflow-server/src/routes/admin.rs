//! Agency-wide table routes: `/v1/admin/*`
//!
//! Each endpoint takes `search`, `status`, `sort`, `dir` and `click` query
//! parameters and answers with a [`ViewResponse`](super::ViewResponse).

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};

use leadflow_core::models::{
    Campaign, CampaignField, Client, ClientField, ClientRequest, Domain, DomainField,
    RequestField,
};
use leadflow_core::query::FilterParams;
use leadflow_storage::RecordStore;

use super::rows::{CampaignRow, ClientRow, DomainRow};
use super::view::{respond, ViewResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Build the `/v1/admin` router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/clients", get(list_clients))
        .route("/campaigns", get(list_campaigns))
        .route("/domains", get(list_domains))
        .route("/requests", get(list_requests))
}

async fn list_clients(
    State(state): State<Arc<AppState>>,
    Query(params): Query<FilterParams>,
) -> Result<Json<ViewResponse<Client, ClientRow>>, AppError> {
    let records = state.stores.clients.all().await?;
    let now = chrono::Utc::now();
    respond(&records, &params, ClientField::Company, Client::summary, |c| {
        ClientRow::new(c, now)
    })
}

async fn list_campaigns(
    State(state): State<Arc<AppState>>,
    Query(params): Query<FilterParams>,
) -> Result<Json<ViewResponse<Campaign, CampaignRow>>, AppError> {
    let records = state.stores.campaigns.all().await?;
    respond(
        &records,
        &params,
        CampaignField::Name,
        Campaign::summary,
        CampaignRow::from,
    )
}

async fn list_domains(
    State(state): State<Arc<AppState>>,
    Query(params): Query<FilterParams>,
) -> Result<Json<ViewResponse<Domain, DomainRow>>, AppError> {
    let records = state.stores.domains.all().await?;
    respond(&records, &params, DomainField::Domain, Domain::summary, DomainRow::from)
}

async fn list_requests(
    State(state): State<Arc<AppState>>,
    Query(params): Query<FilterParams>,
) -> Result<Json<ViewResponse<ClientRequest, ClientRequest>>, AppError> {
    let records = state.stores.requests.all().await?;
    respond(
        &records,
        &params,
        RequestField::CreatedAt,
        ClientRequest::summary,
        std::convert::identity,
    )
}
