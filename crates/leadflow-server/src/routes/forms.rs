//! Form submission routes.
//!
//! Every submission runs the same sequence: validate locally, claim the
//! form's in-flight key, deliver to the workflow backend, and only after a
//! confirmed `success: true` touch the record stores. A failed delivery
//! leaves every store exactly as it was and answers 502 with the message
//! meant for the person who submitted.
//!
//! - `POST /v1/forms/contact`
//! - `POST /v1/forms/demo`
//! - `POST /v1/admin/clients/invite`
//! - `POST /v1/admin/campaigns/{id}/pause`
//! - `POST /v1/admin/campaigns/{id}/resume`
//! - `POST /v1/dashboard/{client_id}/requests` (mounted by `dashboard`)

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use leadflow_core::models::{Campaign, CampaignStatus, ClientRequest, RequestCategory, RequestStatus};
use leadflow_workflows::{
    CampaignAction, ClientInvite, ClientRequestForm, ContactForm, DemoRequest, SubmitReceipt,
    Validate, Workflow,
};
use leadflow_storage::RecordStore;

use super::dashboard::require_client;
use super::rows::CampaignRow;
use crate::error::AppError;
use crate::state::AppState;

/// Build the form router. Paths are absolute.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/v1/forms/contact", post(submit_contact))
        .route("/v1/forms/demo", post(submit_demo))
        .route("/v1/admin/clients/invite", post(invite_client))
        .route("/v1/admin/campaigns/{id}/pause", post(pause_campaign))
        .route("/v1/admin/campaigns/{id}/resume", post(resume_campaign))
}

// ── Request / Response types ─────────────────────────────────────────

/// Answer to a confirmed submission.
#[derive(Debug, Serialize)]
pub struct Submitted<T> {
    pub workflow: Workflow,
    /// Whatever the workflow returned.
    pub data: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record: Option<T>,
}

impl<T> Submitted<T> {
    fn new(workflow: Workflow, receipt: SubmitReceipt, record: Option<T>) -> Self {
        Self {
            workflow,
            data: receipt.data,
            record,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct CampaignActionBody {
    pub reason: Option<String>,
}

// ── Handlers ─────────────────────────────────────────────────────────

async fn submit_contact(
    State(state): State<Arc<AppState>>,
    Json(form): Json<ContactForm>,
) -> Result<(StatusCode, Json<Submitted<()>>), AppError> {
    let key = format!("contact:{}", form.email.trim().to_lowercase());
    let receipt = deliver(&state, key, Workflow::ContactForm, &form).await?;
    Ok((
        StatusCode::ACCEPTED,
        Json(Submitted::new(Workflow::ContactForm, receipt, None)),
    ))
}

async fn submit_demo(
    State(state): State<Arc<AppState>>,
    Json(form): Json<DemoRequest>,
) -> Result<(StatusCode, Json<Submitted<()>>), AppError> {
    let key = format!("demo:{}", form.email.trim().to_lowercase());
    let receipt = deliver(&state, key, Workflow::DemoRequest, &form).await?;
    Ok((
        StatusCode::ACCEPTED,
        Json(Submitted::new(Workflow::DemoRequest, receipt, None)),
    ))
}

async fn invite_client(
    State(state): State<Arc<AppState>>,
    Json(form): Json<ClientInvite>,
) -> Result<(StatusCode, Json<Submitted<()>>), AppError> {
    let key = format!("invite:{}", form.email.trim().to_lowercase());
    let receipt = deliver(&state, key, Workflow::ClientInvite, &form).await?;
    Ok((
        StatusCode::ACCEPTED,
        Json(Submitted::new(Workflow::ClientInvite, receipt, None)),
    ))
}

async fn pause_campaign(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<Submitted<CampaignRow>>, AppError> {
    transition_campaign(&state, &id, &body, Workflow::CampaignPause).await
}

async fn resume_campaign(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<Submitted<CampaignRow>>, AppError> {
    transition_campaign(&state, &id, &body, Workflow::CampaignResume).await
}

/// Create a support request from a client dashboard.
pub(crate) async fn create_request(
    State(state): State<Arc<AppState>>,
    Path(client_id): Path<String>,
    Json(mut form): Json<ClientRequestForm>,
) -> Result<(StatusCode, Json<Submitted<ClientRequest>>), AppError> {
    require_client(&state, &client_id).await?;
    form.client_id.clone_from(&client_id);
    form.validate()?;
    let category: RequestCategory = form.category.parse()?;

    // Held until the new record is stored.
    let _in_flight = state.submissions.begin(format!("request:{client_id}"))?;
    let receipt = state.workflows.submit(Workflow::ClientRequest, &form).await?;

    let id = receipt
        .data_str("id")
        .map_or_else(|| format!("req_{}", uuid::Uuid::new_v4().simple()), str::to_owned);
    let record = ClientRequest {
        id,
        client_id,
        subject: form.subject.trim().to_owned(),
        category,
        status: RequestStatus::Open,
        created_at: Some(chrono::Utc::now()),
    };
    state.stores.requests.put(record.clone()).await?;
    tracing::info!(request_id = %record.id, client_id = %record.client_id, "client request recorded");

    Ok((
        StatusCode::CREATED,
        Json(Submitted::new(Workflow::ClientRequest, receipt, Some(record))),
    ))
}

// ── Helpers ──────────────────────────────────────────────────────────

/// Validate, claim the in-flight key, and deliver, for forms that change no
/// local record. The key is released when this returns, whatever the outcome.
async fn deliver<P>(
    state: &AppState,
    key: String,
    workflow: Workflow,
    payload: &P,
) -> Result<SubmitReceipt, AppError>
where
    P: Serialize + Validate + Sync,
{
    payload.validate()?;
    let _in_flight = state.submissions.begin(key)?;
    Ok(state.workflows.submit(workflow, payload).await?)
}

async fn transition_campaign(
    state: &AppState,
    id: &str,
    body: &[u8],
    workflow: Workflow,
) -> Result<Json<Submitted<CampaignRow>>, AppError> {
    let (from, to) = match workflow {
        Workflow::CampaignResume => (CampaignStatus::Paused, CampaignStatus::Active),
        _ => (CampaignStatus::Active, CampaignStatus::Paused),
    };

    let body: CampaignActionBody = if body.iter().all(u8::is_ascii_whitespace) {
        CampaignActionBody::default()
    } else {
        serde_json::from_slice(body)
            .map_err(|e| AppError::BadRequest(format!("invalid request body: {e}")))?
    };

    // Claimed before the status check and held through the store write, so a
    // second click can neither resend the action nor see the stale status.
    let _in_flight = state.submissions.begin(format!("campaign:{id}"))?;

    let campaign = find_campaign(state, id).await?;
    if campaign.status != from {
        return Err(AppError::Conflict(format!(
            "campaign '{id}' is {}, expected {from}",
            campaign.status
        )));
    }

    let action = CampaignAction {
        campaign_id: campaign.id.clone(),
        client_id: campaign.client_id.clone(),
        reason: body.reason.filter(|r| !r.trim().is_empty()),
    };
    action.validate()?;
    let receipt = state.workflows.submit(workflow, &action).await?;

    // Other fields may have changed while the submission was in flight.
    let mut updated = find_campaign(state, id).await?;
    updated.status = to;
    state.stores.campaigns.put(updated.clone()).await?;
    tracing::info!(campaign_id = %id, status = %to, "campaign status changed");

    Ok(Json(Submitted::new(
        workflow,
        receipt,
        Some(CampaignRow::from(updated)),
    )))
}

async fn find_campaign(state: &AppState, id: &str) -> Result<Campaign, AppError> {
    state
        .stores
        .campaigns
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("campaign '{id}' not found")))
}
