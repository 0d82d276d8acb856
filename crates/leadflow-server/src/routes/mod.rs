//! HTTP route modules.
//!
//! - `admin` — agency-wide tables
//! - `dashboard` — tables scoped to one client
//! - `forms` — submissions relayed to the automation backend
//! - `health` — liveness

pub mod admin;
pub mod dashboard;
pub mod forms;
pub mod health;
mod rows;
mod view;

use std::sync::Arc;

use axum::Router;
use axum::http::HeaderValue;
use tower_http::cors::{Any, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub use view::ViewResponse;

/// Build the full application router.
///
/// `form_concurrency` caps concurrent requests on the form routes.
pub fn router(state: Arc<AppState>, form_concurrency: usize) -> Router {
    let form_routes =
        forms::router().layer(tower::limit::ConcurrencyLimitLayer::new(form_concurrency));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([axum::http::Method::GET, axum::http::Method::POST])
        .allow_headers([axum::http::header::CONTENT_TYPE]);

    Router::new()
        .nest("/v1/admin", admin::router())
        .nest(
            "/v1/dashboard/{client_id}",
            dashboard::router(form_concurrency),
        )
        .merge(form_routes)
        .merge(health::router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(SetResponseHeaderLayer::overriding(
            axum::http::header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            axum::http::header::CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
        .with_state(state)
}
