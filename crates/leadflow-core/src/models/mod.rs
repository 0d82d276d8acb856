//! Record models for each dashboard table.
//!
//! One module per page family. Each model implements [`Record`](crate::record::Record)
//! and provides a `summary` derivation for [`compute_view_with`](crate::view::compute_view_with).

pub mod campaign;
pub mod client;
pub mod domain;
pub mod meeting;
pub mod request;

pub use campaign::{Campaign, CampaignField, CampaignStatus};
pub use client::{Client, ClientField, ClientStatus};
pub use domain::{Domain, DomainField, DomainStatus};
pub use meeting::{Meeting, MeetingField, MeetingStatus};
pub use request::{ClientRequest, RequestCategory, RequestField, RequestStatus};

/// Arithmetic mean, 0 for an empty input.
#[allow(clippy::cast_precision_loss)]
pub(crate) fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, n) = values.fold((0.0, 0usize), |(sum, n), v| (sum + v, n + 1));
    if n == 0 { 0.0 } else { sum / n as f64 }
}

/// One decimal place, for averages shown beside a table.
pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
