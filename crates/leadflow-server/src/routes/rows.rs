//! Table rows with their display columns resolved.

use chrono::{DateTime, Utc};
use serde::Serialize;

use leadflow_core::bands::{HealthBand, SignalBand, Tone};
use leadflow_core::format;
use leadflow_core::models::{Campaign, Client, Domain};
use leadflow_core::percent::SentimentShares;

#[derive(Debug, Serialize)]
pub struct ClientRow {
    #[serde(flatten)]
    pub client: Client,
    pub health_band: HealthBand,
    pub health_label: &'static str,
    pub health_tone: Tone,
    pub mrr_display: String,
    pub last_activity_display: Option<String>,
}

impl ClientRow {
    pub fn new(client: Client, now: DateTime<Utc>) -> Self {
        let band = client.health_band();
        Self {
            health_band: band,
            health_label: band.label(),
            health_tone: band.tone(),
            mrr_display: format::compact_currency(client.mrr),
            last_activity_display: client.last_activity.map(|ts| format::relative_time(ts, now)),
            client,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CampaignRow {
    #[serde(flatten)]
    pub campaign: Campaign,
    pub reply_rate: f64,
    pub reply_rate_display: String,
    pub sentiment: SentimentShares,
}

impl From<Campaign> for CampaignRow {
    fn from(campaign: Campaign) -> Self {
        let reply_rate = campaign.reply_rate();
        Self {
            reply_rate,
            reply_rate_display: format::percent(reply_rate),
            sentiment: campaign.replies.shares(),
            campaign,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DomainRow {
    #[serde(flatten)]
    pub domain: Domain,
    pub deliverability_band: SignalBand,
    pub deliverability_tone: Tone,
    pub deliverability_display: String,
    pub bounce_band: SignalBand,
    pub bounce_tone: Tone,
    pub bounce_display: String,
}

impl From<Domain> for DomainRow {
    fn from(domain: Domain) -> Self {
        let deliverability = domain.deliverability_band();
        let bounce = domain.bounce_band();
        Self {
            deliverability_band: deliverability,
            deliverability_tone: deliverability.tone(),
            deliverability_display: format::percent(domain.deliverability_rate),
            bounce_band: bounce,
            bounce_tone: bounce.tone(),
            bounce_display: format::percent(domain.bounce_rate),
            domain,
        }
    }
}
