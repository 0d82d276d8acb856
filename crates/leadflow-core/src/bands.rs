//! Threshold bands: continuous metric → named band.
//!
//! Every page that shows a metric classifies it through the one table
//! defined here for that metric. Tables list bands highest threshold first;
//! a value belongs to the first band whose lower bound it reaches, so a value
//! exactly on a threshold lands in the higher band.

use serde::{Deserialize, Serialize};

/// One band: values `>= min` (and below the previous band) get `label`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Band<L> {
    pub min: f64,
    pub label: L,
}

/// An ordered band table with a floor label for values below every band.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandTable<L: 'static> {
    bands: &'static [Band<L>],
    floor: L,
}

impl<L: Copy + 'static> BandTable<L> {
    /// `bands` must be ordered by descending `min`.
    #[must_use]
    pub const fn new(bands: &'static [Band<L>], floor: L) -> Self {
        Self { bands, floor }
    }

    /// Classify `value`. Lower bounds are inclusive; `NaN` gets the floor.
    #[must_use]
    pub fn classify(&self, value: f64) -> L {
        self.bands
            .iter()
            .find(|band| value >= band.min)
            .map_or(self.floor, |band| band.label)
    }

    #[must_use]
    pub const fn bands(&self) -> &'static [Band<L>] {
        self.bands
    }

    #[must_use]
    pub const fn floor(&self) -> L {
        self.floor
    }
}

/// Display tone shared by every band type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Success,
    Warning,
    Danger,
}

/// Bands for the 0-100 client health score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthBand {
    Healthy,
    AtRisk,
    Critical,
}

impl HealthBand {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Healthy => "Healthy",
            Self::AtRisk => "At risk",
            Self::Critical => "Critical",
        }
    }

    #[must_use]
    pub const fn tone(self) -> Tone {
        match self {
            Self::Healthy => Tone::Success,
            Self::AtRisk => Tone::Warning,
            Self::Critical => Tone::Danger,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Healthy => "healthy",
            Self::AtRisk => "at_risk",
            Self::Critical => "critical",
        }
    }
}

/// Bands for percentage-based sending signals (deliverability, bounce rate).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalBand {
    Healthy,
    Warning,
    Critical,
}

impl SignalBand {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Healthy => "Healthy",
            Self::Warning => "Warning",
            Self::Critical => "Critical",
        }
    }

    #[must_use]
    pub const fn tone(self) -> Tone {
        match self {
            Self::Healthy => Tone::Success,
            Self::Warning => Tone::Warning,
            Self::Critical => Tone::Danger,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Healthy => "healthy",
            Self::Warning => "warning",
            Self::Critical => "critical",
        }
    }
}

/// Client health score: healthy ≥ 80, at risk ≥ 50, critical below.
pub static HEALTH_SCORE: BandTable<HealthBand> = BandTable::new(
    &[
        Band { min: 80.0, label: HealthBand::Healthy },
        Band { min: 50.0, label: HealthBand::AtRisk },
    ],
    HealthBand::Critical,
);

/// Inbox placement percentage: healthy ≥ 95, warning ≥ 85, critical below.
pub static DELIVERABILITY_RATE: BandTable<SignalBand> = BandTable::new(
    &[
        Band { min: 95.0, label: SignalBand::Healthy },
        Band { min: 85.0, label: SignalBand::Warning },
    ],
    SignalBand::Critical,
);

/// Bounce percentage, where higher is worse: critical ≥ 5, warning ≥ 2,
/// healthy below.
pub static BOUNCE_RATE: BandTable<SignalBand> = BandTable::new(
    &[
        Band { min: 5.0, label: SignalBand::Critical },
        Band { min: 2.0, label: SignalBand::Warning },
    ],
    SignalBand::Healthy,
);
