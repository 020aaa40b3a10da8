//! Tiered electricity tariff

use serde::Serialize;

/// Upper bound (inclusive) of the basic tier, in kWh
pub const BASIC_TIER_LIMIT_KWH: f64 = 100.0;
/// Upper bound (inclusive) of the medium tier, in kWh
pub const MEDIUM_TIER_LIMIT_KWH: f64 = 300.0;

/// Price bracket selected by consumed volume
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TariffTier {
    /// Up to 100 kWh
    Basic,
    /// Above 100 kWh up to 300 kWh
    Medium,
    /// Above 300 kWh
    High,
}

impl TariffTier {
    /// Boundaries belong to the lower tier.
    pub fn for_kwh(kwh: f64) -> Self {
        if kwh <= BASIC_TIER_LIMIT_KWH {
            Self::Basic
        } else if kwh <= MEDIUM_TIER_LIMIT_KWH {
            Self::Medium
        } else {
            Self::High
        }
    }

    /// Price per kWh
    pub fn rate(&self) -> f64 {
        match self {
            Self::Basic => 0.12,
            Self::Medium => 0.15,
            Self::High => 0.20,
        }
    }
}

impl std::fmt::Display for TariffTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Basic => write!(f, "Basic"),
            Self::Medium => write!(f, "Medium"),
            Self::High => write!(f, "High"),
        }
    }
}

/// Priced preview of a consumption volume
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TariffQuote {
    pub kwh: f64,
    pub tier: TariffTier,
    pub rate: f64,
    pub total: f64,
}

/// Stateless tariff arithmetic.
///
/// Non-positive volumes are priced like any other value; rejecting them is
/// up to the caller.
pub struct TariffCalculator;

impl TariffCalculator {
    pub fn rate_for(kwh: f64) -> f64 {
        TariffTier::for_kwh(kwh).rate()
    }

    pub fn total_for(kwh: f64) -> f64 {
        kwh * Self::rate_for(kwh)
    }

    pub fn quote(kwh: f64) -> TariffQuote {
        let tier = TariffTier::for_kwh(kwh);
        TariffQuote {
            kwh,
            tier,
            rate: tier.rate(),
            total: Self::total_for(kwh),
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────
