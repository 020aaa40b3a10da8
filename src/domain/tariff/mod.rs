//! Tariff aggregate
//!
//! Contains the tier schedule and the rate/total calculation.

pub mod model;

pub use model::{
    TariffCalculator, TariffQuote, TariffTier, BASIC_TIER_LIMIT_KWH, MEDIUM_TIER_LIMIT_KWH,
};
