/// Market data values produced fresh for every report build
use serde::Serialize;

/// Point-in-time spot price and 24h change
///
/// Upstream fields are not validated: anything missing or non-numeric is
/// `None` and is rendered as a placeholder by the report formatter.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct PriceSnapshot {
    /// USD price
    pub price: Option<f64>,
    /// Signed 24h change in percent
    pub change_24h: Option<f64>,
}

impl PriceSnapshot {
    pub fn new(price: f64, change_24h: f64) -> Self {
        Self {
            price: Some(price),
            change_24h: Some(change_24h),
        }
    }
}

/// Recommended fee rates in sat/vB at three urgency tiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct FeeEstimate {
    pub fastest: Option<u64>,
    pub half_hour: Option<u64>,
    pub hour: Option<u64>,
}

impl FeeEstimate {
    pub fn new(fastest: u64, half_hour: u64, hour: u64) -> Self {
        Self {
            fastest: Some(fastest),
            half_hour: Some(half_hour),
            hour: Some(hour),
        }
    }
}
