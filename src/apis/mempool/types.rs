/// mempool.space recommended fees payload
///
/// Shape: `{"fastestFee": 10, "halfHourFee": 5, "hourFee": 2, "economyFee": 1, "minimumFee": 1}`
use crate::market_data::FeeEstimate;
use serde_json::Value;

/// Extract the three fee tiers used by the report
pub fn parse_recommended_fees(body: &Value) -> FeeEstimate {
    let field = |name: &str| body.get(name).and_then(Value::as_u64);

    FeeEstimate {
        fastest: field("fastestFee"),
        half_hour: field("halfHourFee"),
        hour: field("hourFee"),
    }
}
