/// CoinGecko simple price payload
///
/// Shape: `{"bitcoin": {"usd": 65000.5, "usd_24h_change": 3.2}}`
use crate::market_data::PriceSnapshot;
use serde_json::Value;

/// Extract price and change for one coin/currency pair
///
/// Fields that are missing or not numeric come back as `None`.
pub fn parse_simple_price(body: &Value, coin_id: &str, vs_currency: &str) -> PriceSnapshot {
    let coin = body.get(coin_id);
    let change_key = format!("{}_24h_change", vs_currency);

    PriceSnapshot {
        price: coin.and_then(|c| c.get(vs_currency)).and_then(Value::as_f64),
        change_24h: coin.and_then(|c| c.get(&change_key)).and_then(Value::as_f64),
    }
}
