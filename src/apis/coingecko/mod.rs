/// CoinGecko API client
///
/// API Documentation: https://docs.coingecko.com/reference/introduction
///
/// Endpoints implemented:
/// 1. /api/v3/simple/price?ids=bitcoin&vs_currencies=usd&include_24hr_change=true

pub mod types;

use crate::apis::client::HttpClient;
use crate::errors::MailerError;
use crate::market_data::PriceSnapshot;

pub const SOURCE_NAME: &str = "CoinGecko";

/// Coin id queried from the simple price endpoint
pub const COIN_ID: &str = "bitcoin";

/// Quote currency
pub const VS_CURRENCY: &str = "usd";

pub struct CoinGeckoClient {
    http_client: HttpClient,
    price_url: String,
}

impl CoinGeckoClient {
    pub fn new(http_client: HttpClient, price_url: impl Into<String>) -> Self {
        Self {
            http_client,
            price_url: price_url.into(),
        }
    }

    /// Fetch spot price and 24h change
    pub async fn fetch_price(&self) -> Result<PriceSnapshot, MailerError> {
        let body = self.http_client.get_json(&self.price_url, SOURCE_NAME).await?;
        Ok(types::parse_simple_price(&body, COIN_ID, VS_CURRENCY))
    }
}
