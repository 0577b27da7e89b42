/// mempool.space API client
///
/// Endpoints implemented:
/// 1. /api/v1/fees/recommended - fee rates in sat/vB per confirmation target

pub mod types;

use crate::apis::client::HttpClient;
use crate::errors::MailerError;
use crate::market_data::FeeEstimate;

pub const SOURCE_NAME: &str = "mempool.space";

pub struct MempoolClient {
    http_client: HttpClient,
    fees_url: String,
}

impl MempoolClient {
    pub fn new(http_client: HttpClient, fees_url: impl Into<String>) -> Self {
        Self {
            http_client,
            fees_url: fees_url.into(),
        }
    }

    /// Fetch recommended fee rates
    pub async fn fetch_recommended_fees(&self) -> Result<FeeEstimate, MailerError> {
        let body = self.http_client.get_json(&self.fees_url, SOURCE_NAME).await?;
        Ok(types::parse_recommended_fees(&body))
    }
}
