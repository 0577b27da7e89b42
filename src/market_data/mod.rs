//! Market data fetcher
//!
//! Pulls spot price and fee estimates from two independent upstreams
//! concurrently. Either failure aborts the whole fetch; there is no retry and
//! no partial result.

pub mod types;

pub use types::{FeeEstimate, PriceSnapshot};

use crate::apis::{CoinGeckoClient, HttpClient, MempoolClient};
use crate::config::MarketDataConfig;
use crate::errors::MailerError;
use crate::logger::{self, LogTag};
use async_trait::async_trait;

/// Source of the two market data values a report needs
#[async_trait]
pub trait MarketDataSource: Send + Sync {
    async fn fetch(&self) -> Result<(PriceSnapshot, FeeEstimate), MailerError>;
}

/// Live fetcher backed by CoinGecko and mempool.space
pub struct MarketDataFetcher {
    coingecko: CoinGeckoClient,
    mempool: MempoolClient,
}

impl MarketDataFetcher {
    pub fn new(http_client: HttpClient, price_url: &str, fees_url: &str) -> Self {
        Self {
            coingecko: CoinGeckoClient::new(http_client.clone(), price_url),
            mempool: MempoolClient::new(http_client, fees_url),
        }
    }

    pub fn from_config(config: &MarketDataConfig) -> Result<Self, MailerError> {
        let http_client = HttpClient::new(config.request_timeout_secs)
            .map_err(|e| MailerError::invalid_config("market_data", e))?;

        Ok(Self::new(http_client, &config.price_url, &config.fees_url))
    }
}

#[async_trait]
impl MarketDataSource for MarketDataFetcher {
    async fn fetch(&self) -> Result<(PriceSnapshot, FeeEstimate), MailerError> {
        let (price, fees) = tokio::try_join!(
            self.coingecko.fetch_price(),
            self.mempool.fetch_recommended_fees()
        )?;

        logger::debug(
            LogTag::Api,
            &format!(
                "Market data: price={:?} change_24h={:?} fees={:?}/{:?}/{:?}",
                price.price, price.change_24h, fees.fastest, fees.half_hour, fees.hour
            ),
        );

        if price.price.is_none() || price.change_24h.is_none() {
            logger::warning(
                LogTag::Api,
                "CoinGecko response is missing price fields; report will show placeholders",
            );
        }
        if fees.fastest.is_none() || fees.half_hour.is_none() || fees.hour.is_none() {
            logger::warning(
                LogTag::Api,
                "mempool.space response is missing fee tiers; report will show placeholders",
            );
        }

        Ok((price, fees))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::serve;
    use axum::{http::StatusCode, routing::get, Json, Router};
    use serde_json::json;
    use std::time::Duration;

    fn fetcher(base: &str) -> MarketDataFetcher {
        MarketDataFetcher::new(
            HttpClient::new(0).unwrap(),
            &format!("{}/price", base),
            &format!("{}/fees", base),
        )
    }

    fn price_route() -> axum::routing::MethodRouter {
        get(|| async { Json(json!({"bitcoin": {"usd": 65000.5, "usd_24h_change": 3.2}})) })
    }

    fn fees_route() -> axum::routing::MethodRouter {
        get(|| async { Json(json!({"fastestFee": 10, "halfHourFee": 5, "hourFee": 2})) })
    }

    #[tokio::test]
    async fn test_fetch_joins_both_sources() {
        let base = serve(
            Router::new()
                .route("/price", price_route())
                .route("/fees", fees_route()),
        )
        .await;

        let (price, fees) = fetcher(&base).fetch().await.unwrap();
        assert_eq!(price, PriceSnapshot::new(65000.5, 3.2));
        assert_eq!(fees, FeeEstimate::new(10, 5, 2));
    }

    #[tokio::test]
    async fn test_upstream_status_error_aborts_fetch() {
        let base = serve(
            Router::new()
                .route("/price", price_route())
                .route(
                    "/fees",
                    get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "maintenance") }),
                ),
        )
        .await;

        let err = fetcher(&base).fetch().await.unwrap_err();
        assert!(err.is_upstream());
        assert!(err.to_string().contains("503"));
        assert!(err.to_string().contains("maintenance"));
    }

    #[tokio::test]
    async fn test_non_json_body_is_data_error() {
        let base = serve(
            Router::new()
                .route("/price", get(|| async { "<html>rate limited</html>" }))
                .route("/fees", fees_route()),
        )
        .await;

        let err = fetcher(&base).fetch().await.unwrap_err();
        assert!(matches!(err, MailerError::Data(_)));
    }

    #[tokio::test]
    async fn test_first_failure_does_not_wait_for_other_source() {
        let base = serve(
            Router::new()
                .route(
                    "/price",
                    get(|| async { std::future::pending::<&'static str>().await }),
                )
                .route(
                    "/fees",
                    get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "down") }),
                ),
        )
        .await;

        let result = tokio::time::timeout(Duration::from_secs(5), fetcher(&base).fetch()).await;
        let err = result.expect("fetch should fail fast").unwrap_err();
        assert!(err.is_upstream());
    }

    #[tokio::test]
    async fn test_unreachable_upstream_is_network_error() {
        let fetcher = fetcher("http://127.0.0.1:1");
        let err = fetcher.fetch().await.unwrap_err();
        assert!(matches!(err, MailerError::Network(_)));
    }
}
