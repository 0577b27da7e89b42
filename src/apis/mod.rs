//! Upstream market data API clients

pub mod client;
pub mod coingecko;
pub mod mempool;

pub use client::HttpClient;
pub use coingecko::CoinGeckoClient;
pub use mempool::MempoolClient;
