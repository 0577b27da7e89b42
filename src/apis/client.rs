/// Base HTTP client shared by the upstream API clients
use crate::errors::{DataError, MailerError, NetworkError};
use crate::logger::{self, LogTag};
use reqwest::Client;
use serde_json::Value;
use std::time::{Duration, Instant};

/// Thin wrapper over `reqwest::Client` with uniform error mapping
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Build a client; `timeout_secs == 0` disables the request timeout
    pub fn new(timeout_secs: u64) -> Result<Self, String> {
        let mut builder = Client::builder().user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ));
        if timeout_secs > 0 {
            builder = builder.timeout(Duration::from_secs(timeout_secs));
        }

        let client = builder
            .build()
            .map_err(|e| format!("Failed to create HTTP client: {}", e))?;

        Ok(Self { client })
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    /// GET a JSON document
    ///
    /// Connection failures and non-2xx statuses map to `NetworkError`, a
    /// body that is not JSON maps to `DataError`.
    pub async fn get_json(&self, url: &str, source_name: &str) -> Result<Value, MailerError> {
        let start = Instant::now();

        let response = self
            .client
            .get(url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| NetworkError::RequestFailed {
                endpoint: url.to_string(),
                message: e.to_string(),
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| NetworkError::RequestFailed {
            endpoint: url.to_string(),
            message: e.to_string(),
        })?;

        logger::debug(
            LogTag::Api,
            &format!(
                "{} responded HTTP {} in {}ms ({} bytes)",
                source_name,
                status.as_u16(),
                start.elapsed().as_millis(),
                body.len()
            ),
        );

        if !status.is_success() {
            return Err(NetworkError::HttpStatusError {
                endpoint: url.to_string(),
                status: status.as_u16(),
                body,
            }
            .into());
        }

        serde_json::from_str(&body).map_err(|e| {
            DataError::ParseError {
                source_name: source_name.to_string(),
                message: e.to_string(),
            }
            .into()
        })
    }
}
