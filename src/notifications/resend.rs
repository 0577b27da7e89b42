/// Resend HTTP API transport
use super::Mailer;
use crate::apis::HttpClient;
use crate::errors::{DeliveryError, MailerError};
use crate::logger::{self, LogTag};
use crate::report::Report;
use async_trait::async_trait;
use serde::Serialize;

const PROVIDER: &str = "Resend";

#[derive(Debug, Serialize)]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    html: &'a str,
}

pub struct ResendMailer {
    http_client: HttpClient,
    api_url: String,
    api_key: String,
    from_address: String,
}

impl ResendMailer {
    pub fn new(
        http_client: HttpClient,
        api_url: &str,
        api_key: &str,
        from_address: &str,
    ) -> Self {
        Self {
            http_client,
            api_url: api_url.to_string(),
            api_key: api_key.to_string(),
            from_address: from_address.to_string(),
        }
    }
}

#[async_trait]
impl Mailer for ResendMailer {
    async fn send(&self, report: &Report, recipient: &str) -> Result<(), MailerError> {
        let request = SendEmailRequest {
            from: &self.from_address,
            to: recipient,
            subject: &report.subject,
            html: &report.html,
        };

        let response = self
            .http_client
            .client()
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| DeliveryError::TransportFailed {
                provider: PROVIDER.to_string(),
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|e| format!("<body unavailable: {}>", e));
            return Err(DeliveryError::ApiRejected {
                provider: PROVIDER.to_string(),
                status: status.as_u16(),
                body,
            }
            .into());
        }

        logger::debug(
            LogTag::Mail,
            &format!("Resend accepted message (HTTP {})", status.as_u16()),
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::serve;
    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::post;
    use axum::{Json, Router};
    use serde_json::{json, Value};
    use std::sync::{Arc, Mutex};

    fn sample_report() -> Report {
        Report {
            subject: "BTC 每日重點 – 2024年6月1日".to_string(),
            html: "<div>line</div>".to_string(),
            text: "line".to_string(),
        }
    }

    fn mailer(base: &str) -> ResendMailer {
        ResendMailer::new(
            HttpClient::new(5).unwrap(),
            &format!("{}/emails", base),
            "re_test",
            "btc-notify@example.com",
        )
    }

    #[tokio::test]
    async fn test_posts_json_with_bearer_auth() {
        let captured: Arc<Mutex<Vec<(Option<String>, Value)>>> = Arc::default();
        let sink = captured.clone();
        let router = Router::new().route(
            "/emails",
            post(move |headers: HeaderMap, Json(body): Json<Value>| {
                let sink = sink.clone();
                async move {
                    let auth = headers
                        .get("authorization")
                        .and_then(|v| v.to_str().ok())
                        .map(str::to_string);
                    sink.lock().unwrap().push((auth, body));
                    Json(json!({ "id": "msg_1" }))
                }
            }),
        );
        let base = serve(router).await;

        mailer(&base)
            .send(&sample_report(), "me@example.com")
            .await
            .unwrap();

        let calls = captured.lock().unwrap();
        assert_eq!(calls.len(), 1);
        let (auth, body) = &calls[0];
        assert_eq!(auth.as_deref(), Some("Bearer re_test"));
        assert_eq!(
            body,
            &json!({
                "from": "btc-notify@example.com",
                "to": "me@example.com",
                "subject": "BTC 每日重點 – 2024年6月1日",
                "html": "<div>line</div>",
            })
        );
    }

    #[tokio::test]
    async fn test_non_2xx_carries_status_and_body() {
        let router = Router::new().route(
            "/emails",
            post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "domain not verified") }),
        );
        let base = serve(router).await;

        let err = mailer(&base)
            .send(&sample_report(), "me@example.com")
            .await
            .unwrap_err();

        assert!(err.is_delivery());
        let message = err.to_string();
        assert!(message.contains("500"), "{}", message);
        assert!(message.contains("domain not verified"), "{}", message);
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_delivery_error() {
        let err = mailer("http://127.0.0.1:1")
            .send(&sample_report(), "me@example.com")
            .await
            .unwrap_err();
        assert!(err.is_delivery());
    }
}
