//! Report pipeline: fetch, format, deliver
//!
//! Holds only immutable configuration and trait objects, so the scheduled
//! and on-demand triggers can share one instance and run concurrently.
//! Every run is independent and makes at most one delivery attempt.

use crate::config::{Config, MailConfig};
use crate::errors::MailerError;
use crate::logger::{self, LogTag};
use crate::market_data::{MarketDataFetcher, MarketDataSource};
use crate::notifications::{self, DeliverySettings, MailTransportConfig};
use crate::report::{format_report, Report};
use async_trait::async_trait;
use chrono::Utc;
use chrono_tz::Tz;
use std::sync::Arc;
use std::time::Instant;

/// Final stage of the pipeline
#[async_trait]
pub trait ReportDispatcher: Send + Sync {
    async fn dispatch(&self, report: &Report) -> Result<(), MailerError>;
}

/// Delivers through the configured mail transport
pub struct MailDispatcher {
    transport: MailTransportConfig,
    recipient: String,
    settings: DeliverySettings,
}

impl MailDispatcher {
    pub fn new(transport: MailTransportConfig, recipient: &str, settings: DeliverySettings) -> Self {
        Self {
            transport,
            recipient: recipient.to_string(),
            settings,
        }
    }

    pub fn from_config(mail: &MailConfig) -> Self {
        Self::new(
            MailTransportConfig::from_mail_config(mail),
            &mail.to,
            DeliverySettings::from_mail_config(mail),
        )
    }

    pub fn transport(&self) -> &MailTransportConfig {
        &self.transport
    }
}

#[async_trait]
impl ReportDispatcher for MailDispatcher {
    async fn dispatch(&self, report: &Report) -> Result<(), MailerError> {
        notifications::send(report, &self.transport, &self.recipient, &self.settings).await
    }
}

pub struct ReportPipeline {
    source: Arc<dyn MarketDataSource>,
    dispatcher: Arc<dyn ReportDispatcher>,
    timezone: Tz,
}

impl ReportPipeline {
    pub fn new(
        source: Arc<dyn MarketDataSource>,
        dispatcher: Arc<dyn ReportDispatcher>,
        timezone: Tz,
    ) -> Self {
        Self {
            source,
            dispatcher,
            timezone,
        }
    }

    /// Live pipeline: CoinGecko + mempool.space in, configured mail out
    pub fn from_config(config: &Config) -> Result<Self, MailerError> {
        let source = MarketDataFetcher::from_config(&config.market_data)?;
        let dispatcher = MailDispatcher::from_config(&config.mail);

        logger::info(
            LogTag::Config,
            &format!(
                "Mail transport: {}",
                dispatcher.transport().provider().display_name()
            ),
        );

        Ok(Self::new(Arc::new(source), Arc::new(dispatcher), config.tz()?))
    }

    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    /// Fetch market data and format it for the current date
    pub async fn build_report(&self) -> Result<Report, MailerError> {
        let (snapshot, fee) = self.source.fetch().await?;
        let report = format_report(&snapshot, &fee, Utc::now(), self.timezone);

        logger::info(LogTag::Report, &format!("Report built: {}", report.subject));
        logger::verbose(LogTag::Report, &report.text);
        Ok(report)
    }

    /// One full run; returns the delivered report
    pub async fn run(&self) -> Result<Report, MailerError> {
        let start = Instant::now();

        let report = self.build_report().await?;
        self.dispatcher.dispatch(&report).await?;

        logger::info(
            LogTag::Report,
            &format!("Report run completed in {}ms", start.elapsed().as_millis()),
        );
        Ok(report)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::errors::{DeliveryError, NetworkError};
    use crate::market_data::{FeeEstimate, PriceSnapshot};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    /// Fixed market data, or a fixed failure
    pub struct FakeSource {
        pub fail: bool,
        pub calls: AtomicUsize,
    }

    impl FakeSource {
        pub fn ok() -> Arc<Self> {
            Arc::new(Self {
                fail: false,
                calls: AtomicUsize::new(0),
            })
        }

        pub fn failing() -> Arc<Self> {
            Arc::new(Self {
                fail: true,
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl MarketDataSource for FakeSource {
        async fn fetch(&self) -> Result<(PriceSnapshot, FeeEstimate), MailerError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            // Yield so concurrent runs interleave
            tokio::time::sleep(Duration::from_millis(10)).await;
            if self.fail {
                return Err(NetworkError::HttpStatusError {
                    endpoint: "https://api.coingecko.com".to_string(),
                    status: 429,
                    body: "rate limited".to_string(),
                }
                .into());
            }
            Ok((PriceSnapshot::new(65000.5, 3.2), FeeEstimate::new(10, 5, 2)))
        }
    }

    /// Records delivered subjects, optionally rejecting every report
    pub struct RecordingDispatcher {
        pub fail: bool,
        pub delivered: tokio::sync::Mutex<Vec<String>>,
    }

    impl RecordingDispatcher {
        pub fn ok() -> Arc<Self> {
            Arc::new(Self {
                fail: false,
                delivered: Default::default(),
            })
        }

        pub fn failing() -> Arc<Self> {
            Arc::new(Self {
                fail: true,
                delivered: Default::default(),
            })
        }

        pub async fn count(&self) -> usize {
            self.delivered.lock().await.len()
        }
    }

    #[async_trait]
    impl ReportDispatcher for RecordingDispatcher {
        async fn dispatch(&self, report: &Report) -> Result<(), MailerError> {
            if self.fail {
                return Err(DeliveryError::ApiRejected {
                    provider: "Resend".to_string(),
                    status: 500,
                    body: "upstream mail outage".to_string(),
                }
                .into());
            }
            self.delivered.lock().await.push(report.subject.clone());
            Ok(())
        }
    }

    pub fn taipei() -> Tz {
        "Asia/Taipei".parse().unwrap()
    }

    #[tokio::test]
    async fn test_run_delivers_formatted_report() {
        let dispatcher = RecordingDispatcher::ok();
        let pipeline = ReportPipeline::new(FakeSource::ok(), dispatcher.clone(), taipei());

        let report = pipeline.run().await.unwrap();

        assert!(report.subject.starts_with("BTC 每日重點 – "));
        assert!(report.text.contains("• 價格：$65,000.50（24h +3.20%）"));
        assert_eq!(*dispatcher.delivered.lock().await, vec![report.subject]);
    }

    #[tokio::test]
    async fn test_concurrent_runs_make_independent_deliveries() {
        let dispatcher = RecordingDispatcher::ok();
        let source = FakeSource::ok();
        let pipeline = ReportPipeline::new(source.clone(), dispatcher.clone(), taipei());

        let (first, second) = tokio::join!(pipeline.run(), pipeline.run());

        assert!(first.is_ok() && second.is_ok());
        assert_eq!(source.calls.load(Ordering::SeqCst), 2);
        assert_eq!(dispatcher.count().await, 2);
    }

    #[tokio::test]
    async fn test_fetch_failure_skips_delivery() {
        let dispatcher = RecordingDispatcher::ok();
        let pipeline = ReportPipeline::new(FakeSource::failing(), dispatcher.clone(), taipei());

        let err = pipeline.run().await.unwrap_err();

        assert!(err.is_upstream());
        assert!(err.to_string().contains("rate limited"));
        assert_eq!(dispatcher.count().await, 0);
    }

    #[tokio::test]
    async fn test_delivery_failure_propagates() {
        let pipeline =
            ReportPipeline::new(FakeSource::ok(), RecordingDispatcher::failing(), taipei());

        let err = pipeline.run().await.unwrap_err();

        assert!(err.is_delivery());
        assert!(err.to_string().contains("upstream mail outage"));
    }

    #[tokio::test]
    async fn test_mail_dispatcher_rejects_missing_recipient() {
        let mut mail = MailConfig::default();
        mail.gmail_user = "me@gmail.com".to_string();
        mail.gmail_app_password = "pw".to_string();

        let err = MailDispatcher::from_config(&mail)
            .dispatch(&Report {
                subject: "s".to_string(),
                html: "h".to_string(),
                text: "t".to_string(),
            })
            .await
            .unwrap_err();

        assert!(err.is_configuration());
    }

    #[test]
    fn test_from_config_rejects_unknown_timezone() {
        let mut config = Config::default();
        config.timezone = "Mars/Olympus".to_string();
        assert!(matches!(
            ReportPipeline::from_config(&config),
            Err(e) if e.is_configuration()
        ));
    }
}
