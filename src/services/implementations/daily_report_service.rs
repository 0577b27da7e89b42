use crate::config::{Config, ScheduleConfig};
use crate::logger::{self, LogTag};
use crate::pipeline::ReportPipeline;
use crate::scheduler;
use crate::services::{Service, ServiceHealth};
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Notify;
use tokio::task::JoinHandle;

/// Runs the report pipeline once a day
pub struct DailyReportService {
    pipeline: Arc<ReportPipeline>,
    schedule: ScheduleConfig,
    running: Arc<AtomicBool>,
}

impl DailyReportService {
    pub fn new(pipeline: Arc<ReportPipeline>, schedule: ScheduleConfig) -> Self {
        Self {
            pipeline,
            schedule,
            running: Arc::new(AtomicBool::new(false)),
        }
    }
}

#[async_trait]
impl Service for DailyReportService {
    fn name(&self) -> &'static str {
        "daily_report"
    }

    fn priority(&self) -> i32 {
        20
    }

    fn is_enabled(&self, config: &Config) -> bool {
        config.schedule.enabled
    }

    async fn initialize(&mut self) -> Result<(), String> {
        logger::info(
            LogTag::Scheduler,
            &format!(
                "Daily report scheduled at {:02}:{:02} ({})",
                self.schedule.hour,
                self.schedule.minute,
                self.pipeline.timezone()
            ),
        );
        Ok(())
    }

    async fn start(&mut self, shutdown: Arc<Notify>) -> Result<Vec<JoinHandle<()>>, String> {
        let pipeline = self.pipeline.clone();
        let schedule = self.schedule.clone();
        let running = self.running.clone();
        running.store(true, Ordering::SeqCst);

        let handle = tokio::spawn(async move {
            scheduler::run_daily(pipeline, schedule, shutdown).await;
            running.store(false, Ordering::SeqCst);
        });

        Ok(vec![handle])
    }

    async fn health(&self) -> ServiceHealth {
        if self.running.load(Ordering::SeqCst) {
            ServiceHealth::Healthy
        } else {
            ServiceHealth::Unhealthy("scheduler loop not running".to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::tests::{taipei, FakeSource, RecordingDispatcher};

    fn service() -> DailyReportService {
        let pipeline = ReportPipeline::new(FakeSource::ok(), RecordingDispatcher::ok(), taipei());
        DailyReportService::new(Arc::new(pipeline), ScheduleConfig::default())
    }

    #[test]
    fn test_enabled_follows_schedule_config() {
        let mut config = Config::default();
        assert!(service().is_enabled(&config));

        config.schedule.enabled = false;
        assert!(!service().is_enabled(&config));
    }

    #[tokio::test]
    async fn test_health_tracks_loop() {
        let mut service = service();
        assert!(service.health().await.is_unhealthy());

        let shutdown = Arc::new(Notify::new());
        let handles = service.start(shutdown.clone()).await.unwrap();
        assert!(service.health().await.is_healthy());

        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
        shutdown.notify_waiters();
        for handle in handles {
            handle.await.unwrap();
        }
        assert!(service.health().await.is_unhealthy());
    }
}
