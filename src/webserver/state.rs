/// Shared application state for the webserver
///
/// Route handlers only read from it; each request that triggers a report
/// runs its own pipeline invocation.
use crate::config::Config;
use crate::pipeline::ReportPipeline;
use chrono::{DateTime, Utc};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    /// Effective configuration
    pub config: Arc<Config>,

    /// Pipeline shared with the scheduler
    pub pipeline: Arc<ReportPipeline>,

    /// Server startup time
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    pub fn new(config: Arc<Config>, pipeline: Arc<ReportPipeline>) -> Self {
        Self {
            config,
            pipeline,
            startup_time: Utc::now(),
        }
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        (Utc::now() - self.startup_time).num_seconds().max(0) as u64
    }
}
