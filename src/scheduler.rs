//! Daily scheduled trigger
//!
//! Fires once per day at a wall-clock time in the configured timezone.
//! Failures are logged and the schedule keeps going.

use crate::config::ScheduleConfig;
use crate::logger::{self, LogTag};
use crate::pipeline::ReportPipeline;
use chrono::{DateTime, Duration as ChronoDuration, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;

/// Longest DST gap we step over when the wall-clock time does not exist
const MAX_GAP_MINUTES: i64 = 180;

/// Resolve a local wall-clock time to UTC
///
/// Ambiguous times (clocks going back) take the earlier instant. Times
/// inside a gap (clocks going forward) move to the first valid minute.
fn resolve_local(tz: Tz, naive: NaiveDateTime) -> Option<DateTime<Utc>> {
    (0..=MAX_GAP_MINUTES).find_map(|shift| {
        tz.from_local_datetime(&(naive + ChronoDuration::minutes(shift)))
            .earliest()
            .map(|dt| dt.with_timezone(&Utc))
    })
}

/// Next instant strictly after `now` at `hour:minute` local time in `tz`
pub fn next_fire_after(now: DateTime<Utc>, tz: Tz, hour: u32, minute: u32) -> Option<DateTime<Utc>> {
    let time = NaiveTime::from_hms_opt(hour, minute, 0)?;
    let today: NaiveDate = now.with_timezone(&tz).date_naive();

    (0..=2)
        .filter_map(|offset| today.checked_add_signed(ChronoDuration::days(offset)))
        .filter_map(|date| resolve_local(tz, date.and_time(time)))
        .find(|candidate| *candidate > now)
}

/// Run one scheduled report, logging the outcome
pub async fn run_scheduled(pipeline: &ReportPipeline) {
    logger::info(LogTag::Scheduler, "Scheduled report triggered");

    match pipeline.run().await {
        Ok(report) => logger::info(
            LogTag::Scheduler,
            &format!("Scheduled report delivered: {}", report.subject),
        ),
        Err(e) => logger::error(
            LogTag::Scheduler,
            &format!("Scheduled report failed ({}): {}", e.kind(), e),
        ),
    }
}

/// Loop until `shutdown` fires, running the pipeline at each daily slot
///
/// A run already in progress when shutdown fires completes first.
pub async fn run_daily(pipeline: Arc<ReportPipeline>, schedule: ScheduleConfig, shutdown: Arc<Notify>) {
    let tz = pipeline.timezone();
    let shutdown_signal = shutdown.notified();
    tokio::pin!(shutdown_signal);

    loop {
        let now = Utc::now();
        let Some(next) = next_fire_after(now, tz, schedule.hour, schedule.minute) else {
            logger::error(
                LogTag::Scheduler,
                &format!(
                    "Cannot compute next run for {:02}:{:02} in {}; scheduler stopped",
                    schedule.hour, schedule.minute, tz
                ),
            );
            return;
        };

        let wait = (next - now).to_std().unwrap_or(Duration::ZERO);
        logger::info(
            LogTag::Scheduler,
            &format!(
                "Next report at {} ({}s from now)",
                next.with_timezone(&tz).format("%Y-%m-%d %H:%M %Z"),
                wait.as_secs()
            ),
        );

        tokio::select! {
            _ = &mut shutdown_signal => {
                logger::info(LogTag::Scheduler, "Scheduler stopping");
                return;
            }
            _ = tokio::time::sleep(wait) => {}
        }

        run_scheduled(&pipeline).await;
    }
}
