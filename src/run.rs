//! Application bootstrap
//!
//! Loads configuration, builds the shared pipeline and either runs it once
//! (`--run-once`) or serves the HTTP trigger and the daily schedule until a
//! shutdown signal arrives.

use crate::arguments::{get_config_path_override, get_port_override, is_run_once_enabled, validate_port_argument};
use crate::config::{load_config_from_path, Config, CONFIG_FILE_PATH};
use crate::logger::{self, LogTag};
use crate::pipeline::ReportPipeline;
use crate::services::implementations::{DailyReportService, WebserverService};
use crate::services::ServiceManager;
use crate::webserver::AppState;
use anyhow::{anyhow, Context, Result};
use std::sync::Arc;

/// Layer file, environment and CLI settings into one validated `Config`
///
/// Precedence, lowest first: defaults, TOML file, environment, `--port`.
pub fn build_config<F>(path: &str, lookup: F, port_override: Option<u16>) -> Result<Config>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = load_config_from_path(path).map_err(|e| anyhow!(e))?;

    let applied = config
        .apply_env_overrides(lookup)
        .context("Invalid environment override")?;
    if !applied.is_empty() {
        logger::debug(
            LogTag::Config,
            &format!("Environment overrides applied: {}", applied.join(", ")),
        );
    }

    if let Some(port) = port_override {
        config.webserver.port = port;
    }

    config.validate().context("Invalid configuration")?;
    Ok(config)
}

/// Read `.env`, the config file and CLI overrides
pub fn load_config() -> Result<Config> {
    match dotenv::dotenv() {
        Ok(path) => logger::debug(
            LogTag::Config,
            &format!("Loaded environment from {}", path.display()),
        ),
        Err(_) => logger::debug(LogTag::Config, "No .env file found"),
    }

    validate_port_argument().map_err(|e| anyhow!(e))?;

    let path = get_config_path_override().unwrap_or_else(|| CONFIG_FILE_PATH.to_string());
    logger::info(LogTag::Config, &format!("Loading configuration from {}", path));

    build_config(&path, |key| std::env::var(key).ok(), get_port_override())
}

pub async fn run() -> Result<()> {
    let config = Arc::new(load_config()?);
    let pipeline = Arc::new(ReportPipeline::from_config(&config).context("Failed to build report pipeline")?);

    if config.mail.to.trim().is_empty() {
        logger::warning(
            LogTag::Config,
            "MAIL_TO is not set; every delivery will fail until it is configured",
        );
    }

    if is_run_once_enabled() {
        logger::info(LogTag::System, "Run-once mode: sending a single report");
        let report = pipeline.run().await.context("Report run failed")?;
        logger::info(LogTag::System, &format!("Delivered: {}", report.subject));
        return Ok(());
    }

    let mut manager = ServiceManager::new(config.clone());
    let state = Arc::new(AppState::new(config.clone(), pipeline.clone()));
    manager.register(Box::new(WebserverService::new(state, config.webserver.clone())));
    manager.register(Box::new(DailyReportService::new(pipeline, config.schedule.clone())));

    if let Err(e) = manager.start_all().await {
        manager.stop_all().await;
        return Err(anyhow!(e));
    }

    wait_for_shutdown_signal().await.map_err(|e| anyhow!(e))?;

    manager.stop_all().await;
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C, SIGTERM on Unix)
async fn wait_for_shutdown_signal() -> Result<(), String> {
    logger::info(LogTag::System, "Waiting for shutdown signal (Ctrl+C)");

    #[cfg(unix)]
    let signal_name = {
        use tokio::signal::unix::{signal, SignalKind};

        let mut sigint =
            signal(SignalKind::interrupt()).map_err(|e| format!("Failed to bind SIGINT: {}", e))?;
        let mut sigterm = signal(SignalKind::terminate())
            .map_err(|e| format!("Failed to bind SIGTERM: {}", e))?;

        tokio::select! {
            _ = sigint.recv() => "SIGINT",
            _ = sigterm.recv() => "SIGTERM",
        }
    };

    #[cfg(not(unix))]
    let signal_name = {
        tokio::signal::ctrl_c()
            .await
            .map_err(|e| format!("Failed to listen for shutdown signal: {}", e))?;
        "CTRL_C"
    };

    logger::warning(
        LogTag::System,
        &format!("Shutdown signal received ({})", signal_name),
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    const MISSING_FILE: &str = "data/does-not-exist.toml";

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_without_file_or_env() {
        let config = build_config(MISSING_FILE, lookup(&[]), None).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_cli_port_beats_environment() {
        let config = build_config(MISSING_FILE, lookup(&[("PORT", "8080")]), Some(9090)).unwrap();
        assert_eq!(config.webserver.port, 9090);

        let config = build_config(MISSING_FILE, lookup(&[("PORT", "8080")]), None).unwrap();
        assert_eq!(config.webserver.port, 8080);
    }

    #[test]
    fn test_bad_timezone_fails_validation() {
        let err = build_config(MISSING_FILE, lookup(&[("TZ", "Nowhere/Land")]), None).unwrap_err();
        assert!(format!("{:#}", err).contains("Nowhere/Land"));
    }

    #[test]
    fn test_bad_port_env_is_rejected() {
        assert!(build_config(MISSING_FILE, lookup(&[("PORT", "http")]), None).is_err());
    }
}
