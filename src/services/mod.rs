//! Long-running services and their lifecycle
//!
//! Services start in ascending priority and stop in reverse. Each one
//! receives the shared shutdown `Notify` and hands back its task handles.

mod health;
pub mod implementations;

pub use health::ServiceHealth;

use crate::config::Config;
use crate::logger::{self, LogTag};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;
use tokio::task::JoinHandle;

/// Bounded wait for each task handle during shutdown
const STOP_TIMEOUT: Duration = Duration::from_secs(5);

/// Core service trait that all services must implement
#[async_trait]
pub trait Service: Send + Sync {
    /// Unique service identifier
    fn name(&self) -> &'static str;

    /// Service priority (lower = starts earlier, stops later)
    fn priority(&self) -> i32 {
        100
    }

    /// Check if service is enabled in configuration
    fn is_enabled(&self, _config: &Config) -> bool {
        true
    }

    /// Initialize the service
    async fn initialize(&mut self) -> Result<(), String> {
        Ok(())
    }

    /// Start the service
    async fn start(&mut self, shutdown: Arc<Notify>) -> Result<Vec<JoinHandle<()>>, String>;

    /// Stop the service
    async fn stop(&mut self) -> Result<(), String> {
        Ok(())
    }

    /// Check service health
    async fn health(&self) -> ServiceHealth {
        ServiceHealth::Healthy
    }
}

pub struct ServiceManager {
    services: Vec<Box<dyn Service>>,
    handles: HashMap<&'static str, Vec<JoinHandle<()>>>,
    shutdown: Arc<Notify>,
    config: Arc<Config>,
}

impl ServiceManager {
    pub fn new(config: Arc<Config>) -> Self {
        Self {
            services: Vec::new(),
            handles: HashMap::new(),
            shutdown: Arc::new(Notify::new()),
            config,
        }
    }

    /// Register a service
    pub fn register(&mut self, service: Box<dyn Service>) {
        self.services.push(service);
        self.services.sort_by_key(|s| s.priority());
    }

    /// Names of the services currently running, in start order
    pub fn running(&self) -> Vec<&'static str> {
        self.services
            .iter()
            .map(|s| s.name())
            .filter(|name| self.handles.contains_key(name))
            .collect()
    }

    /// Start all enabled services in priority order
    pub async fn start_all(&mut self) -> Result<(), String> {
        logger::info(LogTag::System, "Starting all services...");

        for service in self.services.iter_mut() {
            let name = service.name();
            if !service.is_enabled(&self.config) {
                logger::info(LogTag::System, &format!("Service disabled: {}", name));
                continue;
            }

            logger::debug(LogTag::System, &format!("Initializing service: {}", name));
            service
                .initialize()
                .await
                .map_err(|e| format!("Service {} failed to initialize: {}", name, e))?;

            logger::debug(LogTag::System, &format!("Starting service: {}", name));
            let handles = service
                .start(self.shutdown.clone())
                .await
                .map_err(|e| format!("Service {} failed to start: {}", name, e))?;
            self.handles.insert(name, handles);

            logger::info(LogTag::System, &format!("✅ Service started: {}", name));
        }

        logger::info(LogTag::System, "✅ All services started");
        Ok(())
    }

    /// Stop running services in reverse priority order
    pub async fn stop_all(&mut self) {
        logger::info(LogTag::System, "Stopping all services...");

        self.shutdown.notify_waiters();

        for service in self.services.iter_mut().rev() {
            let name = service.name();
            let Some(handles) = self.handles.remove(name) else {
                continue;
            };

            if let Err(e) = service.stop().await {
                logger::warning(
                    LogTag::System,
                    &format!("Service stop error for {}: {}", name, e),
                );
            }

            for handle in handles {
                if tokio::time::timeout(STOP_TIMEOUT, handle).await.is_err() {
                    logger::warning(
                        LogTag::System,
                        &format!("Service {} did not stop within {}s", name, STOP_TIMEOUT.as_secs()),
                    );
                }
            }

            logger::info(LogTag::System, &format!("✅ Service stopped: {}", name));
        }

        logger::info(LogTag::System, "✅ All services stopped");
    }

    /// Get health status
    pub async fn get_health(&self) -> HashMap<&'static str, ServiceHealth> {
        let mut health = HashMap::new();
        for service in &self.services {
            health.insert(service.name(), service.health().await);
        }
        health
    }
}
