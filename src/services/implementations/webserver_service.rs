use crate::config::WebserverConfig;
use crate::logger::{self, LogTag};
use crate::services::{Service, ServiceHealth};
use crate::webserver::{self, AppState};
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Notify;
use tokio::task::JoinHandle;

pub struct WebserverService {
    state: Arc<AppState>,
    settings: WebserverConfig,
    serving: Arc<AtomicBool>,
}

impl WebserverService {
    pub fn new(state: Arc<AppState>, settings: WebserverConfig) -> Self {
        Self {
            state,
            settings,
            serving: Arc::new(AtomicBool::new(false)),
        }
    }
}

#[async_trait]
impl Service for WebserverService {
    fn name(&self) -> &'static str {
        "webserver"
    }

    fn priority(&self) -> i32 {
        10
    }

    async fn start(&mut self, shutdown: Arc<Notify>) -> Result<Vec<JoinHandle<()>>, String> {
        // Bind before spawning so a busy port fails startup
        let listener = webserver::bind_listener(&self.settings.host, self.settings.port).await?;

        let state = self.state.clone();
        let serving = self.serving.clone();
        serving.store(true, Ordering::SeqCst);

        let handle = tokio::spawn(async move {
            if let Err(e) = webserver::serve(listener, state, shutdown).await {
                logger::error(LogTag::Webserver, &format!("Webserver failed: {}", e));
            }
            serving.store(false, Ordering::SeqCst);
        });

        Ok(vec![handle])
    }

    async fn health(&self) -> ServiceHealth {
        if self.serving.load(Ordering::SeqCst) {
            ServiceHealth::Healthy
        } else {
            ServiceHealth::Unhealthy("not serving".to_string())
        }
    }
}
