use axum::{extract::State, routing::get, Json, Router};
use std::sync::Arc;

use crate::{
    logger::{self, LogTag},
    webserver::{
        models::{iso_timestamp, EndpointMap, HealthResponse, ServiceDescriptor},
        state::AppState,
    },
};

pub const SERVICE_NAME: &str = "BTC Daily Mailer";

/// Create status routes
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(service_descriptor))
        .route("/health", get(health_check))
}

/// GET /
async fn service_descriptor(State(state): State<Arc<AppState>>) -> Json<ServiceDescriptor> {
    Json(ServiceDescriptor {
        service: SERVICE_NAME.to_string(),
        status: "running".to_string(),
        timezone: state.config.timezone.clone(),
        endpoints: EndpointMap {
            health: "/health".to_string(),
            manual_trigger: "/run-once".to_string(),
        },
    })
}

/// GET /health
async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    logger::debug(
        LogTag::Webserver,
        &format!("Health check (uptime {}s)", state.uptime_seconds()),
    );

    Json(HealthResponse {
        status: "ok".to_string(),
        timestamp: iso_timestamp(),
        timezone: state.config.timezone.clone(),
    })
}
