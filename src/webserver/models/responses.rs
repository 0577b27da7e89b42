/// API response type definitions
///
/// JSON bodies returned by the trigger surface
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// ISO-8601 UTC timestamp with millisecond precision
pub fn iso_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// GET /
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceDescriptor {
    pub service: String,
    pub status: String,
    pub timezone: String,
    pub endpoints: EndpointMap,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointMap {
    pub health: String,
    pub manual_trigger: String,
}

/// GET /health
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub timezone: String,
}

/// GET /run-once on success
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriggerSuccess {
    pub success: bool,
    pub message: String,
    pub timestamp: String,
}

/// Any failed request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
    pub timestamp: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
            timestamp: iso_timestamp(),
        }
    }
}
