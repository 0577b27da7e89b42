/// Error handling for the report pipeline
///
/// Three failure families, matching where the pipeline can stop:
/// upstream fetch (`Network`, `Data`), configuration checked before any
/// network call (`Configuration`), and delivery (`Delivery`).
use thiserror::Error;

// =============================================================================
// MAIN ERROR TYPE
// =============================================================================

#[derive(Debug, Clone, Error)]
pub enum MailerError {
    /// Upstream connectivity or non-2xx status
    #[error("Network Error: {0}")]
    Network(#[from] NetworkError),

    /// Upstream body could not be parsed
    #[error("Data Error: {0}")]
    Data(#[from] DataError),

    /// Missing or invalid configuration
    #[error("Configuration Error: {0}")]
    Configuration(#[from] ConfigurationError),

    /// Mail provider rejected or failed the send
    #[error("Delivery Error: {0}")]
    Delivery(#[from] DeliveryError),
}

impl MailerError {
    /// Short machine-readable family name, used in logs
    pub fn kind(&self) -> &'static str {
        match self {
            MailerError::Network(_) => "network",
            MailerError::Data(_) => "data",
            MailerError::Configuration(_) => "configuration",
            MailerError::Delivery(_) => "delivery",
        }
    }

    /// True for errors raised while fetching market data
    pub fn is_upstream(&self) -> bool {
        matches!(self, MailerError::Network(_) | MailerError::Data(_))
    }

    pub fn is_configuration(&self) -> bool {
        matches!(self, MailerError::Configuration(_))
    }

    pub fn is_delivery(&self) -> bool {
        matches!(self, MailerError::Delivery(_))
    }

    /// Shorthand for a missing required setting
    pub fn missing_config(field: &str) -> Self {
        ConfigurationError::MissingConfig {
            field: field.to_string(),
        }
        .into()
    }

    /// Shorthand for a present but unusable setting
    pub fn invalid_config(field: &str, reason: impl Into<String>) -> Self {
        ConfigurationError::InvalidConfig {
            field: field.to_string(),
            reason: reason.into(),
        }
        .into()
    }
}

// =============================================================================
// NETWORK ERROR TYPES
// =============================================================================

#[derive(Debug, Clone, Error)]
pub enum NetworkError {
    #[error("Request to {endpoint} failed: {message}")]
    RequestFailed { endpoint: String, message: String },

    #[error("HTTP {status} from {endpoint}: {body}")]
    HttpStatusError {
        endpoint: String,
        status: u16,
        body: String,
    },
}

// =============================================================================
// DATA ERROR TYPES
// =============================================================================

#[derive(Debug, Clone, Error)]
pub enum DataError {
    #[error("Failed to parse {source_name} response: {message}")]
    ParseError {
        source_name: String,
        message: String,
    },
}

// =============================================================================
// CONFIGURATION ERROR TYPES
// =============================================================================

#[derive(Debug, Clone, Error)]
pub enum ConfigurationError {
    #[error("Missing required setting '{field}'")]
    MissingConfig { field: String },

    #[error("Invalid config field '{field}': {reason}")]
    InvalidConfig { field: String, reason: String },
}

// =============================================================================
// DELIVERY ERROR TYPES
// =============================================================================

#[derive(Debug, Clone, Error)]
pub enum DeliveryError {
    /// Provider answered with a non-2xx status
    #[error("{provider} delivery failed: HTTP {status} {body}")]
    ApiRejected {
        provider: String,
        status: u16,
        body: String,
    },

    /// Transport-level failure (connection, auth, SMTP reply)
    #[error("{provider} delivery failed: {message}")]
    TransportFailed { provider: String, message: String },
}
