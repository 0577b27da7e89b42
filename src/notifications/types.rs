//! Transport selection types
//!
//! The provider string from configuration resolves to exactly one
//! `MailTransportConfig` variant at startup.

use crate::config::MailConfig;
use crate::errors::MailerError;
use crate::logger::{self, LogTag};
use std::fmt;

/// Which transport delivers the report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MailProvider {
    /// Authenticated SMTP relay (Gmail by default)
    Smtp,
    /// Resend HTTP API
    Api,
}

impl MailProvider {
    /// Parse a provider name; `None` when unrecognized
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "" | "gmail" | "smtp" => Some(MailProvider::Smtp),
            "resend" | "api" => Some(MailProvider::Api),
            _ => None,
        }
    }

    /// Parse a provider name, falling back to SMTP with a warning
    pub fn resolve(value: &str) -> Self {
        match Self::parse(value) {
            Some(provider) => provider,
            None => {
                logger::warning(
                    LogTag::Config,
                    &format!("Unknown mail provider '{}', falling back to SMTP", value),
                );
                MailProvider::Smtp
            }
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            MailProvider::Smtp => "Gmail SMTP",
            MailProvider::Api => "Resend",
        }
    }
}

/// Credentials of the active transport
#[derive(Clone, PartialEq, Eq)]
pub enum MailTransportConfig {
    Smtp { user: String, app_password: String },
    Api { api_key: String, from_address: String },
}

impl MailTransportConfig {
    pub fn from_mail_config(mail: &MailConfig) -> Self {
        match MailProvider::resolve(&mail.provider) {
            MailProvider::Smtp => MailTransportConfig::Smtp {
                user: mail.gmail_user.clone(),
                app_password: mail.gmail_app_password.clone(),
            },
            MailProvider::Api => MailTransportConfig::Api {
                api_key: mail.resend_api_key.clone(),
                from_address: mail.from.clone(),
            },
        }
    }

    pub fn provider(&self) -> MailProvider {
        match self {
            MailTransportConfig::Smtp { .. } => MailProvider::Smtp,
            MailTransportConfig::Api { .. } => MailProvider::Api,
        }
    }

    /// Fail when the active transport lacks a credential
    pub fn check_credentials(&self) -> Result<(), MailerError> {
        match self {
            MailTransportConfig::Smtp { user, app_password } => {
                if user.trim().is_empty() {
                    return Err(MailerError::missing_config("GMAIL_USER"));
                }
                if app_password.is_empty() {
                    return Err(MailerError::missing_config("GMAIL_APP_PASSWORD"));
                }
            }
            MailTransportConfig::Api { api_key, from_address } => {
                if api_key.trim().is_empty() {
                    return Err(MailerError::missing_config("RESEND_API_KEY"));
                }
                if from_address.trim().is_empty() {
                    return Err(MailerError::missing_config("MAIL_FROM"));
                }
            }
        }
        Ok(())
    }
}

// Secrets stay out of logs
impl fmt::Debug for MailTransportConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MailTransportConfig::Smtp { user, .. } => f
                .debug_struct("Smtp")
                .field("user", user)
                .field("app_password", &"***")
                .finish(),
            MailTransportConfig::Api { from_address, .. } => f
                .debug_struct("Api")
                .field("api_key", &"***")
                .field("from_address", from_address)
                .finish(),
        }
    }
}

/// Endpoints used by the transports
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliverySettings {
    pub smtp_relay: String,
    pub api_url: String,
}

impl DeliverySettings {
    pub fn from_mail_config(mail: &MailConfig) -> Self {
        Self {
            smtp_relay: mail.smtp_relay.clone(),
            api_url: mail.resend_api_url.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_parse() {
        assert_eq!(MailProvider::parse("gmail"), Some(MailProvider::Smtp));
        assert_eq!(MailProvider::parse("SMTP"), Some(MailProvider::Smtp));
        assert_eq!(MailProvider::parse(""), Some(MailProvider::Smtp));
        assert_eq!(MailProvider::parse("resend"), Some(MailProvider::Api));
        assert_eq!(MailProvider::parse(" api "), Some(MailProvider::Api));
        assert_eq!(MailProvider::parse("sendgrid"), None);
    }

    #[test]
    fn test_unknown_provider_falls_back_to_smtp() {
        assert_eq!(MailProvider::resolve("carrier-pigeon"), MailProvider::Smtp);
    }

    #[test]
    fn test_transport_from_config() {
        let mut mail = MailConfig::default();
        mail.gmail_user = "me@gmail.com".to_string();
        mail.gmail_app_password = "app-pass".to_string();
        assert_eq!(
            MailTransportConfig::from_mail_config(&mail),
            MailTransportConfig::Smtp {
                user: "me@gmail.com".to_string(),
                app_password: "app-pass".to_string(),
            }
        );

        mail.provider = "resend".to_string();
        mail.resend_api_key = "re_123".to_string();
        assert_eq!(
            MailTransportConfig::from_mail_config(&mail),
            MailTransportConfig::Api {
                api_key: "re_123".to_string(),
                from_address: "btc-notify@example.com".to_string(),
            }
        );
    }

    #[test]
    fn test_check_credentials() {
        let smtp = MailTransportConfig::Smtp {
            user: "me@gmail.com".to_string(),
            app_password: String::new(),
        };
        let err = smtp.check_credentials().unwrap_err();
        assert!(err.is_configuration());
        assert!(err.to_string().contains("GMAIL_APP_PASSWORD"));

        let api = MailTransportConfig::Api {
            api_key: String::new(),
            from_address: "a@b.c".to_string(),
        };
        assert!(api.check_credentials().unwrap_err().to_string().contains("RESEND_API_KEY"));

        let api = MailTransportConfig::Api {
            api_key: "re_123".to_string(),
            from_address: "a@b.c".to_string(),
        };
        assert!(api.check_credentials().is_ok());
    }

    #[test]
    fn test_debug_hides_secrets() {
        let api = MailTransportConfig::Api {
            api_key: "re_secret".to_string(),
            from_address: "a@b.c".to_string(),
        };
        assert!(!format!("{:?}", api).contains("re_secret"));
    }
}
