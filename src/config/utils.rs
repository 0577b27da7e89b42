use super::schemas::Config;
/// Configuration utilities - loading, environment overrides and validation
///
/// The loaded `Config` is returned by value; callers own it and pass it
/// down explicitly.
use crate::errors::MailerError;
use chrono_tz::Tz;
use std::path::Path;

/// Default configuration file path
pub const CONFIG_FILE_PATH: &str = "data/config.toml";

/// Environment variables recognized as overrides
pub const ENV_KEYS: [&str; 8] = [
    "PORT",
    "TZ",
    "MAIL_TO",
    "MAIL_PROVIDER",
    "MAIL_FROM",
    "GMAIL_USER",
    "GMAIL_APP_PASSWORD",
    "RESEND_API_KEY",
];

/// Load configuration from a TOML file
///
/// A missing file is not an error: defaults are used instead.
///
/// # Returns
/// - `Ok(Config)` - parsed or default configuration
/// - `Err(String)` - the file exists but could not be read or parsed
pub fn load_config_from_path(path: &str) -> Result<Config, String> {
    if !Path::new(path).exists() {
        return Ok(Config::default());
    }

    let contents = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config file '{}': {}", path, e))?;

    toml::from_str::<Config>(&contents)
        .map_err(|e| format!("Failed to parse config file '{}': {}", path, e))
}

impl Config {
    /// Apply environment overrides on top of file values
    ///
    /// `lookup` abstracts the environment so tests can feed a map. Empty
    /// values are treated as unset. Returns the names of applied keys.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<Vec<&'static str>, MailerError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut applied = Vec::new();

        for key in ENV_KEYS {
            let value = match lookup(key) {
                Some(v) if !v.trim().is_empty() => v.trim().to_string(),
                _ => continue,
            };

            match key {
                "PORT" => {
                    self.webserver.port = value
                        .parse()
                        .map_err(|_| MailerError::invalid_config("PORT", format!("'{}' is not a port number", value)))?;
                }
                "TZ" => self.timezone = value,
                "MAIL_TO" => self.mail.to = value,
                "MAIL_PROVIDER" => self.mail.provider = value,
                "MAIL_FROM" => self.mail.from = value,
                "GMAIL_USER" => self.mail.gmail_user = value,
                "GMAIL_APP_PASSWORD" => self.mail.gmail_app_password = value,
                "RESEND_API_KEY" => self.mail.resend_api_key = value,
                _ => continue,
            }
            applied.push(key);
        }

        Ok(applied)
    }

    /// Parsed IANA timezone
    pub fn tz(&self) -> Result<Tz, MailerError> {
        self.timezone.parse::<Tz>().map_err(|e| {
            MailerError::invalid_config("timezone", format!("'{}' is not an IANA timezone: {}", self.timezone, e))
        })
    }

    /// Startup validation of everything that does not depend on credentials
    ///
    /// Recipient and transport credentials are checked at send time so the
    /// service can start and report the problem through `/run-once`.
    pub fn validate(&self) -> Result<(), MailerError> {
        self.tz()?;

        if self.schedule.hour > 23 {
            return Err(MailerError::invalid_config(
                "schedule.hour",
                format!("{} is outside 0-23", self.schedule.hour),
            ));
        }
        if self.schedule.minute > 59 {
            return Err(MailerError::invalid_config(
                "schedule.minute",
                format!("{} is outside 0-59", self.schedule.minute),
            ));
        }

        for (field, raw) in [
            ("market_data.price_url", &self.market_data.price_url),
            ("market_data.fees_url", &self.market_data.fees_url),
            ("mail.resend_api_url", &self.mail.resend_api_url),
        ] {
            url::Url::parse(raw).map_err(|e| MailerError::invalid_config(field, e.to_string()))?;
        }

        Ok(())
    }
}
