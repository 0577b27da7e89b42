//! Configuration schema
//!
//! Every section has working defaults; only the mail recipient and the
//! credentials of the chosen transport must be supplied for delivery.

use crate::config_struct;

// ============================================================================
// WEBSERVER
// ============================================================================

config_struct! {
    /// HTTP trigger surface
    pub struct WebserverConfig {
        /// Host/IP address to bind
        host: String = "0.0.0.0".to_string(),

        /// Listen port (env: PORT)
        port: u16 = 3000,
    }
}

// ============================================================================
// SCHEDULE
// ============================================================================

config_struct! {
    /// Daily report schedule, evaluated in the root timezone
    pub struct ScheduleConfig {
        /// Disable to serve only the on-demand trigger
        enabled: bool = true,

        /// Local hour of the daily run (0-23)
        hour: u32 = 9,

        /// Local minute of the daily run (0-59)
        minute: u32 = 0,
    }
}

// ============================================================================
// MAIL
// ============================================================================

config_struct! {
    /// Mail delivery settings
    pub struct MailConfig {
        /// Transport: "gmail"/"smtp" (default) or "resend"/"api" (env: MAIL_PROVIDER)
        provider: String = "gmail".to_string(),

        /// Recipient address (env: MAIL_TO)
        to: String = String::new(),

        /// Sender used by the API transport (env: MAIL_FROM)
        from: String = "btc-notify@example.com".to_string(),

        /// SMTP login, also the sender address (env: GMAIL_USER)
        gmail_user: String = String::new(),

        /// SMTP app password (env: GMAIL_APP_PASSWORD)
        gmail_app_password: String = String::new(),

        /// SMTP relay host
        smtp_relay: String = "smtp.gmail.com".to_string(),

        /// Resend API key (env: RESEND_API_KEY)
        resend_api_key: String = String::new(),

        /// Resend emails endpoint
        resend_api_url: String = "https://api.resend.com/emails".to_string(),
    }
}

// ============================================================================
// MARKET DATA
// ============================================================================

config_struct! {
    /// Upstream market data endpoints
    pub struct MarketDataConfig {
        /// Spot price with 24h change
        price_url: String = "https://api.coingecko.com/api/v3/simple/price?ids=bitcoin&vs_currencies=usd&include_24hr_change=true".to_string(),

        /// Recommended fee rates
        fees_url: String = "https://mempool.space/api/v1/fees/recommended".to_string(),

        /// Per-request timeout in seconds (0 = no timeout)
        request_timeout_secs: u64 = 0,
    }
}

// ============================================================================
// ROOT CONFIGURATION
// ============================================================================

config_struct! {
    /// Root configuration structure containing all sub-configurations
    pub struct Config {
        /// IANA timezone for the schedule and report date (env: TZ)
        timezone: String = "Asia/Taipei".to_string(),

        /// Webserver configuration
        webserver: WebserverConfig = WebserverConfig::default(),

        /// Schedule configuration
        schedule: ScheduleConfig = ScheduleConfig::default(),

        /// Mail configuration
        mail: MailConfig = MailConfig::default(),

        /// Market data configuration
        market_data: MarketDataConfig = MarketDataConfig::default(),
    }
}
