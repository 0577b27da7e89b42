//! Structured logging for the mailer
//!
//! Tag-based API with five levels:
//! - Errors and warnings are always shown (warnings are dropped with --quiet)
//! - Debug output per module via --debug-<tag> flags
//! - Verbose output via --verbose
//! - Dual output: colored console + plain log file under `logs/`
//!
//! ## Usage
//!
//! ```rust
//! use btc_daily_mailer::logger::{self, LogTag};
//!
//! logger::info(LogTag::Mail, "Email sent via Resend");
//! logger::debug(LogTag::Api, "Request details: ..."); // Only if --debug-api
//! ```
//!
//! Call `logger::init()` once at startup before any services start.

mod config;
mod core;
mod file;
mod format;
mod levels;
mod tags;

pub use config::{get_logger_config, init_from_args, set_logger_config, LoggerConfig};
pub use levels::LogLevel;
pub use tags::LogTag;

/// Initialize the logger system
///
/// Reads debug flags from the command line and opens the log file.
pub fn init() {
    config::init_from_args();
    file::init_file_logging();
}

/// Log at ERROR level (always shown)
pub fn error(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Error, message);
}

/// Log at WARNING level
pub fn warning(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Warning, message);
}

/// Log at INFO level (standard operations)
pub fn info(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Info, message);
}

/// Log at DEBUG level, only shown with --debug-<tag>
///
/// # Example
/// ```rust
/// use btc_daily_mailer::logger::{self, LogTag};
///
/// // Only shown with --debug-scheduler
/// logger::debug(LogTag::Scheduler, "Next run computed");
/// ```
pub fn debug(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Debug, message);
}

/// Log at VERBOSE level, only shown with --verbose
pub fn verbose(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Verbose, message);
}

/// Force flush pending log file writes
///
/// Call during shutdown so the tail of the log reaches disk.
pub fn flush() {
    file::flush_file_logging();
}
