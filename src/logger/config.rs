/// Logger configuration derived from command-line flags
use super::levels::LogLevel;
use super::tags::LogTag;
use once_cell::sync::Lazy;
use std::collections::HashSet;
use std::sync::RwLock;

/// Runtime logger settings
#[derive(Debug, Clone)]
pub struct LoggerConfig {
    /// Minimum level threshold (messages above it are dropped)
    pub min_level: LogLevel,
    /// Tags with --debug-<tag> enabled
    pub debug_tags: HashSet<String>,
    /// Tags with --verbose-<tag> enabled
    pub verbose_tags: HashSet<String>,
    /// Write to the log file in addition to the console
    pub file_logging_enabled: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            min_level: LogLevel::Info,
            debug_tags: HashSet::new(),
            verbose_tags: HashSet::new(),
            file_logging_enabled: true,
        }
    }
}

impl LoggerConfig {
    /// Build a logger configuration from raw command-line arguments
    pub fn from_args(args: &[String]) -> Self {
        let mut config = LoggerConfig::default();

        for (i, arg) in args.iter().enumerate() {
            if arg == "--log-level" {
                if let Some(level) = args.get(i + 1).and_then(|v| LogLevel::parse(v)) {
                    config.min_level = level;
                }
            } else if arg == "--verbose" {
                config.min_level = LogLevel::Verbose;
            } else if arg == "--quiet" {
                config.min_level = LogLevel::Warning;
            } else if arg == "--no-log-file" {
                config.file_logging_enabled = false;
            } else if arg == "--debug-all" {
                for tag in LogTag::all() {
                    config.debug_tags.insert(tag.to_debug_key());
                }
            } else if let Some(key) = arg.strip_prefix("--debug-") {
                config.debug_tags.insert(key.to_lowercase());
            } else if let Some(key) = arg.strip_prefix("--verbose-") {
                config.verbose_tags.insert(key.to_lowercase());
            }
        }

        // Debug flags are useless if the threshold hides debug output
        if !config.debug_tags.is_empty() && config.min_level < LogLevel::Debug {
            config.min_level = LogLevel::Debug;
        }

        config
    }
}

static LOGGER_CONFIG: Lazy<RwLock<LoggerConfig>> =
    Lazy::new(|| RwLock::new(LoggerConfig::default()));

/// Snapshot of the current logger configuration
pub fn get_logger_config() -> LoggerConfig {
    match LOGGER_CONFIG.read() {
        Ok(config) => config.clone(),
        Err(poisoned) => poisoned.into_inner().clone(),
    }
}

/// Replace the logger configuration
pub fn set_logger_config(config: LoggerConfig) {
    match LOGGER_CONFIG.write() {
        Ok(mut current) => *current = config,
        Err(poisoned) => *poisoned.into_inner() = config,
    }
}

/// Configure the logger from the process arguments
pub fn init_from_args() {
    let args = crate::arguments::get_cmd_args();
    set_logger_config(LoggerConfig::from_args(&args));
}

pub(super) fn is_debug_enabled_for_tag(tag: &LogTag) -> bool {
    get_logger_config().debug_tags.contains(&tag.to_debug_key())
}

pub(super) fn is_verbose_enabled_for_tag(tag: &LogTag) -> bool {
    get_logger_config()
        .verbose_tags
        .contains(&tag.to_debug_key())
}
