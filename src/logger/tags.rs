/// Log tags identify the subsystem a message comes from
///
/// Each tag maps to a `--debug-<key>` command-line flag.

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LogTag {
    System,
    Config,
    Api,
    Report,
    Mail,
    Scheduler,
    Webserver,
    Other(String),
}

impl LogTag {
    /// Key used in --debug-<key> / --verbose-<key> flags
    pub fn to_debug_key(&self) -> String {
        match self {
            LogTag::System => "system".to_string(),
            LogTag::Config => "config".to_string(),
            LogTag::Api => "api".to_string(),
            LogTag::Report => "report".to_string(),
            LogTag::Mail => "mail".to_string(),
            LogTag::Scheduler => "scheduler".to_string(),
            LogTag::Webserver => "webserver".to_string(),
            LogTag::Other(name) => name.to_lowercase(),
        }
    }

    /// Uppercase label written to console and file
    pub fn to_plain_string(&self) -> String {
        match self {
            LogTag::Other(name) => name.to_uppercase(),
            other => other.to_debug_key().to_uppercase(),
        }
    }

    /// All known tags, used to expand `--debug-all`
    pub fn all() -> Vec<LogTag> {
        vec![
            LogTag::System,
            LogTag::Config,
            LogTag::Api,
            LogTag::Report,
            LogTag::Mail,
            LogTag::Scheduler,
            LogTag::Webserver,
        ]
    }
}

impl std::fmt::Display for LogTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_plain_string())
    }
}
