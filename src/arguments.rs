/// Centralized argument handling for the mailer
///
/// Stores the process arguments once and exposes flag checks used by
/// `main`, the logger and the config loader.
use once_cell::sync::Lazy;
use std::env;
use std::sync::Mutex;

/// Global command-line arguments storage
pub static CMD_ARGS: Lazy<Mutex<Vec<String>>> = Lazy::new(|| Mutex::new(env::args().collect()));

/// Sets the global command-line arguments
/// Used by tests to override the default env::args() collection
pub fn set_cmd_args(args: Vec<String>) {
    if let Ok(mut cmd_args) = CMD_ARGS.lock() {
        *cmd_args = args;
    }
}

/// Gets a copy of the current command-line arguments
pub fn get_cmd_args() -> Vec<String> {
    match CMD_ARGS.lock() {
        Ok(args) => args.clone(),
        Err(_) => env::args().collect(),
    }
}

/// Checks if a specific argument is present in the command line
pub fn has_arg(arg: &str) -> bool {
    has_arg_in(&get_cmd_args(), arg)
}

/// Gets the value of a command-line argument that follows a flag
pub fn get_arg_value(flag: &str) -> Option<String> {
    arg_value_in(&get_cmd_args(), flag)
}

fn has_arg_in(args: &[String], arg: &str) -> bool {
    args.iter().any(|a| a == arg)
}

fn arg_value_in(args: &[String], flag: &str) -> Option<String> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .filter(|value| !value.starts_with("--"))
        .cloned()
}

// =============================================================================
// MODE FLAGS
// =============================================================================

/// Run the pipeline once and exit instead of serving
pub fn is_run_once_enabled() -> bool {
    has_arg("--run-once")
}

/// Help requested
pub fn is_help_requested() -> bool {
    has_arg("--help") || has_arg("-h")
}

/// Config file path override (--config <path>)
pub fn get_config_path_override() -> Option<String> {
    get_arg_value("--config")
}

/// Webserver port override (--port <n>)
pub fn get_port_override() -> Option<u16> {
    get_arg_value("--port").and_then(|p| p.parse().ok())
}

/// Validate the --port value when present
pub fn validate_port_argument() -> Result<(), String> {
    match get_arg_value("--port") {
        Some(raw) => raw
            .parse::<u16>()
            .map(|_| ())
            .map_err(|_| format!("Invalid --port value '{}': expected 0-65535", raw)),
        None => Ok(()),
    }
}

/// Displays the help menu with all available flags
pub fn print_help() {
    println!("BTC Daily Mailer - daily Bitcoin market summary by email");
    println!();
    println!("USAGE:");
    println!("    btc-daily-mailer [FLAGS]");
    println!();
    println!("CORE FLAGS:");
    println!("    --run-once                Build and send one report, then exit");
    println!("    --config <path>           Config file (default: data/config.toml)");
    println!("    --port <n>                Override webserver port");
    println!("    --help, -h                Show this help message");
    println!();
    println!("LOGGING FLAGS:");
    println!("    --verbose                 Show all log output");
    println!("    --quiet                   Only warnings and errors");
    println!("    --log-level <level>       error|warning|info|debug|verbose");
    println!("    --no-log-file             Do not write logs/ files");
    println!("    --debug-all               Debug output for every module");
    println!("    --debug-api               Upstream API calls");
    println!("    --debug-config            Configuration loading");
    println!("    --debug-mail              Mail transports");
    println!("    --debug-report            Report formatting");
    println!("    --debug-scheduler         Daily scheduler");
    println!("    --debug-webserver         HTTP endpoints");
    println!();
    println!("ENVIRONMENT:");
    println!("    PORT, TZ, MAIL_TO, MAIL_PROVIDER (gmail|resend), MAIL_FROM,");
    println!("    GMAIL_USER, GMAIL_APP_PASSWORD, RESEND_API_KEY");
    println!();
    println!("EXAMPLES:");
    println!("    btc-daily-mailer                            # Serve and send daily at 09:00");
    println!("    btc-daily-mailer --run-once --debug-mail    # Send one report now");
}
