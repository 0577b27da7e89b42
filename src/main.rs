use btc_daily_mailer::{
    arguments::{is_help_requested, print_help},
    logger::{self, LogTag},
    run,
};

/// Entry point
///
/// Default mode serves the HTTP trigger and sends the daily report on
/// schedule. `--run-once` sends one report and exits non-zero on failure.
#[tokio::main]
async fn main() {
    if is_help_requested() {
        print_help();
        std::process::exit(0);
    }

    logger::init();
    logger::info(
        LogTag::System,
        &format!("🚀 BTC Daily Mailer v{} starting up...", env!("CARGO_PKG_VERSION")),
    );

    let result = run::run().await;

    if let Err(e) = result {
        logger::error(LogTag::System, &format!("{:#}", e));
        logger::flush();
        std::process::exit(1);
    }

    logger::info(LogTag::System, "Shutdown complete");
    logger::flush();
}
