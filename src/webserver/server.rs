/// Axum webserver implementation
///
/// Binding is separate from serving so callers can fail fast on a busy
/// port before spawning the serve task.
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::Notify;
use tower_http::compression::CompressionLayer;

use crate::{
    logger::{self, LogTag},
    webserver::{routes, state::AppState},
};

/// Bind the listener, with readable messages for the common failures
pub async fn bind_listener(host: &str, port: u16) -> Result<TcpListener, String> {
    let addr: SocketAddr = format!("{}:{}", host, port)
        .parse()
        .map_err(|e| format!("Invalid bind address {}:{}: {}", host, port, e))?;

    TcpListener::bind(&addr).await.map_err(|e| match e.kind() {
        std::io::ErrorKind::AddrInUse => format!(
            "Failed to bind to {}: Address already in use\n\
             \n\
             Another process (possibly another btc-daily-mailer) is using port {}.\n\
             Stop it or start with --port <n>.",
            addr, port
        ),
        std::io::ErrorKind::PermissionDenied => format!(
            "Failed to bind to {}: Permission denied\n\
             \n\
             Port {} requires elevated privileges on this system.\n\
             Consider using a port above 1024 or running with appropriate permissions.",
            addr, port
        ),
        _ => format!("Failed to bind to {}: {}", addr, e),
    })
}

/// Serve until `shutdown` is notified
pub async fn serve(listener: TcpListener, state: Arc<AppState>, shutdown: Arc<Notify>) -> Result<(), String> {
    if let Ok(addr) = listener.local_addr() {
        logger::info(
            LogTag::Webserver,
            &format!("Webserver listening on http://{}", addr),
        );
    }

    let shutdown_signal = async move {
        shutdown.notified().await;
        logger::debug(
            LogTag::Webserver,
            "Received shutdown signal, stopping webserver...",
        );
    };

    axum::serve(listener, build_app(state))
        .with_graceful_shutdown(shutdown_signal)
        .await
        .map_err(|e| format!("Server error: {}", e))?;

    logger::debug(LogTag::Webserver, "Webserver stopped gracefully");
    Ok(())
}

/// Build the Axum application with all routes and middleware
pub fn build_app(state: Arc<AppState>) -> Router {
    routes::create_router(state).layer(CompressionLayer::new())
}
