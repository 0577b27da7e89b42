use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use std::sync::Arc;

use crate::{
    logger::{self, LogTag},
    webserver::{
        models::{iso_timestamp, ErrorResponse, TriggerSuccess},
        state::AppState,
    },
};

/// Create manual trigger routes
pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/run-once", get(run_once))
}

/// GET /run-once
///
/// Runs the full pipeline before answering. Every error kind maps to 500
/// with the error's display text.
async fn run_once(State(state): State<Arc<AppState>>) -> Response {
    logger::info(LogTag::Webserver, "Manual trigger activated");

    match state.pipeline.run().await {
        Ok(_) => Json(TriggerSuccess {
            success: true,
            message: "Email sent successfully".to_string(),
            timestamp: iso_timestamp(),
        })
        .into_response(),
        Err(e) => {
            logger::error(
                LogTag::Webserver,
                &format!("Manual trigger failed ({}): {}", e.kind(), e),
            );
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new(e.to_string())),
            )
                .into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::pipeline::tests::{taipei, FakeSource, RecordingDispatcher};
    use crate::pipeline::ReportPipeline;
    use crate::webserver::routes::create_router;
    use crate::webserver::routes::tests::{get_json, test_state};
    use axum::http::StatusCode;

    #[tokio::test]
    async fn test_run_once_success() {
        let dispatcher = RecordingDispatcher::ok();
        let state = test_state(ReportPipeline::new(FakeSource::ok(), dispatcher.clone(), taipei()));

        let (status, body) = get_json(create_router(state), "/run-once").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["message"], "Email sent successfully");
        assert!(body["timestamp"].is_string());
        assert_eq!(dispatcher.count().await, 1);
    }

    #[tokio::test]
    async fn test_run_once_fetch_failure_is_500() {
        let state = test_state(ReportPipeline::new(
            FakeSource::failing(),
            RecordingDispatcher::ok(),
            taipei(),
        ));

        let (status, body) = get_json(create_router(state), "/run-once").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["success"], false);
        assert!(body["error"].as_str().unwrap().contains("rate limited"));
    }

    #[tokio::test]
    async fn test_run_once_delivery_failure_is_500() {
        let state = test_state(ReportPipeline::new(
            FakeSource::ok(),
            RecordingDispatcher::failing(),
            taipei(),
        ));

        let (status, body) = get_json(create_router(state), "/run-once").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body["error"].as_str().unwrap().contains("upstream mail outage"));
    }

    #[tokio::test]
    async fn test_concurrent_triggers_deliver_twice() {
        let dispatcher = RecordingDispatcher::ok();
        let state = test_state(ReportPipeline::new(FakeSource::ok(), dispatcher.clone(), taipei()));
        let router = create_router(state);

        let (first, second) = tokio::join!(
            get_json(router.clone(), "/run-once"),
            get_json(router, "/run-once")
        );

        assert_eq!(first.0, StatusCode::OK);
        assert_eq!(second.0, StatusCode::OK);
        assert_eq!(dispatcher.count().await, 2);
    }
}
