use crate::webserver::{models::ErrorResponse, state::AppState};
use axum::{http::StatusCode, response::IntoResponse, Json, Router};
use std::sync::Arc;

pub mod status;
pub mod trigger;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(status::routes())
        .merge(trigger::routes())
        .fallback(not_found)
        .with_state(state)
}

async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse::new("Not found")),
    )
}
