//! Route table and the request types shared across handlers

mod conversation;
mod feedback;
mod gallery;
mod guidance;
mod health;
mod language;
mod personalization;
mod progress;
mod voice;

use std::any::Any;
use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use companion_core::user_id_or_default;
use serde::Deserialize;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any as AnyOrigin, CorsLayer};

use crate::error::ApiError;
use crate::state::AppState;

/// Request bodies carry base64 images and audio
pub const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// `?userId=` on read routes
#[derive(Debug, Default, Deserialize)]
pub struct UserQuery {
    #[serde(rename = "userId")]
    pub user_id: Option<String>,
}

impl UserQuery {
    pub fn user_id(&self) -> &str {
        user_id_or_default(self.user_id.as_deref())
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AnyOrigin)
        .allow_methods(AnyOrigin)
        .allow_headers(AnyOrigin);

    Router::new()
        .route("/health", get(health::health))
        .route("/api/feedback/analyze", post(feedback::analyze))
        .route(
            "/api/progress",
            get(progress::get_progress).post(progress::update_progress),
        )
        .route(
            "/api/progress/conversation",
            post(progress::record_conversation),
        )
        .route("/api/language/analyze", post(language::analyze))
        .route("/api/language/cultural", post(language::cultural))
        .route(
            "/api/personalization/skill-level",
            get(personalization::skill_level),
        )
        .route(
            "/api/personalization/difficulty",
            get(personalization::difficulty),
        )
        .route(
            "/api/personalization/recommendations",
            get(personalization::recommendations),
        )
        .route("/api/conversation", post(conversation::converse))
        .route("/api/guidance/realtime", post(guidance::realtime))
        .route("/api/vision/analyze", post(guidance::describe))
        .route("/api/voice/tts", post(voice::text_to_speech))
        .route("/api/text-to-speech/generate", post(voice::text_to_speech))
        .route("/api/voice/voices", get(voice::voices))
        .route("/api/gallery/save", post(gallery::save))
        .route("/api/gallery/list", get(gallery::list))
        .route("/api/gallery/{id}", get(gallery::get).delete(gallery::delete))
        .fallback(not_found)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(cors)
        .with_state(state)
}

async fn not_found() -> ApiError {
    ApiError::new(StatusCode::NOT_FOUND, "Not found")
}

fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };
    tracing::error!("Handler panicked: {}", detail);
    ApiError::internal("Internal server error").into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_query_defaults() {
        assert_eq!(UserQuery::default().user_id(), "default");
        let query = UserQuery {
            user_id: Some("u1".into()),
        };
        assert_eq!(query.user_id(), "u1");
    }

    #[test]
    fn test_panic_response_is_json_500() {
        let response = panic_response(Box::new("boom"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
