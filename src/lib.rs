use archive::Archiver;
use axum::{
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Extension, Json, Router,
};
use static_toml::static_toml;
use std::sync::Arc;
use twilio::Client as TwilioClient;

static_toml! { pub static CONFIG = include_toml!("Config.toml"); }

pub mod archive;
pub mod error;
pub mod secrets;
pub mod voicemail;

pub use error::ArchiveError;

/// Build the webserver routes. Twilio may call either webhook with GET or POST.
pub fn router(twilio: TwilioClient, archiver: Arc<Archiver>) -> Router {
    Router::new()
        .route("/health_check", get(health_check))
        .route(
            "/answer",
            get(voicemail::answer::answer_handler).post(voicemail::answer::answer_handler),
        )
        .route(
            "/end_call",
            get(voicemail::end_call::end_call_handler)
                .post(voicemail::end_call::end_call_handler),
        )
        .fallback(not_found_handler)
        .layer(Extension(twilio))
        .layer(Extension(archiver))
}

pub async fn health_check() -> impl IntoResponse {
    StatusCode::OK
}

async fn not_found_handler() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({ "error": "Not Found" })),
    )
}
