//! POST /api/tts -- speech synthesis proxy.
//!
//! Success streams back raw `audio/mpeg` bytes; failures use the JSON
//! error shapes.

use axum::extract::State;
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::Json;

use atelier_types::speech::SpeechRequest;

use crate::http::error::AppError;
use crate::state::AppState;

pub async fn synthesize(
    State(state): State<AppState>,
    Json(body): Json<SpeechRequest>,
) -> Result<Response, AppError> {
    let speech = state
        .speech
        .as_ref()
        .ok_or_else(|| AppError::NoCredential("No ElevenLabs API key configured".to_string()))?;

    let audio = speech.synthesize(&body.text).await?;

    Ok(([(header::CONTENT_TYPE, "audio/mpeg")], audio).into_response())
}
