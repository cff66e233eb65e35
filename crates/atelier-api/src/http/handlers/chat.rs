//! POST /api/chat -- stateless completion proxy for the companion chat.
//!
//! The caller owns the conversation history (see
//! `atelier_core::chat::ChatSession`); this endpoint just forwards it with
//! chat-sized defaults.

use axum::extract::State;
use axum::Json;

use atelier_types::chat::{
    ChatReply, ChatRequest, DEFAULT_CHAT_MAX_TOKENS, DEFAULT_CHAT_TEMPERATURE,
};
use atelier_types::llm::CompletionRequest;

use crate::http::error::AppError;
use crate::state::AppState;

pub async fn chat(
    State(state): State<AppState>,
    Json(body): Json<ChatRequest>,
) -> Result<Json<ChatReply>, AppError> {
    let provider = state.completion.as_ref().ok_or_else(|| {
        AppError::NoCredential(
            "No hosted API key configured. Please use your own API key.".to_string(),
        )
    })?;

    if body.messages.is_empty() {
        return Err(AppError::Validation("Missing messages".to_string()));
    }

    let request = CompletionRequest {
        model: body.model.unwrap_or_else(|| state.chat_model.clone()),
        messages: body.messages,
        system: None,
        max_tokens: body.max_tokens.unwrap_or(DEFAULT_CHAT_MAX_TOKENS),
        temperature: Some(body.temperature.unwrap_or(DEFAULT_CHAT_TEMPERATURE)),
    };

    let completion = provider.complete(&request).await?;

    Ok(Json(ChatReply {
        message: completion.content,
        usage: completion.usage,
    }))
}
