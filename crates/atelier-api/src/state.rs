//! Application state wiring the upstream clients together.
//!
//! `AppState` holds the optional completion provider and speech client;
//! "optional" because missing credentials are a 503 at the affected
//! endpoints, not a startup failure. The server itself is stateless across
//! requests -- no session data lives here.

use std::sync::Arc;

use secrecy::ExposeSecret;

use atelier_core::llm::BoxCompletionProvider;
use atelier_infra::config::ServerConfig;
use atelier_infra::llm::OpenAiCompatProvider;
use atelier_infra::speech::ElevenLabsSpeech;

/// Shared application state for the HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    pub completion: Option<Arc<BoxCompletionProvider>>,
    pub speech: Option<Arc<ElevenLabsSpeech>>,
    pub chat_model: String,
    pub builder_model: String,
    pub web_dir: String,
}

impl AppState {
    /// Wire the state from resolved configuration.
    ///
    /// OpenAI takes precedence when both completion credentials are set.
    pub fn from_config(config: &ServerConfig) -> Self {
        let completion = if let Some(key) = &config.openai_api_key {
            Some(Arc::new(BoxCompletionProvider::new(
                OpenAiCompatProvider::openai(key.expose_secret(), &config.chat_model),
            )))
        } else if let Some(key) = &config.openrouter_api_key {
            Some(Arc::new(BoxCompletionProvider::new(
                OpenAiCompatProvider::openrouter(key.expose_secret(), &config.chat_model),
            )))
        } else {
            None
        };

        let speech = config.elevenlabs_api_key.as_ref().map(|key| {
            Arc::new(ElevenLabsSpeech::new(
                secrecy::SecretString::from(key.expose_secret()),
                &config.voice_id,
            ))
        });

        Self {
            completion,
            speech,
            chat_model: config.chat_model.clone(),
            builder_model: config.builder_model.clone(),
            web_dir: config.web_dir.clone(),
        }
    }
}
