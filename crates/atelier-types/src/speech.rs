//! Speech synthesis wire types.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Request body for `POST /api/tts`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeechRequest {
    pub text: String,
}

/// Voice tuning parameters sent to the synthesis provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoiceSettings {
    pub stability: f64,
    pub similarity_boost: f64,
    pub style: f64,
    pub use_speaker_boost: bool,
}

impl Default for VoiceSettings {
    fn default() -> Self {
        Self {
            stability: 0.35,
            similarity_boost: 0.85,
            style: 0.6,
            use_speaker_boost: true,
        }
    }
}

/// Errors from speech synthesis operations.
#[derive(Debug, Error)]
pub enum SpeechError {
    #[error("no text provided")]
    EmptyText,

    #[error("speech synthesis failed: {message}")]
    Provider {
        /// HTTP status from the provider, when one was received.
        status: Option<u16>,
        message: String,
    },
}
