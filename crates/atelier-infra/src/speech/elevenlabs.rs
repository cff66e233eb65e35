//! ElevenLabs text-to-speech client.
//!
//! Sends synthesis requests to `/v1/text-to-speech/{voice_id}` and returns
//! the raw `audio/mpeg` bytes. The API key is wrapped in
//! [`secrecy::SecretString`] and is never logged or included in `Debug`
//! output.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;

use atelier_types::speech::{SpeechError, VoiceSettings};

/// Synthesis model used for all requests.
const SYNTHESIS_MODEL: &str = "eleven_multilingual_v2";

/// ElevenLabs speech synthesis client.
///
/// # API Key Security
///
/// The API key is stored as a [`SecretString`] and is only exposed when
/// constructing HTTP request headers. The struct does not derive Debug.
pub struct ElevenLabsSpeech {
    client: reqwest::Client,
    api_key: SecretString,
    base_url: String,
    voice_id: String,
}

/// Request body for the synthesis endpoint.
#[derive(Debug, Serialize)]
struct SynthesisRequest<'a> {
    text: &'a str,
    model_id: &'a str,
    voice_settings: VoiceSettings,
}

impl ElevenLabsSpeech {
    /// Create a new client for the given voice.
    pub fn new(api_key: SecretString, voice_id: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .expect("failed to create reqwest client");

        Self {
            client,
            api_key,
            base_url: "https://api.elevenlabs.io".to_string(),
            voice_id: voice_id.into(),
        }
    }

    /// Override the base URL (useful for testing or proxies).
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    /// Synthesize speech for the given text, returning MP3 bytes.
    pub async fn synthesize(&self, text: &str) -> Result<Vec<u8>, SpeechError> {
        if text.trim().is_empty() {
            return Err(SpeechError::EmptyText);
        }

        let url = format!("{}/v1/text-to-speech/{}", self.base_url, self.voice_id);
        let body = SynthesisRequest {
            text,
            model_id: SYNTHESIS_MODEL,
            voice_settings: VoiceSettings::default(),
        };

        let response = self
            .client
            .post(&url)
            .header("xi-api-key", self.api_key.expose_secret())
            .header("accept", "audio/mpeg")
            .json(&body)
            .send()
            .await
            .map_err(|e| SpeechError::Provider {
                status: e.status().map(|s| s.as_u16()),
                message: format!("HTTP request failed: {e}"),
            })?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), "speech synthesis failed");
            return Err(SpeechError::Provider {
                status: Some(status.as_u16()),
                message: detail,
            });
        }

        let bytes = response.bytes().await.map_err(|e| SpeechError::Provider {
            status: None,
            message: format!("failed to read audio body: {e}"),
        })?;
        Ok(bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn empty_text_is_rejected_before_any_request() {
        let speech = ElevenLabsSpeech::new(SecretString::from("xi-test"), "voice-1");
        let err = speech.synthesize("   ").await.unwrap_err();
        assert!(matches!(err, SpeechError::EmptyText));
    }

    #[test]
    fn synthesis_request_body_shape() {
        let body = SynthesisRequest {
            text: "hello there",
            model_id: SYNTHESIS_MODEL,
            voice_settings: VoiceSettings::default(),
        };
        let json = serde_json::to_string(&body).unwrap();
        assert!(json.contains("\"text\":\"hello there\""));
        assert!(json.contains("\"model_id\":\"eleven_multilingual_v2\""));
        assert!(json.contains("\"stability\":0.35"));
    }
}
