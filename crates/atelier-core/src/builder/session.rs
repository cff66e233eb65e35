//! Per-exchange builder orchestration.
//!
//! One `handle` call is one exchange: compose the prompt, call the
//! completion provider, parse, validate. Parse/validate failures on a first
//! attempt become the `NeedsRetry` sentinel; the caller is expected to
//! re-invoke once with `is_retry` set, and on that attempt the same
//! failures are terminal. The retry flag is never recursive -- at most one
//! retry per user-initiated build.
//!
//! The server holds no state across exchanges; a session borrows the
//! provider and is otherwise just the model configuration.

use uuid::Uuid;

use atelier_types::builder::{BuildOutcome, BuildRequest};
use atelier_types::error::BuildError;
use atelier_types::llm::{CompletionRequest, Message};

use crate::llm::BoxCompletionProvider;

use super::{parse, prompt, validate};

/// Completion budget for code generation. Larger than chat: scaffolds are
/// long.
pub const BUILDER_MAX_TOKENS: u32 = 8192;

/// Sampling temperature for code generation.
pub const BUILDER_TEMPERATURE: f64 = 0.7;

/// How much of an unparsable completion is surfaced in terminal errors.
const RAW_EXCERPT_CHARS: usize = 500;

/// Orchestrates one builder exchange against a completion provider.
pub struct BuilderSession<'a> {
    provider: &'a BoxCompletionProvider,
    model: String,
}

impl<'a> BuilderSession<'a> {
    pub fn new(provider: &'a BoxCompletionProvider, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
        }
    }

    /// Run one exchange: provider call, parse, validate.
    ///
    /// Returns `Done` with the sanitized response, `NeedsRetry` with a
    /// diagnostic on a recoverable first-attempt failure, or an error for
    /// terminal failures (provider errors, and any failure on a retry).
    pub async fn handle(&self, request: &BuildRequest) -> Result<BuildOutcome, BuildError> {
        let exchange_id = Uuid::now_v7();
        tracing::debug!(
            %exchange_id,
            is_retry = request.is_retry,
            prompt_chars = request.prompt.len(),
            "builder exchange started"
        );

        let user_content = if request.is_retry {
            prompt::retry_prompt(&request.prompt)
        } else {
            request.prompt.clone()
        };

        let completion_request = CompletionRequest {
            model: self.model.clone(),
            messages: vec![Message::user(user_content)],
            system: Some(prompt::SYSTEM_PROMPT.to_string()),
            max_tokens: BUILDER_MAX_TOKENS,
            temperature: Some(BUILDER_TEMPERATURE),
        };

        let completion = self
            .provider
            .complete(&completion_request)
            .await
            .map_err(|e| BuildError::Provider {
                status: e.status(),
                message: e.to_string(),
            })?;

        let content = completion.content;

        let parsed = match parse::parse(&content) {
            Ok(value) => value,
            Err(_) if request.is_retry => {
                tracing::warn!(%exchange_id, "retry completion still unparsable");
                return Err(BuildError::Parse {
                    raw_excerpt: excerpt(&content),
                });
            }
            Err(_) => {
                tracing::debug!(%exchange_id, "first completion unparsable, signalling retry");
                return Ok(BuildOutcome::NeedsRetry {
                    raw_content: Some(content),
                    validation_error: None,
                });
            }
        };

        match validate::validate(&parsed) {
            Ok(response) => {
                tracing::info!(
                    %exchange_id,
                    files = response.files.len(),
                    "builder exchange done"
                );
                Ok(BuildOutcome::Done(response))
            }
            Err(e) if request.is_retry => {
                tracing::warn!(%exchange_id, error = %e, "retry completion failed validation");
                Err(BuildError::Validation(e))
            }
            Err(e) => {
                tracing::debug!(%exchange_id, error = %e, "first completion invalid, signalling retry");
                Ok(BuildOutcome::NeedsRetry {
                    raw_content: None,
                    validation_error: Some(e),
                })
            }
        }
    }
}

/// Char-safe leading excerpt of a raw completion.
fn excerpt(raw: &str) -> String {
    raw.chars().take(RAW_EXCERPT_CHARS).collect()
}
