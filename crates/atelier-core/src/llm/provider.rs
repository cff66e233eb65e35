//! CompletionProvider trait definition.
//!
//! This is the abstraction over external completion services. Uses RPITIT
//! (native async fn in traits, Rust 2024 edition) for `complete`.
//! Implementations live in atelier-infra (e.g., `OpenAiCompatProvider`).

use atelier_types::llm::{CompletionRequest, CompletionResponse, LlmError};

/// Trait for completion provider backends (OpenAI, OpenRouter, etc.).
pub trait CompletionProvider: Send + Sync {
    /// Human-readable provider name (e.g., "openai", "openrouter").
    fn name(&self) -> &str;

    /// Send a completion request and receive the full response.
    fn complete(
        &self,
        request: &CompletionRequest,
    ) -> impl std::future::Future<Output = Result<CompletionResponse, LlmError>> + Send;
}
