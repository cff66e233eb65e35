//! POST /api/builder -- one builder exchange.
//!
//! Runs the session pipeline (provider call, parse, validate) and maps the
//! tagged outcome onto the wire: `Done` and `NeedsRetry` are both 200
//! bodies; terminal failures become the JSON error shapes via `AppError`.

use axum::extract::State;
use axum::Json;

use atelier_core::builder::BuilderSession;
use atelier_types::builder::{BuildReply, BuildRequest};

use crate::http::error::AppError;
use crate::state::AppState;

pub async fn build(
    State(state): State<AppState>,
    Json(body): Json<BuildRequest>,
) -> Result<Json<BuildReply>, AppError> {
    if body.prompt.trim().is_empty() {
        return Err(AppError::Validation("Missing or invalid prompt".to_string()));
    }

    let provider = state.completion.as_ref().ok_or_else(|| {
        AppError::NoCredential(
            "No hosted API key configured. Please use your own API key in settings."
                .to_string(),
        )
    })?;

    tracing::info!(prompt_chars = body.prompt.len(), is_retry = body.is_retry, "builder request");

    let session = BuilderSession::new(provider, state.builder_model.clone());
    let outcome = session.handle(&body).await?;

    Ok(Json(outcome.into()))
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    use axum::http::StatusCode;
    use axum::response::IntoResponse;

    use atelier_core::llm::{BoxCompletionProvider, CompletionProvider};
    use atelier_types::llm::{
        CompletionRequest, CompletionResponse, LlmError, StopReason, Usage,
    };

    use super::*;

    struct ScriptedProvider {
        replies: Mutex<VecDeque<Result<String, LlmError>>>,
    }

    impl CompletionProvider for ScriptedProvider {
        fn name(&self) -> &str {
            "scripted"
        }

        async fn complete(
            &self,
            request: &CompletionRequest,
        ) -> Result<CompletionResponse, LlmError> {
            let content = self
                .replies
                .lock()
                .unwrap()
                .pop_front()
                .expect("script exhausted")?;
            Ok(CompletionResponse {
                id: "cmpl_test".to_string(),
                content,
                model: request.model.clone(),
                stop_reason: StopReason::EndTurn,
                usage: Usage::default(),
            })
        }
    }

    fn state_with_script(replies: Vec<Result<String, LlmError>>) -> AppState {
        AppState {
            completion: Some(Arc::new(BoxCompletionProvider::new(ScriptedProvider {
                replies: Mutex::new(replies.into()),
            }))),
            speech: None,
            chat_model: "gpt-4o-mini".to_string(),
            builder_model: "gpt-4o".to_string(),
            web_dir: "web".to_string(),
        }
    }

    fn state_without_provider() -> AppState {
        AppState {
            completion: None,
            speech: None,
            chat_model: "gpt-4o-mini".to_string(),
            builder_model: "gpt-4o".to_string(),
            web_dir: "web".to_string(),
        }
    }

    fn request(prompt: &str, is_retry: bool) -> BuildRequest {
        BuildRequest {
            prompt: prompt.to_string(),
            is_retry,
        }
    }

    #[tokio::test]
    async fn valid_completion_returns_ready_reply() {
        let state = state_with_script(vec![Ok(
            r#"{"message":"ok","files":[{"path":"a.txt","content":"x"}]}"#.to_string(),
        )]);

        let Json(reply) = build(State(state), Json(request("make it", false)))
            .await
            .unwrap();

        match reply {
            BuildReply::Ready(response) => assert_eq!(response.files.len(), 1),
            BuildReply::Retry(_) => panic!("expected ready reply"),
        }
    }

    #[tokio::test]
    async fn first_attempt_prose_returns_retry_sentinel_with_200() {
        let state = state_with_script(vec![Ok("no json here".to_string())]);

        let Json(reply) = build(State(state), Json(request("make it", false)))
            .await
            .unwrap();

        match reply {
            BuildReply::Retry(signal) => {
                assert!(signal.needs_retry);
                assert_eq!(signal.raw_content.as_deref(), Some("no json here"));
            }
            BuildReply::Ready(_) => panic!("expected retry sentinel"),
        }
    }

    #[tokio::test]
    async fn retry_attempt_prose_is_a_400() {
        let state = state_with_script(vec![Ok("still no json".to_string())]);

        let err = build(State(state), Json(request("make it", true)))
            .await
            .unwrap_err();

        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn empty_prompt_is_a_400() {
        let state = state_with_script(vec![]);

        let err = build(State(state), Json(request("   ", false)))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(ref msg) if msg == "Missing or invalid prompt"));
    }

    #[tokio::test]
    async fn missing_credential_is_a_503() {
        let err = build(State(state_without_provider()), Json(request("make it", false)))
            .await
            .unwrap_err();

        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn provider_failure_propagates_status() {
        let state = state_with_script(vec![Err(LlmError::RateLimited)]);

        let err = build(State(state), Json(request("make it", false)))
            .await
            .unwrap_err();

        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    }
}
