//! Application error type mapping to HTTP status codes and wire bodies.
//!
//! The wire shapes are part of the client contract:
//! 400 `{error, raw?}`, 503 `{error}`, 500 `{error, details?}`, and
//! upstream provider failures propagate the provider's own status.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use atelier_types::builder::ErrorBody;
use atelier_types::error::BuildError;
use atelier_types::llm::LlmError;
use atelier_types::speech::SpeechError;

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// Request or response validation failure (400).
    Validation(String),
    /// Terminal parse failure on a retry attempt (400, carries a raw
    /// excerpt for diagnosis).
    ParseFailure { error: String, raw: String },
    /// Required credential not configured (503).
    NoCredential(String),
    /// Upstream provider failure; the provider's status is propagated
    /// when one was received.
    Provider { status: Option<u16>, message: String },
    /// Generic internal error (500).
    Internal(String),
}

impl From<BuildError> for AppError {
    fn from(e: BuildError) -> Self {
        match e {
            BuildError::Parse { raw_excerpt } => AppError::ParseFailure {
                error: "Failed to parse response as JSON".to_string(),
                raw: raw_excerpt,
            },
            BuildError::Validation(err) => AppError::Validation(err.to_string()),
            BuildError::Provider { status, message } => AppError::Provider { status, message },
            BuildError::MissingCredential => AppError::NoCredential(
                "No hosted API key configured. Please use your own API key in settings."
                    .to_string(),
            ),
        }
    }
}

impl From<LlmError> for AppError {
    fn from(e: LlmError) -> Self {
        AppError::Provider {
            status: e.status(),
            message: e.to_string(),
        }
    }
}

impl From<SpeechError> for AppError {
    fn from(e: SpeechError) -> Self {
        match e {
            SpeechError::EmptyText => AppError::Validation("No text provided".to_string()),
            SpeechError::Provider { status, message } => {
                AppError::Provider { status, message }
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::Validation(error) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    error,
                    raw: None,
                    details: None,
                },
            ),
            AppError::ParseFailure { error, raw } => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    error,
                    raw: Some(raw),
                    details: None,
                },
            ),
            AppError::NoCredential(error) => (
                StatusCode::SERVICE_UNAVAILABLE,
                ErrorBody {
                    error,
                    raw: None,
                    details: None,
                },
            ),
            AppError::Provider { status, message } => {
                let status = status
                    .and_then(|code| StatusCode::from_u16(code).ok())
                    .filter(|code| code.is_client_error() || code.is_server_error())
                    .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
                (
                    status,
                    ErrorBody {
                        error: "Upstream provider request failed".to_string(),
                        raw: None,
                        details: Some(message),
                    },
                )
            }
            AppError::Internal(details) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorBody {
                    error: "Internal server error".to_string(),
                    raw: None,
                    details: Some(details),
                },
            ),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use atelier_types::error::ValidationError;

    use super::*;

    async fn body_of(response: Response) -> ErrorBody {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn validation_maps_to_400_with_bare_error() {
        let response =
            AppError::from(BuildError::Validation(ValidationError::TooManyFiles))
                .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_of(response).await;
        assert_eq!(body.error, "Too many files (max 50)");
        assert!(body.raw.is_none());
    }

    #[tokio::test]
    async fn parse_failure_maps_to_400_with_raw_excerpt() {
        let response = AppError::from(BuildError::Parse {
            raw_excerpt: "I'm sorry, I".to_string(),
        })
        .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_of(response).await;
        assert_eq!(body.error, "Failed to parse response as JSON");
        assert_eq!(body.raw.as_deref(), Some("I'm sorry, I"));
    }

    #[tokio::test]
    async fn missing_credential_maps_to_503() {
        let response = AppError::from(BuildError::MissingCredential).into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn provider_status_is_propagated() {
        let response = AppError::Provider {
            status: Some(429),
            message: "rate limited".to_string(),
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        let body = body_of(response).await;
        assert_eq!(body.details.as_deref(), Some("rate limited"));
    }

    #[tokio::test]
    async fn provider_without_status_falls_back_to_500() {
        let response = AppError::Provider {
            status: None,
            message: "connection refused".to_string(),
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn non_error_provider_status_is_not_propagated() {
        // A 200 from a failed upstream exchange would be nonsense on the
        // error path.
        let response = AppError::Provider {
            status: Some(200),
            message: "odd".to_string(),
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
