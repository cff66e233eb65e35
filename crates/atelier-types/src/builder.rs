//! Builder domain and wire types.
//!
//! The Builder turns a natural-language prompt into a validated set of
//! generated files. The wire contract (camelCase field names) is consumed
//! by both the HTTP handlers and the workbench client, so it lives here.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A single generated (or uploaded) file: a sanitized relative path and
/// its text content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedFile {
    pub path: String,
    pub content: String,
}

impl GeneratedFile {
    pub fn new(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }
}

/// A validated builder response: a short summary plus the file set.
///
/// Invariants (enforced by the validator, never assumed): at most 50 files,
/// at most 2 MiB of total content, every path non-empty and traversal-free,
/// paths unique within the set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BuilderResponse {
    #[serde(default)]
    pub message: String,
    pub files: Vec<GeneratedFile>,
}

/// Request body for `POST /api/builder`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildRequest {
    pub prompt: String,
    #[serde(default)]
    pub is_retry: bool,
}

/// The retry sentinel returned (with HTTP 200) when a first attempt
/// produced an unusable completion. The caller is expected to resubmit
/// once with `isRetry: true`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetrySignal {
    pub needs_retry: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation_error: Option<String>,
}

/// Success body of `POST /api/builder`: either a ready response or the
/// retry sentinel. Untagged on the wire; the sentinel is distinguished by
/// its `needsRetry` field.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BuildReply {
    Retry(RetrySignal),
    Ready(BuilderResponse),
}

/// Error body shared by the builder endpoint's 4xx/5xx responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Outcome of one builder exchange, before wire mapping.
///
/// An explicit tagged union rather than presence/absence of ad hoc fields:
/// `Done` carries the validated response, `NeedsRetry` the diagnostic for
/// the one-shot retry protocol. Terminal failures are `BuildError`s.
#[derive(Debug, Clone)]
pub enum BuildOutcome {
    Done(BuilderResponse),
    NeedsRetry {
        /// Raw completion text, present when parsing failed.
        raw_content: Option<String>,
        /// Validation diagnostic, present when validation failed.
        validation_error: Option<ValidationError>,
    },
}

impl From<BuildOutcome> for BuildReply {
    fn from(outcome: BuildOutcome) -> Self {
        match outcome {
            BuildOutcome::Done(response) => BuildReply::Ready(response),
            BuildOutcome::NeedsRetry {
                raw_content,
                validation_error,
            } => BuildReply::Retry(RetrySignal {
                needs_retry: true,
                raw_content,
                validation_error: validation_error.map(|e| e.to_string()),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_request_defaults_is_retry() {
        let request: BuildRequest =
            serde_json::from_str(r#"{"prompt":"make a landing page"}"#).unwrap();
        assert!(!request.is_retry);

        let request: BuildRequest =
            serde_json::from_str(r#"{"prompt":"again","isRetry":true}"#).unwrap();
        assert!(request.is_retry);
    }

    #[test]
    fn build_reply_distinguishes_sentinel_from_response() {
        let reply: BuildReply =
            serde_json::from_str(r#"{"needsRetry":true,"rawContent":"oops"}"#).unwrap();
        assert!(matches!(reply, BuildReply::Retry(ref s) if s.needs_retry));

        let reply: BuildReply = serde_json::from_str(
            r#"{"message":"done","files":[{"path":"a.txt","content":"x"}]}"#,
        )
        .unwrap();
        match reply {
            BuildReply::Ready(response) => {
                assert_eq!(response.files.len(), 1);
                assert_eq!(response.files[0].path, "a.txt");
            }
            BuildReply::Retry(_) => panic!("expected ready reply"),
        }
    }

    #[test]
    fn retry_signal_wire_names_are_camel_case() {
        let reply = BuildReply::from(BuildOutcome::NeedsRetry {
            raw_content: Some("not json".to_string()),
            validation_error: None,
        });
        let json = serde_json::to_string(&reply).unwrap();
        assert!(json.contains("\"needsRetry\":true"));
        assert!(json.contains("\"rawContent\""));
        assert!(!json.contains("validationError"));
    }

    #[test]
    fn validation_outcome_carries_wire_message() {
        let reply = BuildReply::from(BuildOutcome::NeedsRetry {
            raw_content: None,
            validation_error: Some(ValidationError::TooManyFiles),
        });
        let json = serde_json::to_string(&reply).unwrap();
        assert!(json.contains("Too many files (max 50)"));
    }
}
