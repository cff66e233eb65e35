//! HTTP client for a running Atelier server.
//!
//! Implements the workbench's `BuilderRemote` port over `reqwest`, and a
//! small status query for the CLI.

use std::time::Duration;

use atelier_core::workbench::{BuilderRemote, RemoteError};
use atelier_types::builder::{BuildReply, BuildRequest, ErrorBody};
use atelier_types::chat::{ChatReply, ChatRequest, StatusReply};

/// Builder endpoint client for one server.
pub struct HttpBuilderRemote {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpBuilderRemote {
    /// Create a client for the server at `base_url`
    /// (e.g. `http://127.0.0.1:3001`).
    ///
    /// No request timeout is set: builder completions are slow and the
    /// exchange is bounded only by the provider's own limits.
    pub fn new(base_url: &str) -> Self {
        let client = reqwest::Client::builder()
            .build()
            .expect("failed to create reqwest client");

        Self {
            client,
            endpoint: format!("{}/api/builder", base_url.trim_end_matches('/')),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl BuilderRemote for HttpBuilderRemote {
    async fn submit(&self, request: &BuildRequest) -> Result<BuildReply, RemoteError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| RemoteError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| RemoteError::Transport(e.to_string()))?;

        if !status.is_success() {
            // Prefer the server's own error message; fall back to the
            // status line for non-JSON bodies.
            let message = serde_json::from_str::<ErrorBody>(&body)
                .map(|b| b.error)
                .unwrap_or_else(|_| format!("server error ({})", status.as_u16()));
            return Err(RemoteError::Server {
                status: status.as_u16(),
                message,
            });
        }

        if body.is_empty() {
            return Err(RemoteError::Transport(
                "empty response from server".to_string(),
            ));
        }

        serde_json::from_str::<BuildReply>(&body)
            .map_err(|e| RemoteError::Transport(format!("invalid response body: {e}")))
    }
}

/// Send one chat turn through `POST /api/chat`.
pub async fn send_chat(base_url: &str, request: &ChatRequest) -> Result<ChatReply, RemoteError> {
    let url = format!("{}/api/chat", base_url.trim_end_matches('/'));
    let client = reqwest::Client::builder()
        .build()
        .expect("failed to create reqwest client");

    let response = client
        .post(&url)
        .json(request)
        .send()
        .await
        .map_err(|e| RemoteError::Transport(e.to_string()))?;

    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| RemoteError::Transport(e.to_string()))?;

    if !status.is_success() {
        let message = serde_json::from_str::<ErrorBody>(&body)
            .map(|b| b.error)
            .unwrap_or_else(|_| format!("server error ({})", status.as_u16()));
        return Err(RemoteError::Server {
            status: status.as_u16(),
            message,
        });
    }

    serde_json::from_str::<ChatReply>(&body)
        .map_err(|e| RemoteError::Transport(format!("invalid chat body: {e}")))
}

/// Query `GET /api/status` on a server.
pub async fn fetch_status(base_url: &str) -> Result<StatusReply, RemoteError> {
    let url = format!("{}/api/status", base_url.trim_end_matches('/'));
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(10))
        .build()
        .expect("failed to create reqwest client");

    let response = client
        .get(&url)
        .send()
        .await
        .map_err(|e| RemoteError::Transport(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(RemoteError::Server {
            status: status.as_u16(),
            message: format!("status endpoint returned {}", status.as_u16()),
        });
    }

    response
        .json::<StatusReply>()
        .await
        .map_err(|e| RemoteError::Transport(format!("invalid status body: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_cleanly() {
        let remote = HttpBuilderRemote::new("http://localhost:3001/");
        assert_eq!(remote.endpoint(), "http://localhost:3001/api/builder");

        let remote = HttpBuilderRemote::new("http://localhost:3001");
        assert_eq!(remote.endpoint(), "http://localhost:3001/api/builder");
    }
}
