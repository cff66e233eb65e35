//! Port to the builder endpoint.
//!
//! The workbench depends on the wire contract, not on any HTTP machinery;
//! the real client lives in atelier-infra, and tests script replies
//! directly.

use std::future::Future;

use thiserror::Error;

use atelier_types::builder::{BuildReply, BuildRequest};

/// A terminal failure of one builder exchange.
#[derive(Debug, Clone, Error)]
pub enum RemoteError {
    /// The server answered with an error body; `message` is surfaced
    /// verbatim in the transcript.
    #[error("{message}")]
    Server { status: u16, message: String },

    /// The exchange never completed (connection, timeout, malformed body).
    #[error("{0}")]
    Transport(String),
}

/// One submission to the builder endpoint.
///
/// Uses RPITIT consistent with the other ports in this project.
pub trait BuilderRemote {
    fn submit(
        &self,
        request: &BuildRequest,
    ) -> impl Future<Output = Result<BuildReply, RemoteError>> + Send;
}
