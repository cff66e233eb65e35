//! The client-side builder workbench.
//!
//! Mirrors the server's wire contract only: an in-memory file set, upload
//! context, selection, a status machine, and zip export. The transparent
//! one-shot retry resubmission lives here, driven by the wire sentinel.

pub mod export;
pub mod remote;
pub mod state;
pub mod tree;

pub use remote::{BuilderRemote, RemoteError};
pub use state::{Notice, NoticeKind, Workbench, WorkbenchStatus};
