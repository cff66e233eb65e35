//! The Builder response pipeline.
//!
//! Turns an untrusted free-form completion from the provider into a
//! verified, sandboxed set of named files: path sanitization, multi-strategy
//! JSON extraction, structural/budget validation, and the per-exchange
//! session orchestrator with its one-shot retry protocol.

pub mod parse;
pub mod path;
pub mod prompt;
pub mod session;
pub mod validate;

pub use session::BuilderSession;
