//! Shared domain types for Atelier.
//!
//! This crate contains the types used across the Atelier backend and client:
//! the Builder wire contract, chat and speech DTOs, LLM request/response
//! shapes, and their associated error types.
//!
//! Zero infrastructure dependencies -- only serde, serde_json, thiserror.

pub mod builder;
pub mod chat;
pub mod error;
pub mod llm;
pub mod speech;
