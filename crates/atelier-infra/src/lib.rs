//! Infrastructure adapters for Atelier.
//!
//! Implements the ports defined in `atelier-core` against real services:
//! the OpenAI-compatible completion API, the ElevenLabs speech API, and the
//! Atelier server itself (for the headless client). Also owns server
//! configuration loading.

pub mod client;
pub mod config;
pub mod llm;
pub mod speech;
