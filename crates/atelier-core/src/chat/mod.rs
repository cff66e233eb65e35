//! Chat session ownership.

pub mod session;

pub use session::ChatSession;
