//! Speech synthesis clients.

pub mod elevenlabs;

pub use elevenlabs::ElevenLabsSpeech;
