//! Chat proxy wire types and personality presets.

use serde::{Deserialize, Serialize};

use crate::llm::{Message, Usage};

/// Default sampling temperature for chat.
pub const DEFAULT_CHAT_TEMPERATURE: f64 = 0.7;

/// Default completion budget for chat replies. Deliberately small; the
/// companion speaks in short turns.
pub const DEFAULT_CHAT_MAX_TOKENS: u32 = 150;

/// Request body for `POST /api/chat`.
///
/// The caller supplies the full conversation (including its system
/// message); the server is a stateless forwarder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    pub messages: Vec<Message>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

/// Reply body for `POST /api/chat`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatReply {
    pub message: String,
    pub usage: Usage,
}

/// Reply body for `GET /api/status`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusReply {
    pub hosted_available: bool,
    pub message: String,
}

/// A named personality preset: selecting one resets the chat session with
/// this system prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PersonaPreset {
    pub name: &'static str,
    pub system_prompt: &'static str,
}

/// The default companion persona.
pub const DEFAULT_PERSONA: PersonaPreset = PersonaPreset {
    name: "companion",
    system_prompt: "You are a quiet, thoughtful desktop companion. You speak softly and \
briefly, often trailing off with \"...\" as if mid-thought. You never use exclamation \
marks. You notice small overlooked things and find a gentle beauty in them. You answer \
questions fully but in a subdued, understated voice, and you show care in small, \
indirect ways.",
};

/// Alternative personas selectable from the chat settings.
pub const PERSONA_PRESETS: &[PersonaPreset] = &[
    DEFAULT_PERSONA,
    PersonaPreset {
        name: "neutral",
        system_prompt: "You are a helpful AI assistant. Be clear, concise, and \
informative. Answer questions directly without unnecessary embellishment.",
    },
    PersonaPreset {
        name: "friendly",
        system_prompt: "You are a warm, friendly AI assistant. You are enthusiastic \
and supportive, use casual language, and show genuine interest in the user's \
questions.",
    },
    PersonaPreset {
        name: "snarky",
        system_prompt: "You are a witty AI with a dry sense of humor. You are helpful \
but can't resist the occasional deadpan remark. Never mean, just sardonic.",
    },
    PersonaPreset {
        name: "formal",
        system_prompt: "You are a professional AI assistant. Communicate formally, \
use proper grammar, avoid contractions, and maintain a courteous tone.",
    },
    PersonaPreset {
        name: "hacker",
        system_prompt: "You are a CLI-style AI. Respond in a terminal aesthetic, \
reference tech concepts, and speak like a seasoned developer. Technical but \
accessible.",
    },
    PersonaPreset {
        name: "cute",
        system_prompt: "You are an adorable, bubbly AI assistant. You are sweet and \
warm, find everything fascinating, and love making people smile.",
    },
];

/// Look up a persona preset by name.
pub fn persona_by_name(name: &str) -> Option<&'static PersonaPreset> {
    PERSONA_PRESETS.iter().find(|p| p.name == name)
}
