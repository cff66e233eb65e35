//! Per-window chat session.
//!
//! Each chat window owns one `ChatSession`; the history is a value passed
//! explicitly to whatever sends it, never a process-wide singleton. The
//! session keeps the conversation bounded: when the history exceeds the
//! cap, the system message is retained and only the most recent turns
//! survive.

use atelier_types::llm::{Message, MessageRole};

/// History cap, counting the system message.
const MAX_HISTORY: usize = 20;

/// How many trailing messages survive a truncation (plus the system
/// message).
const KEEP_RECENT: usize = 18;

/// Conversation state for one chat window.
#[derive(Debug, Clone)]
pub struct ChatSession {
    history: Vec<Message>,
}

impl ChatSession {
    /// Start a session with the given system prompt.
    pub fn new(system_prompt: impl Into<String>) -> Self {
        Self {
            history: vec![Message::system(system_prompt)],
        }
    }

    /// The full message history, system message first.
    pub fn messages(&self) -> &[Message] {
        &self.history
    }

    /// Record a user message.
    pub fn push_user(&mut self, content: impl Into<String>) {
        self.history.push(Message::user(content));
        self.truncate();
    }

    /// Record an assistant reply.
    pub fn push_assistant(&mut self, content: impl Into<String>) {
        self.history.push(Message::assistant(content));
        self.truncate();
    }

    /// Replace the persona: drops the conversation and starts over with a
    /// new system prompt.
    pub fn set_persona(&mut self, system_prompt: impl Into<String>) {
        self.history = vec![Message::system(system_prompt)];
    }

    /// Drop the conversation, keeping the current system prompt.
    pub fn clear(&mut self) {
        self.history.truncate(1);
    }

    fn truncate(&mut self) {
        if self.history.len() > MAX_HISTORY {
            let tail_start = self.history.len() - KEEP_RECENT;
            let mut kept = Vec::with_capacity(KEEP_RECENT + 1);
            kept.push(self.history[0].clone());
            kept.extend_from_slice(&self.history[tail_start..]);
            self.history = kept;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_with_the_system_message() {
        let session = ChatSession::new("be quiet and kind");
        assert_eq!(session.messages().len(), 1);
        assert_eq!(session.messages()[0].role, MessageRole::System);
    }

    #[test]
    fn records_turns_in_order() {
        let mut session = ChatSession::new("sys");
        session.push_user("hello");
        session.push_assistant("...hi");
        let messages = session.messages();
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[1].role, MessageRole::User);
        assert_eq!(messages[2].content, "...hi");
    }

    #[test]
    fn truncation_keeps_system_plus_recent_tail() {
        let mut session = ChatSession::new("sys");
        for i in 0..30 {
            session.push_user(format!("u{i}"));
            session.push_assistant(format!("a{i}"));
        }

        let messages = session.messages();
        assert_eq!(messages.len(), 1 + KEEP_RECENT);
        assert_eq!(messages[0].role, MessageRole::System);
        assert_eq!(messages[0].content, "sys");
        // The tail is the most recent exchange.
        assert_eq!(messages.last().unwrap().content, "a29");
    }

    #[test]
    fn set_persona_resets_the_conversation() {
        let mut session = ChatSession::new("old persona");
        session.push_user("hello");
        session.set_persona("new persona");
        assert_eq!(session.messages().len(), 1);
        assert_eq!(session.messages()[0].content, "new persona");
    }

    #[test]
    fn clear_keeps_the_persona() {
        let mut session = ChatSession::new("sys");
        session.push_user("hello");
        session.push_assistant("hi");
        session.clear();
        assert_eq!(session.messages().len(), 1);
        assert_eq!(session.messages()[0].content, "sys");
    }
}
