//! `atelier chat` -- a one-shot exchange with the companion.
//!
//! Owns a per-invocation `ChatSession` (persona system prompt plus the
//! turn) and sends it through the server's chat proxy.

use anyhow::{bail, Context};
use console::style;

use atelier_core::chat::ChatSession;
use atelier_infra::client::send_chat;
use atelier_types::chat::{persona_by_name, ChatRequest, DEFAULT_PERSONA};

pub async fn run(
    server: &str,
    message: String,
    persona: Option<String>,
    json: bool,
) -> anyhow::Result<()> {
    if message.trim().is_empty() {
        bail!("empty message");
    }

    let persona = match persona.as_deref() {
        None => &DEFAULT_PERSONA,
        Some(name) => {
            persona_by_name(name).with_context(|| format!("unknown persona '{name}'"))?
        }
    };

    let mut session = ChatSession::new(persona.system_prompt);
    session.push_user(message);

    let request = ChatRequest {
        messages: session.messages().to_vec(),
        model: None,
        temperature: None,
        max_tokens: None,
    };

    let reply = send_chat(server, &request).await?;
    session.push_assistant(reply.message.clone());

    if json {
        println!("{}", serde_json::to_string_pretty(&reply)?);
    } else {
        println!();
        println!("  {} {}", style(persona.name).cyan().bold(), reply.message);
        println!(
            "  {}",
            style(format!(
                "({} in / {} out tokens)",
                reply.usage.input_tokens, reply.usage.output_tokens
            ))
            .dim()
        );
        println!();
    }
    Ok(())
}
