//! Prompt assembly for the Builder.
//!
//! The system prompt instructs the provider to emit strict JSON only; the
//! retry amendment is prepended to the user prompt when the first completion
//! was unusable; the context prefix folds uploaded files into the request.

use atelier_types::builder::GeneratedFile;

/// Fixed system prompt for the scaffold generator.
///
/// The budgets stated here mirror the validator's hard limits; the prompt
/// is advisory, the validator is authoritative.
pub const SYSTEM_PROMPT: &str = r##"You are Atelier, an AI code generator. You generate project scaffolds and code files.

CRITICAL: You MUST respond with ONLY a valid JSON object. No markdown, no explanation text before or after.

Response format (STRICT JSON):
{
  "message": "Brief summary of what was generated (1-2 sentences)",
  "files": [
    {"path": "filename.ext", "content": "file content here"},
    {"path": "src/component.tsx", "content": "file content here"}
  ]
}

Rules:
1. Always include a README.md with setup instructions
2. If generating Node/React projects, include package.json with minimal dependencies
3. Use relative paths only (no absolute paths, no "..", no drive letters)
4. Keep file count under 50 and total content under 1MB
5. No secrets, API keys, or sensitive data in generated code
6. Generate clean, well-commented, production-ready code
7. For React apps: use modern functional components with hooks
8. For Node apps: use ES modules or CommonJS as appropriate

Example valid response:
{"message":"Created a simple landing page with HTML and CSS.","files":[{"path":"index.html","content":"<!DOCTYPE html>..."},{"path":"styles.css","content":"body {...}"},{"path":"README.md","content":"# Landing Page\n\nOpen index.html in browser."}]}"##;

/// Wrap the original prompt with the strict-JSON retry instruction.
///
/// Used on the second (and final) attempt after a malformed completion.
pub fn retry_prompt(original: &str) -> String {
    format!(
        "Your previous response was not valid JSON. Please respond with ONLY a valid \
JSON object following this exact schema:\n\
{{\"message\":\"summary\",\"files\":[{{\"path\":\"filename\",\"content\":\"content\"}}]}}\n\n\
Original request: {original}"
    )
}

/// Fold uploaded context files into the outbound prompt.
///
/// With no context files the prompt passes through unchanged.
pub fn with_context(user_prompt: &str, context: &[GeneratedFile]) -> String {
    if context.is_empty() {
        return user_prompt.to_string();
    }

    let mut prompt =
        String::from("I have the following existing files that I want you to work with:\n\n");
    for file in context {
        prompt.push_str(&format!("--- {} ---\n{}\n\n", file.path, file.content));
    }
    prompt.push_str(&format!("\nUser request: {user_prompt}\n\n"));
    prompt.push_str(
        "Please modify/enhance these files or create new files as needed. Include all \
files in your response (both modified and new ones).",
    );
    prompt
}

/// Named starter prompts exposed by the client surfaces.
pub const PRESETS: &[(&str, &str)] = &[
    (
        "landing",
        "Create a modern, responsive landing page with a hero section, features \
section, and footer. Use HTML, CSS, and minimal JavaScript. Make it visually \
appealing with a dark theme.",
    ),
    (
        "react",
        "Create a small React todo app with add, delete, and toggle complete \
functionality. Include App.jsx, index.js, and basic styles. Use functional \
components with hooks.",
    ),
    (
        "cli",
        "Create a Node.js CLI tool scaffold with commander for argument parsing. \
Include a main bin file, package.json with bin field, and a README with usage \
instructions.",
    ),
];

/// Look up a preset prompt by name.
pub fn preset(name: &str) -> Option<&'static str> {
    PRESETS
        .iter()
        .find(|(preset_name, _)| *preset_name == name)
        .map(|(_, prompt)| *prompt)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retry_prompt_embeds_the_original_request() {
        let amended = retry_prompt("make a landing page");
        assert!(amended.contains("ONLY a valid JSON object"));
        assert!(amended.ends_with("Original request: make a landing page"));
    }

    #[test]
    fn context_prefix_lists_every_file() {
        let context = vec![
            GeneratedFile::new("notes.md", "# Notes"),
            GeneratedFile::new("data.csv", "a,b"),
        ];
        let prompt = with_context("turn this into a site", &context);
        assert!(prompt.contains("--- notes.md ---\n# Notes"));
        assert!(prompt.contains("--- data.csv ---\na,b"));
        assert!(prompt.contains("User request: turn this into a site"));
    }

    #[test]
    fn no_context_passes_through() {
        assert_eq!(with_context("hello", &[]), "hello");
    }

    #[test]
    fn presets_resolve_by_name() {
        assert!(preset("landing").unwrap().contains("landing page"));
        assert!(preset("react").unwrap().contains("React"));
        assert!(preset("cli").unwrap().contains("CLI"));
        assert!(preset("missing").is_none());
    }
}
