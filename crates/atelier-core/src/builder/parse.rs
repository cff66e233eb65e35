//! Multi-strategy JSON extraction from raw completions.
//!
//! Providers frequently wrap JSON in prose or markdown fences despite
//! instructions. Strategies are tried in order, cheapest and strictest
//! first; the first success wins:
//!
//! 1. Parse the whole text directly as JSON.
//! 2. Parse the interior of the first fenced code block (triple-backtick,
//!    optionally tagged `json`).
//! 3. Scan for a balanced `{...}` object and parse it.
//!
//! Strategy 3 is a quote- and escape-aware depth scanner, not a greedy
//! first-brace-to-last-brace match: file content legitimately contains
//! unbalanced braces inside JSON string values, and trailing prose after
//! the object must not be swallowed.

use serde_json::Value;
use thiserror::Error;

/// No strategy could extract JSON from the completion.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("could not parse JSON from completion")]
pub struct ParseError;

/// Extract a JSON value from a raw completion.
///
/// Shape checking is the validator's job; this returns whatever JSON the
/// text yields, object or not.
pub fn parse(raw: &str) -> Result<Value, ParseError> {
    let trimmed = raw.trim();

    if let Ok(value) = serde_json::from_str::<Value>(trimmed) {
        return Ok(value);
    }

    if let Some(interior) = fenced_block(trimmed) {
        if let Ok(value) = serde_json::from_str::<Value>(interior.trim()) {
            return Ok(value);
        }
    }

    if let Some(value) = balanced_object(trimmed) {
        return Ok(value);
    }

    Err(ParseError)
}

/// Interior of the first triple-backtick fence, with an optional `json`
/// language tag stripped.
fn fenced_block(text: &str) -> Option<&str> {
    let start = text.find("```")? + 3;
    let rest = &text[start..];
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    let end = rest.find("```")?;
    Some(&rest[..end])
}

/// First balanced `{...}` substring that parses as JSON.
///
/// Every `{` is a candidate start; for each, the scanner walks forward
/// tracking string literals and escapes, and stops when the brace depth
/// returns to zero. Candidates that balance but fail to parse are skipped.
fn balanced_object(text: &str) -> Option<Value> {
    for (start, ch) in text.char_indices() {
        if ch != '{' {
            continue;
        }
        if let Some(len) = balanced_len(&text[start..]) {
            let candidate = &text[start..start + len];
            if let Ok(value) = serde_json::from_str::<Value>(candidate) {
                return Some(value);
            }
        }
    }
    None
}

/// Byte length of the balanced object starting at the leading `{` of
/// `text`, or None if it never closes.
fn balanced_len(text: &str) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (idx, ch) in text.char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }
        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(idx + ch.len_utf8());
                }
            }
            _ => {}
        }
    }
    None
}
