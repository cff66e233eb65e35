//! Structural and budget validation of parsed builder responses.
//!
//! Checks short-circuit at the first failure, in a fixed order, and the
//! diagnostic messages are part of the wire contract (see
//! `atelier_types::error::ValidationError`). On success every path has been
//! replaced by its sanitized form.

use std::collections::HashMap;

use serde_json::Value;

use atelier_types::builder::{BuilderResponse, GeneratedFile};
use atelier_types::error::ValidationError;

use super::path;

/// Maximum number of files in one response.
pub const MAX_FILES: usize = 50;

/// Maximum total content size across all files, in UTF-8 bytes.
pub const MAX_TOTAL_CONTENT_BYTES: usize = 2 * 1024 * 1024;

/// Validate a parsed completion and produce the sanitized response.
///
/// Check order: object shape, files array, file count, per-file path and
/// content types, path sanitization, running content-size total.
///
/// Duplicate sanitized paths resolve last-write-wins; the surviving entry
/// keeps the first occurrence's position. The size total accumulates over
/// incoming files in iteration order, before deduplication.
pub fn validate(parsed: &Value) -> Result<BuilderResponse, ValidationError> {
    let object = parsed.as_object().ok_or(ValidationError::NotAnObject)?;

    let files = object
        .get("files")
        .and_then(Value::as_array)
        .ok_or(ValidationError::MissingFiles)?;

    if files.len() > MAX_FILES {
        return Err(ValidationError::TooManyFiles);
    }

    let mut total_bytes = 0usize;
    let mut out: Vec<GeneratedFile> = Vec::with_capacity(files.len());
    let mut positions: HashMap<String, usize> = HashMap::new();

    for entry in files {
        let raw_path = entry
            .get("path")
            .and_then(Value::as_str)
            .filter(|p| !p.is_empty())
            .ok_or(ValidationError::InvalidFilePath)?;

        let content = entry
            .get("content")
            .and_then(Value::as_str)
            .ok_or(ValidationError::InvalidFileContent)?;

        let clean = path::sanitize(raw_path);
        if clean.is_empty() {
            return Err(ValidationError::EmptyPathAfterSanitization);
        }

        total_bytes += content.len();
        if total_bytes > MAX_TOTAL_CONTENT_BYTES {
            return Err(ValidationError::TotalSizeExceeded);
        }

        match positions.get(&clean) {
            Some(&i) => out[i].content = content.to_string(),
            None => {
                positions.insert(clean.clone(), out.len());
                out.push(GeneratedFile::new(clean, content));
            }
        }
    }

    let message = object
        .get("message")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    Ok(BuilderResponse {
        message,
        files: out,
    })
}
