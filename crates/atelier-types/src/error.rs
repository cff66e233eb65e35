use thiserror::Error;

/// A structural or budget violation in a parsed builder response.
///
/// The display strings double as the wire-visible diagnostic messages, so
/// they must stay stable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Response is not an object")]
    NotAnObject,

    #[error("Missing files array")]
    MissingFiles,

    #[error("Too many files (max 50)")]
    TooManyFiles,

    #[error("Invalid file path")]
    InvalidFilePath,

    #[error("Invalid file content")]
    InvalidFileContent,

    #[error("Empty file path after sanitization")]
    EmptyPathAfterSanitization,

    #[error("Total file size exceeds 2MB limit")]
    TotalSizeExceeded,
}

/// Errors from one builder exchange with the completion provider.
///
/// `Parse` and `Validation` are only surfaced as errors on a retry attempt;
/// on a first attempt they are converted into the retry sentinel instead.
#[derive(Debug, Error)]
pub enum BuildError {
    /// No strategy could extract a JSON object from the completion.
    #[error("Failed to parse response as JSON")]
    Parse {
        /// Leading excerpt of the raw completion, for diagnosis.
        raw_excerpt: String,
    },

    /// The completion parsed as JSON but violated the response schema
    /// or a budget.
    #[error("{0}")]
    Validation(ValidationError),

    /// The upstream completion provider failed (network or HTTP error).
    #[error("provider request failed: {message}")]
    Provider {
        /// HTTP status from the provider, when one was received.
        status: Option<u16>,
        message: String,
    },

    /// No provider credential is configured.
    #[error("no completion provider credential configured")]
    MissingCredential,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_wire_messages() {
        assert_eq!(
            ValidationError::NotAnObject.to_string(),
            "Response is not an object"
        );
        assert_eq!(
            ValidationError::MissingFiles.to_string(),
            "Missing files array"
        );
        assert_eq!(
            ValidationError::TooManyFiles.to_string(),
            "Too many files (max 50)"
        );
        assert_eq!(
            ValidationError::InvalidFilePath.to_string(),
            "Invalid file path"
        );
        assert_eq!(
            ValidationError::InvalidFileContent.to_string(),
            "Invalid file content"
        );
        assert_eq!(
            ValidationError::EmptyPathAfterSanitization.to_string(),
            "Empty file path after sanitization"
        );
        assert_eq!(
            ValidationError::TotalSizeExceeded.to_string(),
            "Total file size exceeds 2MB limit"
        );
    }

    #[test]
    fn build_error_display() {
        let err = BuildError::Provider {
            status: Some(429),
            message: "rate limited".to_string(),
        };
        assert!(err.to_string().contains("rate limited"));

        let err = BuildError::Validation(ValidationError::TooManyFiles);
        assert_eq!(err.to_string(), "Too many files (max 50)");
    }
}
