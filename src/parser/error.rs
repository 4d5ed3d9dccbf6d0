//! Error types for URL validation.

use thiserror::Error;

/// Errors that can occur while validating a URL.
#[derive(Debug, Clone, Error)]
pub enum ParseError {
    /// URL does not satisfy the generic URI grammar
    #[error("invalid URL '{url}': {reason}")]
    InvalidUrl {
        /// The URL that failed validation
        url: String,
        /// Why the URL is invalid
        reason: String,
    },
}

impl ParseError {
    /// Creates an `InvalidUrl` error with the given reason.
    #[must_use]
    pub fn invalid(url: &str, reason: impl Into<String>) -> Self {
        Self::InvalidUrl {
            url: url.to_string(),
            reason: reason.into(),
        }
    }

    /// Creates an `InvalidUrl` error from a `url` crate parse failure.
    #[must_use]
    pub fn malformed(url: &str, parse_error: &url::ParseError) -> Self {
        Self::invalid(url, parse_error.to_string())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_invalid_message() {
        let err = ParseError::invalid("a b", "contains whitespace");
        let msg = err.to_string();
        assert!(msg.contains("'a b'"), "should contain URL: {msg}");
        assert!(msg.contains("whitespace"), "should contain reason: {msg}");
    }

    #[test]
    fn test_parse_error_malformed_uses_url_crate_reason() {
        let err = ParseError::malformed("not-a-url", &url::ParseError::RelativeUrlWithoutBase);
        let msg = err.to_string();
        assert!(msg.contains("not-a-url"));
        assert!(msg.contains("relative URL"), "got: {msg}");
    }
}
