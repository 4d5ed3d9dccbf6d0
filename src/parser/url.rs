//! Syntactic URL validation.
//!
//! The check is purely syntactic: the generic URI grammar (scheme, authority,
//! path, query, fragment). It does not restrict the scheme to http/https and
//! never touches the network.

use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, trace};
use url::Url;

use super::error::ParseError;

/// Characters permitted by RFC 3986 (unreserved, reserved, percent-escapes).
/// Non-ASCII characters are tolerated the way generic URI parsers accept "other" characters.
#[allow(clippy::expect_used)]
static URI_CHARS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:[A-Za-z0-9\-._~:/?#\[\]@!$&'()*+,;=]|%[0-9A-Fa-f]{2}|[^\x00-\x7F])+$")
        .expect("URI character regex is valid") // Static pattern, safe to panic
});

/// Returns `true` if `text` is a syntactically valid absolute URI.
///
/// # Examples
///
/// ```
/// use fetchfile_core::parser::is_valid_url;
///
/// assert!(is_valid_url("https://example.com/a/b.txt"));
/// assert!(is_valid_url("ftp://x/y"));
/// assert!(!is_valid_url("https://example.com/a b.txt"));
/// assert!(!is_valid_url(""));
/// ```
#[must_use]
pub fn is_valid_url(text: &str) -> bool {
    validate_url(text).is_ok()
}

/// Validates a URL string and returns the parsed [`Url`].
///
/// # Validation rules:
/// - Must be non-empty; length is not limited
/// - Must not contain whitespace or control characters
/// - Every ASCII character must belong to the RFC 3986 character set and every
///   `%` must start a two-digit hex escape
/// - Must be an absolute URI (has a scheme) parseable by the `url` crate
///
/// # Errors
///
/// Returns [`ParseError`] describing the first rule the input breaks.
#[tracing::instrument(level = "trace", skip(text), fields(len = text.len()))]
pub fn validate_url(text: &str) -> Result<Url, ParseError> {
    if text.is_empty() {
        return Err(ParseError::invalid(text, "URL is empty"));
    }

    if let Some(bad) = text.chars().find(|c| c.is_whitespace() || c.is_control()) {
        debug!(url = %text.escape_debug(), "URL contains whitespace or control characters");
        return Err(ParseError::invalid(text, format!("illegal character {bad:?}")));
    }

    if !URI_CHARS.is_match(text) {
        debug!(url = %text, "URL contains characters outside the URI grammar");
        return Err(ParseError::invalid(
            text,
            "contains characters outside the URI grammar or a malformed percent-escape",
        ));
    }

    let parsed = Url::parse(text).map_err(|e| ParseError::malformed(text, &e))?;
    trace!(url = %parsed, "URL validated");
    Ok(parsed)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_is_valid_url_accepts_https_file_url() {
        assert!(is_valid_url("https://example.com/a/b.txt"));
    }

    #[test]
    fn test_is_valid_url_accepts_non_http_scheme() {
        assert!(is_valid_url("ftp://x/y"));
        assert!(is_valid_url("mailto:someone@example.com"));
    }

    #[test]
    fn test_is_valid_url_accepts_query_and_fragment() {
        assert!(is_valid_url("https://host/dir/data.csv?x=1&y=two#top"));
    }

    #[test]
    fn test_is_valid_url_accepts_percent_escapes() {
        assert!(is_valid_url("https://example.com/my%20file.pdf"));
    }

    #[test]
    fn test_is_valid_url_accepts_ip_literal_and_port() {
        assert!(is_valid_url("http://127.0.0.1:8080/file.bin"));
        assert!(is_valid_url("http://[::1]:8080/file.bin"));
    }

    #[test]
    fn test_is_valid_url_accepts_non_ascii_path() {
        assert!(is_valid_url("https://example.com/café.txt"));
    }

    #[test]
    fn test_is_valid_url_rejects_empty() {
        assert!(!is_valid_url(""));
    }

    #[test]
    fn test_is_valid_url_rejects_unescaped_spaces() {
        assert!(!is_valid_url("https://example.com/a b.txt"));
        assert!(!is_valid_url("not a url"));
        assert!(!is_valid_url(" https://example.com/"));
    }

    #[test]
    fn test_is_valid_url_rejects_control_characters() {
        assert!(!is_valid_url("https://example.com/\u{7}file"));
        assert!(!is_valid_url("https://example.com/\nfile"));
        assert!(!is_valid_url("https://example.com/\u{0}"));
    }

    #[test]
    fn test_is_valid_url_rejects_characters_outside_grammar() {
        assert!(!is_valid_url("https://example.com/a|b"));
        assert!(!is_valid_url("https://example.com/<b>"));
        assert!(!is_valid_url("https://example.com/{x}"));
    }

    #[test]
    fn test_is_valid_url_rejects_bad_percent_escape() {
        assert!(!is_valid_url("https://example.com/%zz"));
        assert!(!is_valid_url("https://example.com/100%"));
    }

    #[test]
    fn test_is_valid_url_rejects_relative_reference() {
        assert!(!is_valid_url("relative/path.txt"));
        assert!(!is_valid_url("/absolute/path.txt"));
    }

    #[test]
    fn test_validate_url_accepts_long_signed_url() {
        let long = format!(
            "https://bucket.s3.amazonaws.com/report.pdf?X-Amz-Security-Token={}",
            "A".repeat(2500)
        );
        assert!(long.len() > 2500);
        let url = validate_url(&long).unwrap();
        assert_eq!(url.path(), "/report.pdf");
        assert!(is_valid_url(&long));
    }

    #[test]
    fn test_validate_url_returns_parsed_url() {
        let url = validate_url("https://example.com/dir/file.txt?x=1").unwrap();
        assert_eq!(url.host_str(), Some("example.com"));
        assert_eq!(url.path(), "/dir/file.txt");
        assert_eq!(url.query(), Some("x=1"));
    }

    #[test]
    fn test_validate_url_error_names_reason() {
        let err = validate_url("").unwrap_err();
        assert!(err.to_string().contains("empty"), "got: {err}");

        let err = validate_url("a\tb").unwrap_err();
        assert!(err.to_string().contains("illegal character"), "got: {err}");
    }
}
