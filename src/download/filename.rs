//! Filename extraction and sanitization for downloads.
//!
//! The output name comes from, in order:
//! 1. an `attachment` Content-Disposition header (`filename*` before `filename`)
//! 2. the last segment of the request URL path
//! 3. [`DEFAULT_FILENAME`]

use std::borrow::Cow;
use std::path::{Component, Path};

use tracing::debug;
use url::Url;

use super::constants::DEFAULT_FILENAME;

/// A parsed Content-Disposition header value (RFC 6266).
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ContentDisposition {
    /// Disposition type, lowercased (`attachment`, `inline`, ...).
    pub disposition: String,
    /// Parameters in header order; names lowercased, values unquoted.
    pub params: Vec<(String, String)>,
}

impl ContentDisposition {
    /// Parses a header value such as `attachment; filename="report.pdf"`.
    ///
    /// Parsing is lenient: malformed parameters are skipped rather than
    /// rejecting the whole header.
    pub(crate) fn parse(header: &str) -> Self {
        let (disposition, rest) = match header.find(';') {
            Some(pos) => (&header[..pos], &header[pos + 1..]),
            None => (header, ""),
        };

        Self {
            disposition: disposition.trim().to_ascii_lowercase(),
            params: parse_params(rest),
        }
    }

    pub(crate) fn is_attachment(&self) -> bool {
        self.disposition == "attachment"
    }

    /// Returns the first value for `name` (case-insensitive).
    pub(crate) fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Returns the filename, preferring the RFC 5987 `filename*` form.
    pub(crate) fn filename(&self) -> Option<String> {
        if let Some(extended) = self.param("filename*")
            && let Some(decoded) = decode_ext_value(extended)
            && !decoded.is_empty()
        {
            return Some(decoded);
        }

        self.param("filename")
            .map(str::to_string)
            .filter(|name| !name.is_empty())
    }
}

fn parse_params(mut rest: &str) -> Vec<(String, String)> {
    let mut params = Vec::new();

    loop {
        rest = rest.trim_start_matches(|c: char| c == ';' || c.is_whitespace());
        if rest.is_empty() {
            break;
        }

        let key_end = rest.find(['=', ';']).unwrap_or(rest.len());
        let key = rest[..key_end].trim().to_ascii_lowercase();
        rest = &rest[key_end..];

        let Some(after_eq) = rest.strip_prefix('=') else {
            // Bare token without a value; nothing to record.
            continue;
        };
        let after_eq = after_eq.trim_start();

        let value = if let Some(quoted) = after_eq.strip_prefix('"') {
            let (value, consumed) = read_quoted_string(quoted);
            rest = &quoted[consumed..];
            value
        } else {
            let end = after_eq.find(';').unwrap_or(after_eq.len());
            rest = &after_eq[end..];
            after_eq[..end].trim().to_string()
        };

        if !key.is_empty() {
            params.push((key, value));
        }
    }

    params
}

/// Reads an RFC 7230 quoted-string body (opening quote already consumed).
///
/// Returns the unescaped value and the number of bytes consumed, including
/// the closing quote when present.
fn read_quoted_string(input: &str) -> (String, usize) {
    let mut value = String::new();
    let mut chars = input.char_indices();

    while let Some((idx, ch)) = chars.next() {
        match ch {
            '"' => return (value, idx + 1),
            '\\' => {
                if let Some((_, escaped)) = chars.next() {
                    value.push(escaped);
                }
            }
            c => value.push(c),
        }
    }

    // Unterminated: take everything that was left.
    (value, input.len())
}

/// Decodes an RFC 5987 `ext-value`: `charset'language'percent-encoded`.
fn decode_ext_value(value: &str) -> Option<String> {
    let mut parts = value.splitn(3, '\'');
    let charset = parts.next()?.trim();
    let _language = parts.next()?;
    let encoded = parts.next()?.trim();

    if charset.eq_ignore_ascii_case("utf-8") {
        urlencoding::decode(encoded).ok().map(Cow::into_owned)
    } else if charset.eq_ignore_ascii_case("iso-8859-1") {
        let bytes = urlencoding::decode_binary(encoded.as_bytes());
        Some(bytes.iter().map(|&b| char::from(b)).collect())
    } else {
        debug!(charset = %charset, "unsupported Content-Disposition charset");
        None
    }
}

/// Extracts a filename from a Content-Disposition header value.
///
/// Only `attachment` dispositions contribute a name.
pub(crate) fn filename_from_content_disposition(header: &str) -> Option<String> {
    let disposition = ContentDisposition::parse(header);
    if !disposition.is_attachment() {
        return None;
    }
    disposition.filename()
}

/// Last non-empty URL path segment, percent-decoded. Query and fragment are ignored.
pub(crate) fn filename_from_url(url: &Url) -> Option<String> {
    let last = url.path_segments()?.next_back()?;
    if last.is_empty() {
        return None;
    }

    let decoded = urlencoding::decode(last).map_or_else(
        |e| {
            debug!(segment = %last, error = %e, "URL decoding failed, using raw segment");
            last.to_string()
        },
        Cow::into_owned,
    );
    Some(decoded)
}

/// Resolves the output filename for a response.
///
/// The result is always non-empty and safe to join onto the output directory.
pub(crate) fn resolve_filename(content_disposition: Option<&str>, url: &Url) -> String {
    let candidate = content_disposition
        .and_then(filename_from_content_disposition)
        .or_else(|| filename_from_url(url));

    let Some(candidate) = candidate else {
        debug!(url = %url, "no filename in headers or URL, using default");
        return DEFAULT_FILENAME.to_string();
    };

    let sanitized = sanitize_filename(&candidate);
    if sanitized.trim_matches('_').is_empty() {
        debug!(candidate = %candidate, "filename unusable after sanitizing, using default");
        return DEFAULT_FILENAME.to_string();
    }
    sanitized
}

/// Sanitizes filename for filesystem safety.
///
/// Replaces characters that are invalid on common filesystems:
/// / \ : * ? " < > |
pub(crate) fn sanitize_filename(name: &str) -> String {
    let sanitized: String = name
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    if sanitized.is_empty() {
        return "_".to_string();
    }

    if is_safe_filename_segment(&sanitized) {
        sanitized
    } else {
        sanitized
            .chars()
            .map(|c| if c == '.' { '_' } else { c })
            .collect()
    }
}

fn is_safe_filename_segment(name: &str) -> bool {
    !Path::new(name).components().any(|component| {
        matches!(
            component,
            Component::CurDir | Component::ParentDir | Component::RootDir | Component::Prefix(_)
        )
    })
}
