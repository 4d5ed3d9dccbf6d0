//! Error types for the download module.
//!
//! A non-200 response is not an error; it is reported through
//! [`DownloadOutcome::NoFile`](super::DownloadOutcome::NoFile). Everything
//! here aborts the download.

use std::path::PathBuf;

use thiserror::Error;

/// Message shown for URLs that fail syntactic validation.
pub const INVALID_URL_MESSAGE: &str = "The URL provided is not valid.";

/// Errors that can occur during a download.
#[derive(Debug, Error)]
pub enum DownloadError {
    /// The provided URL is not a syntactically valid URI.
    #[error("{}", INVALID_URL_MESSAGE)]
    InvalidUrl {
        /// The rejected URL string.
        url: String,
    },

    /// The destination directory did not exist and could not be created.
    #[error("could not create directory {path}: {source}")]
    DirectoryCreationFailed {
        /// Directory that was being created.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Network-level error (DNS resolution, connection refused, TLS, body read, etc.)
    #[error("network error downloading {url}: {source}")]
    Network {
        /// The URL that failed to download.
        url: String,
        /// The underlying network error.
        #[source]
        source: reqwest::Error,
    },

    /// Creating, writing or flushing the output file failed.
    #[error("IO error writing to {path}: {source}")]
    WriteFailed {
        /// The file path where the error occurred.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The download was cancelled (Ctrl-C) before it finished.
    #[error("download of {url} interrupted")]
    Interrupted {
        /// The URL being downloaded.
        url: String,
    },

    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {source}")]
    ClientBuild {
        /// The underlying builder error.
        #[source]
        source: reqwest::Error,
    },
}

impl DownloadError {
    /// Creates an invalid URL error.
    pub fn invalid_url(url: impl Into<String>) -> Self {
        Self::InvalidUrl { url: url.into() }
    }

    /// Creates a directory creation error.
    pub fn directory(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::DirectoryCreationFailed {
            path: path.into(),
            source,
        }
    }

    /// Creates a network error from a reqwest error.
    pub fn network(url: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Network {
            url: url.into(),
            source,
        }
    }

    /// Creates a write error.
    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::WriteFailed {
            path: path.into(),
            source,
        }
    }

    /// Creates an interruption error.
    pub fn interrupted(url: impl Into<String>) -> Self {
        Self::Interrupted { url: url.into() }
    }

    /// Returns `true` for errors caused by the caller's input rather than by
    /// the network or the filesystem.
    #[must_use]
    pub fn is_invalid_url(&self) -> bool {
        matches!(self, Self::InvalidUrl { .. })
    }
}

// No `From<reqwest::Error>` / `From<std::io::Error>`: every variant needs a
// URL or path for context, so callers go through the constructors above.

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_download_error_invalid_url_display() {
        let error = DownloadError::invalid_url("not a url");
        assert_eq!(error.to_string(), INVALID_URL_MESSAGE);
        assert!(error.is_invalid_url());
    }

    #[test]
    fn test_download_error_directory_display() {
        let io_error = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let error = DownloadError::directory(PathBuf::from("/root/locked"), io_error);
        let msg = error.to_string();
        assert!(msg.contains("/root/locked"), "Expected path in: {msg}");
        assert!(msg.contains("access denied"), "Expected cause in: {msg}");
        assert!(!error.is_invalid_url());
    }

    #[test]
    fn test_download_error_write_display() {
        let io_error = std::io::Error::other("disk full");
        let error = DownloadError::write(PathBuf::from("/tmp/test.pdf"), io_error);
        let msg = error.to_string();
        assert!(msg.contains("/tmp/test.pdf"), "Expected path in: {msg}");
        assert!(msg.contains("disk full"), "Expected cause in: {msg}");
    }

    #[test]
    fn test_download_error_interrupted_display() {
        let error = DownloadError::interrupted("https://example.com/big.iso");
        let msg = error.to_string();
        assert!(msg.contains("interrupted"), "got: {msg}");
        assert!(msg.contains("https://example.com/big.iso"), "got: {msg}");
        assert!(!error.is_invalid_url());
    }

    #[test]
    fn test_download_error_exposes_io_source() {
        use std::error::Error as _;

        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let error = DownloadError::write(PathBuf::from("/tmp/x"), io_error);
        let source = error.source().unwrap();
        assert_eq!(source.to_string(), "gone");
    }
}
