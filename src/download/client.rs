//! HTTP client wrapper for downloading a single file.
//!
//! This module provides the `HttpClient` struct which sends one GET request,
//! resolves the output filename and streams the body to disk.

use std::path::{Path, PathBuf};
use std::time::Duration;

use futures_util::StreamExt;
use reqwest::header::{CONTENT_DISPOSITION, CONTENT_LENGTH, HeaderMap};
use reqwest::{Client, StatusCode};
use tokio::fs::File;
use tokio::io::{AsyncWriteExt, BufWriter};
use tracing::{debug, info, instrument};

use super::constants::COPY_CHUNK_SIZE;
use super::directory::prepare_directory;
use super::error::DownloadError;
use super::filename::resolve_filename;
use super::progress::{ProgressReporter, ProgressTracker};
use crate::parser::validate_url;

/// Settings applied when building the underlying reqwest client.
///
/// The default leaves every timeout to the platform, so a slow server is
/// waited on indefinitely.
#[derive(Debug, Clone, Default)]
pub struct ClientConfig {
    /// Maximum time to establish a connection.
    pub connect_timeout: Option<Duration>,
}

/// What to fetch and where to put it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadRequest {
    /// URL of the file.
    pub url: String,
    /// Directory the file is written into; created if missing.
    pub save_dir: PathBuf,
}

impl DownloadRequest {
    /// Creates a request.
    pub fn new(url: impl Into<String>, save_dir: impl Into<PathBuf>) -> Self {
        Self {
            url: url.into(),
            save_dir: save_dir.into(),
        }
    }
}

/// Result of a download that did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadOutcome {
    /// The body was written to disk.
    Saved {
        /// Final output path.
        path: PathBuf,
        /// Resolved filename (last component of `path`).
        file_name: String,
        /// Bytes written to `path`.
        bytes_written: u64,
        /// Size announced by the server, when present and parseable.
        content_length: Option<u64>,
    },
    /// The server answered with something other than 200; nothing was written.
    NoFile {
        /// The HTTP status code.
        status: u16,
    },
}

/// HTTP client for downloading files with streaming support.
///
/// # Example
///
/// ```no_run
/// use fetchfile_core::download::{ConsoleReporter, DownloadRequest, HttpClient};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = HttpClient::new()?;
/// let request = DownloadRequest::new("https://example.com/file.pdf", "./downloads");
/// let mut reporter = ConsoleReporter::new(std::io::stdout());
/// let outcome = client.download_file(&request, &mut reporter).await?;
/// println!("{outcome:?}");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Creates a client with default settings.
    ///
    /// # Errors
    ///
    /// Returns [`DownloadError::ClientBuild`] if the TLS backend or resolver
    /// cannot be initialized.
    pub fn new() -> Result<Self, DownloadError> {
        Self::with_config(&ClientConfig::default())
    }

    /// Creates a client from explicit settings.
    ///
    /// # Errors
    ///
    /// Returns [`DownloadError::ClientBuild`] if the builder fails.
    #[instrument(level = "debug")]
    pub fn with_config(config: &ClientConfig) -> Result<Self, DownloadError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|source| DownloadError::ClientBuild { source })?;
        Ok(Self { client })
    }

    /// Downloads `request.url` into `request.save_dir`.
    ///
    /// The filename is determined by:
    /// 1. Content-Disposition header (`attachment` only)
    /// 2. URL path (last segment)
    /// 3. `download.bin`
    ///
    /// An existing file with the same name is overwritten. If streaming fails
    /// midway, the partial file is left in place.
    ///
    /// # Errors
    ///
    /// Returns `DownloadError` if:
    /// - The URL is invalid
    /// - The directory cannot be created
    /// - The request or body read fails
    /// - Writing to disk fails
    ///
    /// A non-200 status is not an error; it yields [`DownloadOutcome::NoFile`].
    #[instrument(skip(self, request, reporter), fields(url = %request.url))]
    pub async fn download_file<R>(
        &self,
        request: &DownloadRequest,
        reporter: &mut R,
    ) -> Result<DownloadOutcome, DownloadError>
    where
        R: ProgressReporter + ?Sized,
    {
        debug!("starting download");

        let parsed_url = validate_url(&request.url).map_err(|e| {
            debug!(error = %e, "rejected URL");
            DownloadError::invalid_url(request.url.clone())
        })?;

        if prepare_directory(&request.save_dir).await? {
            reporter.directory_created(&request.save_dir);
        }

        let response = self
            .client
            .get(parsed_url.as_str())
            .send()
            .await
            .map_err(|e| DownloadError::network(request.url.clone(), e))?;

        let status = response.status();
        if status != StatusCode::OK {
            info!(status = status.as_u16(), "server returned no file");
            return Ok(DownloadOutcome::NoFile {
                status: status.as_u16(),
            });
        }

        let disposition = response
            .headers()
            .get(CONTENT_DISPOSITION)
            .and_then(|v| v.to_str().ok());
        let file_name = resolve_filename(disposition, &parsed_url);
        let file_path = request.save_dir.join(&file_name);
        let content_length = declared_length(response.headers());
        debug!(
            filename = %file_name,
            path = %file_path.display(),
            content_length = ?content_length,
            "resolved output path"
        );

        let file = File::create(&file_path)
            .await
            .map_err(|e| DownloadError::write(file_path.clone(), e))?;

        reporter.started(&file_name, content_length);
        let bytes_written = stream_to_file(
            file,
            response,
            &request.url,
            &file_path,
            content_length,
            reporter,
        )
        .await?;
        reporter.finished(&file_name, bytes_written);

        info!(
            path = %file_path.display(),
            bytes = bytes_written,
            "download complete"
        );

        Ok(DownloadOutcome::Saved {
            path: file_path,
            file_name,
            bytes_written,
            content_length,
        })
    }
}

/// Streams response body to file in bounded steps, returning bytes written.
///
/// The writer is flushed before returning, including when the body stream
/// fails, so a partial file holds every byte received.
async fn stream_to_file<R>(
    file: File,
    response: reqwest::Response,
    url: &str,
    file_path: &Path,
    content_length: Option<u64>,
    reporter: &mut R,
) -> Result<u64, DownloadError>
where
    R: ProgressReporter + ?Sized,
{
    let mut writer = BufWriter::new(file);
    let mut stream = response.bytes_stream();
    let mut tracker = ProgressTracker::new(content_length);

    while let Some(chunk_result) = stream.next().await {
        let chunk = match chunk_result {
            Ok(chunk) => chunk,
            Err(e) => {
                // Keep what already arrived on disk.
                if let Err(flush_error) = writer.flush().await {
                    debug!(error = %flush_error, "flushing partial file failed");
                }
                return Err(DownloadError::network(url, e));
            }
        };

        for piece in chunk.chunks(COPY_CHUNK_SIZE) {
            writer
                .write_all(piece)
                .await
                .map_err(|e| DownloadError::write(file_path, e))?;

            if let Some(percent) = tracker.advance(piece.len() as u64) {
                reporter.progress(percent);
            }
            reporter.bytes_received(tracker.written());
        }
    }

    writer
        .flush()
        .await
        .map_err(|e| DownloadError::write(file_path, e))?;

    Ok(tracker.written())
}

/// Reads `Content-Length`; absent or unparsable values mean "unknown".
fn declared_length(headers: &HeaderMap) -> Option<u64> {
    headers
        .get(CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok())
}
