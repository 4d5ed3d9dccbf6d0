//! HTTP download of a single file, streamed to disk.
//!
//! # Features
//!
//! - Streaming downloads in bounded 4 KiB write steps
//! - Filename extraction from Content-Disposition headers or the URL path
//! - Percentage progress events when the server announces a size
//! - Structured error types with full context
//!
//! # Example
//!
//! ```no_run
//! use fetchfile_core::download::{DownloadOutcome, DownloadRequest, HttpClient};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = HttpClient::new()?;
//! let request = DownloadRequest::new("https://example.com/paper.pdf", "./downloads");
//! match client.download_file(&request, &mut ()).await? {
//!     DownloadOutcome::Saved { path, .. } => println!("Downloaded: {}", path.display()),
//!     DownloadOutcome::NoFile { status } => println!("HTTP {status}"),
//! }
//! # Ok(())
//! # }
//! ```

mod client;
mod constants;
mod directory;
mod error;
mod filename;
mod progress;

pub use client::{ClientConfig, DownloadOutcome, DownloadRequest, HttpClient};
pub use constants::{COPY_CHUNK_SIZE, DEFAULT_FILENAME};
pub use directory::prepare_directory;
pub use error::{DownloadError, INVALID_URL_MESSAGE};
pub use progress::{ConsoleReporter, ProgressReporter, ProgressTracker, percent_of};

// Note: we do NOT define module-local Result aliases.
// Use `Result<T, DownloadError>` explicitly in function signatures.
