//! fetchfile core library
//!
//! Fetches one file over HTTP(S) into a local directory, naming it from the
//! `Content-Disposition` header or the URL path, with percentage progress.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//! - [`parser`] - Syntactic URL validation
//! - [`download`] - Directory preparation, HTTP GET, filename resolution and
//!   streaming copy with progress events

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod download;
pub mod parser;

// Re-export commonly used types
pub use download::{
    ClientConfig, ConsoleReporter, DownloadError, DownloadOutcome, DownloadRequest, HttpClient,
    ProgressReporter,
};
pub use parser::{ParseError, is_valid_url, validate_url};
