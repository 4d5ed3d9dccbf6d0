//! User-facing messages printed on stdout.

use fetchfile_core::{DownloadError, DownloadOutcome};

/// Usage line printed when no URL is given.
pub const USAGE: &str = "Usage: fetchfile <fileURL> [saveDir]";

/// Message for a response other than 200.
pub fn no_file_message(status: u16) -> String {
    format!("No file to download. Server returned HTTP code: {status}")
}

/// Single-line message for a failed download.
///
/// Input problems get the `Error:` prefix; network, filesystem and
/// interruption failures get `Error downloading file:`.
pub fn error_message(error: &DownloadError) -> String {
    if error.is_invalid_url() {
        format!("Error: {error}")
    } else {
        format!("Error downloading file: {error}")
    }
}

/// Message to print once a download call returns, if any.
///
/// A saved file needs none: the progress reporter already announced it.
pub fn result_message(result: &Result<DownloadOutcome, DownloadError>) -> Option<String> {
    match result {
        Ok(DownloadOutcome::Saved { .. }) => None,
        Ok(DownloadOutcome::NoFile { status }) => Some(no_file_message(*status)),
        Err(error) => Some(error_message(error)),
    }
}
