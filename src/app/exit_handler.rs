//! Exit code logic for the fetchfile process.
//!
//! Single responsibility: map a download result to the process exit outcome.

use fetchfile_core::{DownloadError, DownloadOutcome};

use crate::ProcessExit;

/// Determines the process exit outcome for a finished download call.
///
/// A non-200 response is informational and still exits successfully; every
/// error kind is a failure.
pub(crate) fn determine_exit_outcome(
    result: &Result<DownloadOutcome, DownloadError>,
) -> ProcessExit {
    match result {
        Ok(_) => ProcessExit::Success,
        Err(_) => ProcessExit::Failure,
    }
}
