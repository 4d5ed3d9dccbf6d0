//! Download progress reporting.
//!
//! The download client never prints. It emits events to a [`ProgressReporter`];
//! [`ConsoleReporter`] renders them as the line-oriented text protocol shown to
//! users.

use std::io::Write;
use std::path::Path;

/// Receives download lifecycle events.
///
/// Every method has an empty default so reporters only implement what they
/// render. `()` is the no-op reporter.
pub trait ProgressReporter {
    /// The destination directory did not exist and was created.
    fn directory_created(&mut self, _dir: &Path) {}

    /// Streaming to `file_name` is about to begin.
    fn started(&mut self, _file_name: &str, _content_length: Option<u64>) {}

    /// Percentage of the expected size written so far (only when the size is known).
    fn progress(&mut self, _percent: u8) {}

    /// Running byte count, reported after every copy step.
    fn bytes_received(&mut self, _total: u64) {}

    /// The body was fully written to `file_name`.
    fn finished(&mut self, _file_name: &str, _bytes: u64) {}
}

impl ProgressReporter for () {}

/// Computes `floor(done * 100 / total)`, clamped to 100.
#[must_use]
pub fn percent_of(done: u64, total: u64) -> u8 {
    if total == 0 {
        return 0;
    }
    let percent = (u128::from(done) * 100) / u128::from(total);
    u8::try_from(percent.min(100)).unwrap_or(100)
}

/// Tracks bytes written and decides when a new percentage is worth reporting.
#[derive(Debug, Clone)]
pub struct ProgressTracker {
    expected: Option<u64>,
    written: u64,
    last_percent: Option<u8>,
}

impl ProgressTracker {
    /// Creates a tracker; `expected` of `None` or `Some(0)` means unknown size.
    #[must_use]
    pub fn new(expected: Option<u64>) -> Self {
        Self {
            expected: expected.filter(|&len| len > 0),
            written: 0,
            last_percent: None,
        }
    }

    /// Records `bytes` more written and returns the new percentage if it changed.
    pub fn advance(&mut self, bytes: u64) -> Option<u8> {
        self.written = self.written.saturating_add(bytes);
        let expected = self.expected?;
        let percent = percent_of(self.written, expected);
        if self.last_percent == Some(percent) {
            return None;
        }
        self.last_percent = Some(percent);
        Some(percent)
    }

    /// Total bytes recorded so far.
    #[must_use]
    pub fn written(&self) -> u64 {
        self.written
    }
}

/// Renders download events as plain text.
///
/// ```text
/// Directory created: ./downloads
/// Downloading: report.pdf
/// Progress: 100%
/// Download complete: report.pdf
/// ```
///
/// Progress updates start with `\r` so a terminal overwrites them in place.
#[derive(Debug)]
pub struct ConsoleReporter<W: Write> {
    out: W,
}

impl<W: Write> ConsoleReporter<W> {
    /// Creates a reporter writing to `out`.
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Consumes the reporter and returns the writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

// Write failures (closed stdout, full pipe) must not abort a download that is
// otherwise succeeding, so they are dropped here.
impl<W: Write> ProgressReporter for ConsoleReporter<W> {
    fn directory_created(&mut self, dir: &Path) {
        let _ = writeln!(self.out, "Directory created: {}", dir.display());
    }

    fn started(&mut self, file_name: &str, _content_length: Option<u64>) {
        let _ = writeln!(self.out, "Downloading: {file_name}");
    }

    fn progress(&mut self, percent: u8) {
        let _ = write!(self.out, "\rProgress: {percent}%");
        let _ = self.out.flush();
    }

    fn finished(&mut self, file_name: &str, _bytes: u64) {
        let _ = writeln!(self.out, "\nDownload complete: {file_name}");
        let _ = self.out.flush();
    }
}
