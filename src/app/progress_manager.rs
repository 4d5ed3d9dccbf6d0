//! Terminal progress reporting: the stdout text protocol plus an optional
//! stderr spinner for downloads of unknown size.

use std::io::{self, Stdout};
use std::path::Path;
use std::time::Duration;

use fetchfile_core::{ConsoleReporter, ProgressReporter};
use indicatif::{HumanBytes, ProgressBar, ProgressStyle};

/// Reporter used by the binary.
///
/// Text events go to stdout through [`ConsoleReporter`]. When the server sends
/// no usable `Content-Length` there is no percentage to print, so a spinner on
/// stderr shows the running byte count instead (only if `use_spinner`).
pub(crate) struct TerminalReporter {
    console: ConsoleReporter<Stdout>,
    use_spinner: bool,
    spinner: Option<ProgressBar>,
    progress_line_open: bool,
}

impl TerminalReporter {
    pub(crate) fn new(use_spinner: bool) -> Self {
        Self {
            console: ConsoleReporter::new(io::stdout()),
            use_spinner,
            spinner: None,
            progress_line_open: false,
        }
    }

    /// Clears the spinner and ends an open `Progress:` line so a following
    /// message starts on its own line.
    pub(crate) fn close_line(&mut self) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
        }
        if self.progress_line_open {
            println!();
            self.progress_line_open = false;
        }
    }

    fn start_spinner(file_name: &str) -> ProgressBar {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::with_template("{spinner} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        spinner.set_message(format!("{file_name}: 0 B"));
        spinner.enable_steady_tick(Duration::from_millis(100));
        spinner.set_prefix(file_name.to_string());
        spinner
    }
}

impl ProgressReporter for TerminalReporter {
    fn directory_created(&mut self, dir: &Path) {
        self.console.directory_created(dir);
    }

    fn started(&mut self, file_name: &str, content_length: Option<u64>) {
        self.console.started(file_name, content_length);
        let size_unknown = content_length.is_none_or(|len| len == 0);
        if self.use_spinner && size_unknown {
            self.spinner = Some(Self::start_spinner(file_name));
        }
    }

    fn progress(&mut self, percent: u8) {
        self.console.progress(percent);
        self.progress_line_open = true;
    }

    fn bytes_received(&mut self, total: u64) {
        if let Some(spinner) = &self.spinner {
            spinner.set_message(format!("{}: {}", spinner.prefix(), HumanBytes(total)));
        }
    }

    fn finished(&mut self, file_name: &str, bytes: u64) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
        }
        self.console.finished(file_name, bytes);
        self.progress_line_open = false;
    }
}
