//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use fetchfile_core::ClientConfig;

/// Fetch a single file over HTTP(S).
///
/// The file is named from the server's Content-Disposition header, or the
/// last segment of the URL path, and written into SAVEDIR.
#[derive(Parser, Debug)]
#[command(name = "fetchfile")]
#[command(author, version, about)]
#[command(override_usage = "fetchfile <fileURL> [saveDir]")]
pub struct Args {
    /// URL of the file to download
    #[arg(value_name = "fileURL")]
    pub url: Option<String>,

    /// Directory to save the file into (created if missing)
    #[arg(value_name = "saveDir", default_value = ".")]
    pub save_dir: PathBuf,

    /// Increase log verbosity on stderr (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress diagnostic logs and the spinner (download messages are still printed)
    #[arg(short, long)]
    pub quiet: bool,

    /// Connection timeout in seconds (1-3600); no timeout when omitted
    #[arg(long, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..=3600))]
    pub connect_timeout: Option<u64>,
}

impl Args {
    /// Log level used when `RUST_LOG` is not set.
    ///
    /// Priority: quiet flag > verbose flag > default (warn)
    pub fn default_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "debug",
                _ => "trace",
            }
        }
    }

    /// HTTP client settings derived from the flags.
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            connect_timeout: self.connect_timeout.map(Duration::from_secs),
        }
    }
}
