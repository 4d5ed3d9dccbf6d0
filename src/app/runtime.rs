//! Top-level run flow: validate, download, report.

use std::future::Future;
use std::io::{self, IsTerminal};

use fetchfile_core::{
    DownloadError, DownloadOutcome, DownloadRequest, HttpClient, ProgressReporter, is_valid_url,
};
use tracing::{debug, warn};

use crate::app::progress_manager::TerminalReporter;
use crate::app::{exit_handler, terminal};
use crate::cli::Args;
use crate::{ProcessExit, output};

/// Runs one download from parsed arguments and prints every user-facing line.
pub(crate) async fn run_downloader(args: Args) -> ProcessExit {
    let Some(url) = args.url.as_deref() else {
        println!("{}", output::USAGE);
        return ProcessExit::Success;
    };

    if !is_valid_url(url) {
        println!("{}", output::error_message(&DownloadError::invalid_url(url)));
        return ProcessExit::Failure;
    }

    let request = DownloadRequest::new(url, args.save_dir.clone());
    debug!(?request, "download request");

    let client = match HttpClient::with_config(&args.client_config()) {
        Ok(client) => client,
        Err(error) => {
            println!("{}", output::error_message(&error));
            return ProcessExit::Failure;
        }
    };

    let use_spinner = terminal::should_use_spinner(
        io::stderr().is_terminal(),
        args.quiet,
        terminal::is_dumb_terminal(),
    );
    let mut reporter = TerminalReporter::new(use_spinner);

    let result = run(&client, &request, &mut reporter, interrupt_signal()).await;
    if result.is_err() {
        reporter.close_line();
    }
    if let Some(message) = output::result_message(&result) {
        println!("{message}");
    }

    exit_handler::determine_exit_outcome(&result)
}

/// Downloads `request`, giving up with [`DownloadError::Interrupted`] if
/// `shutdown` completes first.
///
/// Dropping the download future releases the response stream and closes the
/// output file.
pub(crate) async fn run<R, S>(
    client: &HttpClient,
    request: &DownloadRequest,
    reporter: &mut R,
    shutdown: S,
) -> Result<DownloadOutcome, DownloadError>
where
    R: ProgressReporter + ?Sized,
    S: Future<Output = ()>,
{
    tokio::select! {
        result = client.download_file(request, reporter) => result,
        () = shutdown => {
            warn!(url = %request.url, "download interrupted");
            Err(DownloadError::interrupted(request.url.clone()))
        }
    }
}

/// Resolves on Ctrl-C. Never resolves if the handler cannot be installed.
async fn interrupt_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        warn!(%error, "cannot listen for Ctrl-C; download is not interruptible");
        std::future::pending::<()>().await;
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use tempfile::TempDir;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_run_returns_download_result_without_shutdown() {
        let mock_server = MockServer::start().await;
        let temp_dir = TempDir::new().unwrap();

        Mock::given(method("GET"))
            .and(path("/notes.txt"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"hello".to_vec()))
            .mount(&mock_server)
            .await;

        let client = HttpClient::new().unwrap();
        let request = DownloadRequest::new(format!("{}/notes.txt", mock_server.uri()), temp_dir.path());
        let result = run(&client, &request, &mut (), std::future::pending()).await;

        assert!(matches!(result, Ok(DownloadOutcome::Saved { bytes_written: 5, .. })));
        assert_eq!(std::fs::read(temp_dir.path().join("notes.txt")).unwrap(), b"hello");
    }

    #[tokio::test]
    async fn test_run_interrupted_by_shutdown() {
        let mock_server = MockServer::start().await;
        let temp_dir = TempDir::new().unwrap();

        Mock::given(method("GET"))
            .and(path("/slow.bin"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_bytes(b"late".to_vec())
                    .set_delay(Duration::from_secs(10)),
            )
            .mount(&mock_server)
            .await;

        let client = HttpClient::new().unwrap();
        let request = DownloadRequest::new(format!("{}/slow.bin", mock_server.uri()), temp_dir.path());
        let started = std::time::Instant::now();
        let result = run(
            &client,
            &request,
            &mut (),
            tokio::time::sleep(Duration::from_millis(100)),
        )
        .await;

        assert!(matches!(result, Err(DownloadError::Interrupted { .. })));
        assert!(started.elapsed() < Duration::from_secs(5));
        assert!(!temp_dir.path().join("slow.bin").exists());
    }
}
