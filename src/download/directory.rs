//! Destination directory preparation.

use std::path::Path;

use tracing::{debug, info};

use super::error::DownloadError;

/// Ensures `dir` exists, creating it and any missing parents.
///
/// Returns `true` when the directory had to be created.
///
/// # Errors
///
/// Returns [`DownloadError::DirectoryCreationFailed`] if the directory cannot be
/// created (permission denied, a path component is a regular file, ...).
pub async fn prepare_directory(dir: &Path) -> Result<bool, DownloadError> {
    if tokio::fs::metadata(dir)
        .await
        .is_ok_and(|meta| meta.is_dir())
    {
        debug!(dir = %dir.display(), "output directory exists");
        return Ok(false);
    }

    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|e| DownloadError::directory(dir, e))?;
    info!(dir = %dir.display(), "Created output directory");
    Ok(true)
}
