//! Constants for the download module (copy buffer, fallback filename).

/// Maximum number of bytes written to disk per copy step.
///
/// Progress is re-evaluated after every step.
pub const COPY_CHUNK_SIZE: usize = 4096;

/// Filename used when neither Content-Disposition nor the URL path yields one.
pub const DEFAULT_FILENAME: &str = "download.bin";
