/// File and stdin reading with size enforcement and UTF-8 validation.
///
/// This module is the single entry point for input I/O in the `eqcheck`
/// binary. `eqcheck-core` never touches the filesystem.
///
/// - Disk files: size checked via `std::fs::metadata` before any read.
/// - Stdin: buffered with a `Read::take` cap so allocation is bounded.
/// - All failures become [`CliError::Read`], exit code 2.
use std::io::{ErrorKind, Read as _};
use std::path::Path;

use tracing::debug;

use crate::cli::PathOrStdin;
use crate::error::{CliError, ReadFailure};

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Reads the entire contents of `source` into a `String`.
///
/// # Errors
///
/// Returns [`CliError`] (exit code 2) for a missing or unreadable file, an
/// input exceeding `max_size`, a stdin read failure, or invalid UTF-8.
pub fn read_input(source: &PathOrStdin, max_size: u64) -> Result<String, CliError> {
    match source {
        PathOrStdin::Path(path) => read_file(path, max_size),
        PathOrStdin::Stdin => read_stdin(max_size),
    }
}

// ---------------------------------------------------------------------------
// Disk file reading
// ---------------------------------------------------------------------------

fn read_file(path: &Path, max_size: u64) -> Result<String, CliError> {
    let file_size = std::fs::metadata(path)
        .map_err(|e| io_error_to_cli(&e, path))?
        .len();

    if file_size > max_size {
        return Err(read_error(
            path.display().to_string(),
            ReadFailure::TooLarge {
                limit: max_size,
                actual: Some(file_size),
            },
        ));
    }

    let bytes = std::fs::read(path).map_err(|e| io_error_to_cli(&e, path))?;
    debug!(path = %path.display(), bytes = bytes.len(), "read input file");

    bytes_to_string(&bytes, &path.display().to_string())
}

/// Maps a `std::io::Error` arising from a disk-file operation to a [`CliError`].
fn io_error_to_cli(e: &std::io::Error, path: &Path) -> CliError {
    let kind = e.kind();
    let failure = if kind == ErrorKind::NotFound {
        ReadFailure::NotFound
    } else if kind == ErrorKind::PermissionDenied {
        ReadFailure::PermissionDenied
    } else {
        ReadFailure::Other(e.to_string())
    };
    read_error(path.display().to_string(), failure)
}

fn read_error(source: String, failure: ReadFailure) -> CliError {
    CliError::Read { source, failure }
}

// ---------------------------------------------------------------------------
// Stdin reading
// ---------------------------------------------------------------------------

/// Reads the entire stdin stream, capped at `max_size` bytes.
///
/// If the stream produces exactly `max_size` bytes one more byte is probed to
/// tell "exactly at the limit" from "over the limit".
fn read_stdin(max_size: u64) -> Result<String, CliError> {
    let stdin = std::io::stdin();
    let mut handle = stdin.lock();

    let mut buf: Vec<u8> = Vec::new();
    (&mut handle)
        .take(max_size)
        .read_to_end(&mut buf)
        .map_err(|e| read_error("-".to_owned(), ReadFailure::Other(e.to_string())))?;

    if buf.len() as u64 == max_size {
        let mut probe = [0u8; 1];
        let extra = handle
            .read(&mut probe)
            .map_err(|e| read_error("-".to_owned(), ReadFailure::Other(e.to_string())))?;
        if extra > 0 {
            return Err(read_error(
                "-".to_owned(),
                ReadFailure::TooLarge {
                    limit: max_size,
                    actual: None,
                },
            ));
        }
    }
    debug!(bytes = buf.len(), "read stdin");

    bytes_to_string(&buf, "-")
}

// ---------------------------------------------------------------------------
// UTF-8 conversion
// ---------------------------------------------------------------------------

fn bytes_to_string(bytes: &[u8], source_label: &str) -> Result<String, CliError> {
    match std::str::from_utf8(bytes) {
        Ok(s) => Ok(s.to_owned()),
        Err(e) => Err(read_error(
            source_label.to_owned(),
            ReadFailure::InvalidUtf8 {
                byte_offset: e.valid_up_to(),
            },
        )),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
