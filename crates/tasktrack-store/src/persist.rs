//! Whole-file reads and rewrites for the backing files.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use tasktrack_core::{TaskError, TaskResult};

/// Read a backing file, returning `None` if it does not exist yet.
pub(crate) fn read_existing(path: &Path) -> TaskResult<Option<String>> {
    match fs::read_to_string(path) {
        Ok(contents) => {
            tracing::debug!(path = ?path, bytes = contents.len(), "Read backing file");
            Ok(Some(contents))
        }
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::debug!(path = ?path, "Backing file not found");
            Ok(None)
        }
        Err(e) => {
            tracing::error!(path = ?path, error = %e, "Failed to read backing file");
            Err(TaskError::io(path, e))
        }
    }
}

/// Replace the whole content of `path`.
///
/// Without `atomic` the file is truncated and rewritten in place, so a
/// crash mid-write can leave it empty or partial. With `atomic` the content
/// goes to a sibling `.tmp` file that is then renamed over the target.
pub(crate) fn rewrite(path: &Path, contents: &str, atomic: bool) -> TaskResult<()> {
    if !atomic {
        fs::write(path, contents).map_err(|e| {
            tracing::error!(path = ?path, error = %e, "Failed to rewrite backing file");
            TaskError::io(path, e)
        })?;
        tracing::debug!(path = ?path, bytes = contents.len(), "Rewrote backing file");
        return Ok(());
    }

    let tmp_path = path.with_extension("tmp");

    fs::write(&tmp_path, contents).map_err(|e| {
        tracing::error!(
            path = ?tmp_path,
            error = %e,
            "Failed to write backing file to temporary file"
        );
        TaskError::io(&tmp_path, e)
    })?;

    fs::rename(&tmp_path, path).map_err(|e| {
        tracing::error!(
            from = ?tmp_path,
            to = ?path,
            error = %e,
            "Failed to atomically rename backing file"
        );
        TaskError::io(path, e)
    })?;

    tracing::debug!(path = ?path, bytes = contents.len(), "Atomically replaced backing file");
    Ok(())
}
