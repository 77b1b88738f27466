//! Saving converted CSV text to disk.
//!
//! Data is staged in a temporary file next to the destination and only moved
//! into place once fully written. The temporary file is removed on every
//! failure path when it is dropped.

use crate::error::DownloadError;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::info;

/// `converted-<unix millis>.csv`
pub fn suggested_file_name(timestamp_millis: i64) -> String {
    format!("converted-{}.csv", timestamp_millis)
}

pub fn suggested_file_name_now() -> String {
    suggested_file_name(chrono::Utc::now().timestamp_millis())
}

/// Save into `dir` under a fresh timestamped name and return the final path.
pub fn save_csv_in(dir: &Path, contents: &str) -> Result<PathBuf, DownloadError> {
    let path = dir.join(suggested_file_name_now());
    save_csv_to(&path, contents)?;
    Ok(path)
}

/// Save to an exact path, replacing whatever is there.
pub fn save_csv_to(path: &Path, contents: &str) -> Result<(), DownloadError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut staged = NamedTempFile::new_in(dir).map_err(|source| DownloadError::CreateTemp {
        dir: dir.to_path_buf(),
        source,
    })?;
    staged
        .write_all(contents.as_bytes())
        .and_then(|_| staged.flush())
        .map_err(|source| DownloadError::Write { source })?;
    staged.persist(path).map_err(|e| DownloadError::Persist {
        path: path.to_path_buf(),
        source: e.error,
    })?;

    info!("Saved {} bytes of CSV to {}", contents.len(), path.display());
    Ok(())
}
