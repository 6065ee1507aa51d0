//! JSON file implementation of the local cache slot.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use movie_tracker_core::{LocalCache, Movie, RemoteMovie, reconcile};

use crate::error::StorageError;

/// The collection serialized as a JSON array in a single file.
///
/// Writes go to a sibling temp file first and are renamed over the slot, so
/// a crash mid-write leaves the previous contents intact.
#[derive(Debug, Clone)]
pub struct FileCache {
    path: PathBuf,
}

impl FileCache {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and validate the slot. Missing file means nothing stored yet.
    ///
    /// Entries are parsed leniently and run through reconciliation, so a dump
    /// from an older client (numeric ids, date-only entries) still loads.
    pub fn read(&self) -> Result<Option<Vec<Movie>>, StorageError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(s) => s,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        if raw.trim().is_empty() {
            return Ok(None);
        }

        let values: Vec<serde_json::Value> = serde_json::from_str(&raw).map_err(|e| {
            StorageError::corruption(format!("cache file {}", self.path.display()), e)
        })?;
        let reconciled = reconcile(values.into_iter().map(RemoteMovie::from_value));
        if reconciled.report.dropped() > 0 {
            tracing::warn!(
                path = %self.path.display(),
                duplicates = reconciled.report.duplicates_dropped,
                invalid = reconciled.report.invalid_dropped,
                "cache contained rows that failed validation"
            );
        }
        Ok(Some(reconciled.movies))
    }

    /// Replace the slot contents.
    pub fn write(&self, movies: &[Movie]) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let body = serde_json::to_vec_pretty(movies)?;
        let tmp = self.temp_path();
        fs::write(&tmp, body)?;
        fs::rename(&tmp, &self.path)?;
        tracing::debug!(path = %self.path.display(), count = movies.len(), "cache written");
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl LocalCache for FileCache {
    fn load(&self) -> anyhow::Result<Option<Vec<Movie>>> {
        Ok(self.read()?)
    }

    fn store(&self, movies: &[Movie]) -> anyhow::Result<()> {
        Ok(self.write(movies)?)
    }
}
