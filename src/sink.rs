use std::{
    fs::OpenOptions,
    io::Write,
    path::{Path, PathBuf},
};

use crate::error::StorageError;

/// The append-only log file. The path is injected so tests can point it
/// anywhere; all mutation goes through `append` and `clear`, which are only
/// called from the driver task.
pub struct LogFile {
    path: PathBuf,
}

impl LogFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends one entry, creating the file on first write. The entry goes
    /// out in a single `write_all` so a slow disk never holds up the fix
    /// stream for more than one syscall round-trip.
    pub fn append(&self, entry: &str) -> Result<(), StorageError> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|source| StorageError::Append {
                path: self.path.clone(),
                source,
            })?;
        file.write_all(entry.as_bytes())
            .map_err(|source| StorageError::Append {
                path: self.path.clone(),
                source,
            })
    }

    /// Truncates the log to empty. A missing file already counts as empty
    /// and is not created. Truncation happens at open, so if the open fails
    /// the previous content is untouched.
    pub fn clear(&self) -> Result<(), StorageError> {
        if !self.path.exists() {
            return Ok(());
        }
        OpenOptions::new()
            .write(true)
            .truncate(true)
            .open(&self.path)
            .map(drop)
            .map_err(|source| StorageError::Clear {
                path: self.path.clone(),
                source,
            })
    }
}
