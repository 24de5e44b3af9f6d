use std::{io, path::PathBuf};

use thiserror::Error;

/// Failure to mutate the log file. Always non-fatal: appends report and
/// drop the entry, clears hand the error back to the caller with the prior
/// content intact.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to append to {}", .path.display())]
    Append {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to clear {}", .path.display())]
    Clear {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
