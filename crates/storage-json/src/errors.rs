//! File storage errors.
//!
//! These wrap `std::io` and `serde_json` failures together with the path
//! involved, and are converted to `calcae_core::Error` before leaving the
//! crate.

use std::path::{Path, PathBuf};

use calcae_core::errors::{Error, StorageError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum JsonStorageError {
    #[error("I/O error on {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        write: bool,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON in {}: {}", .path.display(), .source)]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Blocking task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl JsonStorageError {
    pub fn read(path: &Path, source: std::io::Error) -> Self {
        JsonStorageError::Io {
            path: path.to_path_buf(),
            write: false,
            source,
        }
    }

    pub fn write(path: &Path, source: std::io::Error) -> Self {
        JsonStorageError::Io {
            path: path.to_path_buf(),
            write: true,
            source,
        }
    }
}

impl From<JsonStorageError> for Error {
    fn from(err: JsonStorageError) -> Self {
        match err {
            JsonStorageError::Io {
                path,
                write: false,
                source,
            } => Error::Storage(StorageError::ReadFailed {
                path: path.display().to_string(),
                reason: source.to_string(),
            }),
            JsonStorageError::Io {
                path,
                write: true,
                source,
            } => Error::Storage(StorageError::WriteFailed {
                path: path.display().to_string(),
                reason: source.to_string(),
            }),
            JsonStorageError::Parse { path, source } => Error::Storage(StorageError::Malformed(
                format!("{}: {}", path.display(), source),
            )),
            JsonStorageError::Serialization(e) => {
                Error::Storage(StorageError::Malformed(e.to_string()))
            }
            JsonStorageError::Task(e) => Error::Storage(StorageError::TaskFailed(e.to_string())),
        }
    }
}

/// Extension trait for converting storage results to core results.
pub trait IntoCore<T> {
    fn into_core(self) -> calcae_core::Result<T>;
}

impl<T> IntoCore<T> for std::result::Result<T, JsonStorageError> {
    fn into_core(self) -> calcae_core::Result<T> {
        self.map_err(Error::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_io_errors_keep_direction_and_path() {
        let path = Path::new("/tmp/settings.json");

        let read: Error = JsonStorageError::read(path, io::Error::other("denied")).into();
        assert!(matches!(
            read,
            Error::Storage(StorageError::ReadFailed { ref path, .. }) if path == "/tmp/settings.json"
        ));

        let write: Error = JsonStorageError::write(path, io::Error::other("disk full")).into();
        assert!(matches!(write, Error::Storage(StorageError::WriteFailed { .. })));
    }

    #[test]
    fn test_parse_error_maps_to_malformed() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: Error = JsonStorageError::Parse {
            path: PathBuf::from("settings.json"),
            source,
        }
        .into();
        assert!(matches!(err, Error::Storage(StorageError::Malformed(_))));
    }
}
