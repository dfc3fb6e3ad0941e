//! Error taxonomy for file cleaning.

use std::io;
use std::path::{Path, PathBuf};

/// Errors raised while cleaning a single file or resolving an input path.
///
/// Neither variant is fatal to a run: the orchestrator reports it and moves on
/// to the next file.
#[derive(Debug, thiserror::Error)]
pub enum CleanError {
    /// Open, read, UTF-8 decode or write failure.
    #[error("Error processing {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// An input path given on the command line does not exist.
    #[error("{} doesn't exist", .0.display())]
    NotFound(PathBuf),
}

impl CleanError {
    pub fn io(path: &Path, source: io::Error) -> Self {
        CleanError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, CleanError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_message_names_path() {
        let err = CleanError::io(
            Path::new("src/lib.rs"),
            io::Error::new(io::ErrorKind::PermissionDenied, "permission denied"),
        );
        assert_eq!(
            err.to_string(),
            "Error processing src/lib.rs: permission denied"
        );
    }

    #[test]
    fn test_not_found_message() {
        let err = CleanError::NotFound(PathBuf::from("missing/dir"));
        assert_eq!(err.to_string(), "missing/dir doesn't exist");
    }
}
