//! Error types for wsfix
//!
//! Only run-level failures surface as `Error`. Per-file read and
//! classification problems become a [`crate::processor::Skip`] instead.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// wsfix error types
#[derive(Debug, Error)]
pub enum Error {
    /// Filesystem failure on a path the run depends on
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Malformed glob pattern on the command line
    #[error("invalid pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    /// Fewer bytes arrived than the file size promised
    #[error("short read on {}: expected {expected} bytes, got {actual}", path.display())]
    ShortRead {
        path: PathBuf,
        expected: usize,
        actual: usize,
    },

    /// Directory traversal failure
    #[error("cannot walk {}: {source}", path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}

/// Result type alias for wsfix operations
pub type Result<T> = std::result::Result<T, Error>;
