//! Error taxonomy shared by the loader, the merge engine and the batch runner.

use std::path::PathBuf;

/// Library-level error type for theme installation.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A required file or directory does not exist.
    #[error("not found: {}", path.display())]
    NotFound {
        /// Path that was expected to exist.
        path: PathBuf,
    },

    /// The input is not well-formed XML.
    #[error("malformed XML in {} at byte {position}: {message}", path.display())]
    Parse {
        /// File being parsed.
        path: PathBuf,
        /// Byte offset reported by the reader.
        position: u64,
        /// Reader diagnostic.
        message: String,
    },

    /// Well-formed XML without the expected `TOOL`/`OPTIONS` anchor.
    #[error("expected exactly one <{anchor}> element, found {found}")]
    Structure {
        /// Anchor element name (`TOOL` or `OPTIONS`).
        anchor: &'static str,
        /// Number of candidate elements found.
        found: usize,
    },

    /// No backup exists for a file that was modified.
    #[error("no backup to restore for {}", path.display())]
    Restore {
        /// File that could not be restored.
        path: PathBuf,
    },

    /// Any other filesystem failure.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// Path involved in the failed operation.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Invalid overrides file.
    #[error("invalid overrides file {}: {message}", path.display())]
    Config {
        /// Overrides file path.
        path: PathBuf,
        /// Parser diagnostic.
        message: String,
    },
}

impl Error {
    /// What: Wrap an `io::Error`, promoting `NotFound` to [`Error::NotFound`].
    ///
    /// Inputs:
    /// - `path`: Path the operation was performed on.
    /// - `source`: Error returned by the filesystem call.
    ///
    /// Output:
    /// - `Error::NotFound` for missing paths, `Error::Io` otherwise.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::NotFound { path }
        } else {
            Self::Io { path, source }
        }
    }

    /// Returns `true` for [`Error::NotFound`].
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Result type alias for theme operations.
pub type Result<T> = std::result::Result<T, Error>;
