//! Unified error types for chatport.
//!
//! Only conditions that are fatal to a whole run live here: an input file
//! that cannot be read, an archive that cannot be created or written, a
//! report that cannot be serialized. Per-message and per-media problems are
//! not errors in this sense; they are collected as
//! [`ExtractIssue`](crate::parsers::ExtractIssue) values or logged through
//! [`Diagnostics`](crate::diagnostics::Diagnostics) and never abort a run.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A specialized [`Result`] type for chatport operations.
///
/// # Example
///
/// ```rust
/// use chatport::error::Result;
/// use chatport::Message;
///
/// fn my_function() -> Result<Vec<Message>> {
///     Ok(vec![])
/// }
/// ```
pub type Result<T> = std::result::Result<T, ChatportError>;

/// The error type for all fatal chatport conditions.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ChatportError {
    /// An I/O error without more specific context.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// An input HTML file (or input directory) could not be read.
    #[error("Failed to read input {}: {source}", path.display())]
    ReadInput {
        /// The path that could not be read
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Directory mode found nothing to convert.
    #[error("No .html export files found in {}", dir.display())]
    NoInputFiles {
        /// The directory that was scanned
        dir: PathBuf,
    },

    /// The input path is not usable for the selected mode.
    ///
    /// This occurs when:
    /// - a directory is passed in single-file mode (or the other way round)
    /// - the archive name cannot be derived from the path
    #[error("Invalid input {}: {message}", path.display())]
    InvalidInput {
        /// The offending path
        path: PathBuf,
        /// Description of what's wrong
        message: String,
    },

    /// The archive container could not be created or finalized.
    #[error("Failed to write archive {}: {source}", path.display())]
    Archive {
        /// Destination path of the archive
        path: PathBuf,
        /// The underlying zip error
        #[source]
        source: zip::result::ZipError,
    },

    /// The chat entry could not be written into the archive.
    #[error("Failed to write archive entry '{name}': {source}")]
    ArchiveEntry {
        /// Entry name inside the archive
        name: String,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },

    /// JSON serialization error (run report).
    #[cfg(feature = "json-report")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl ChatportError {
    /// Creates an input read error.
    pub fn read_input(path: impl Into<PathBuf>, source: io::Error) -> Self {
        ChatportError::ReadInput {
            path: path.into(),
            source,
        }
    }

    /// Creates an invalid input error.
    pub fn invalid_input(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        ChatportError::InvalidInput {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Creates an archive container error.
    pub fn archive(path: impl Into<PathBuf>, source: zip::result::ZipError) -> Self {
        ChatportError::Archive {
            path: path.into(),
            source,
        }
    }

    /// Creates an archive entry write error.
    pub fn archive_entry(name: impl Into<String>, source: io::Error) -> Self {
        ChatportError::ArchiveEntry {
            name: name.into(),
            source,
        }
    }

    /// Returns `true` if this is an IO error (generic or input read).
    pub fn is_io(&self) -> bool {
        matches!(self, ChatportError::Io(_) | ChatportError::ReadInput { .. })
    }

    /// Returns `true` if this error concerns the archive output.
    pub fn is_archive(&self) -> bool {
        matches!(
            self,
            ChatportError::Archive { .. } | ChatportError::ArchiveEntry { .. }
        )
    }

    /// Returns `true` if this is an invalid input error.
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            ChatportError::InvalidInput { .. } | ChatportError::NoInputFiles { .. }
        )
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_display() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err = ChatportError::from(io_err);
        let display = err.to_string();
        assert!(display.contains("IO error"));
        assert!(display.contains("file not found"));
    }

    #[test]
    fn test_read_input_display() {
        let err = ChatportError::read_input(
            "/exports/messages.html",
            io::Error::new(io::ErrorKind::PermissionDenied, "access denied"),
        );
        let display = err.to_string();
        assert!(display.contains("/exports/messages.html"));
        assert!(display.contains("access denied"));
        assert!(err.is_io());
    }

    #[test]
    fn test_no_input_files_display() {
        let err = ChatportError::NoInputFiles {
            dir: PathBuf::from("/exports/empty"),
        };
        assert!(err.to_string().contains("/exports/empty"));
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_invalid_input_display() {
        let err = ChatportError::invalid_input("/exports", "expected a file");
        let display = err.to_string();
        assert!(display.contains("/exports"));
        assert!(display.contains("expected a file"));
        assert!(!err.is_archive());
    }

    #[test]
    fn test_archive_errors() {
        let err = ChatportError::archive("out.zip", zip::result::ZipError::FileNotFound);
        assert!(err.is_archive());
        assert!(err.to_string().contains("out.zip"));

        let err = ChatportError::archive_entry("_chat.txt", io::Error::other("disk full"));
        assert!(err.is_archive());
        assert!(err.to_string().contains("_chat.txt"));
        assert!(err.to_string().contains("disk full"));
    }

    #[test]
    fn test_error_source_chain() {
        use std::error::Error;
        let err = ChatportError::read_input("a.html", io::Error::other("boom"));
        assert!(err.source().is_some());
    }

    #[cfg(feature = "json-report")]
    #[test]
    fn test_from_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid").unwrap_err();
        let err: ChatportError = json_err.into();
        assert!(err.to_string().contains("JSON error"));
    }

    #[test]
    fn test_error_debug() {
        let err = ChatportError::invalid_input("x", "bad");
        let debug = format!("{:?}", err);
        assert!(debug.contains("InvalidInput"));
    }
}
