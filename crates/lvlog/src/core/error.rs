//! Error handling for lvlog
//!
//! Every fallible operation returns [`Result<T>`], an alias for
//! `std::result::Result<T, Error>`. Nothing is swallowed: a failed
//! `configure` returns the error to its caller and a failed lazy file
//! creation is returned from the `emit` call that needed the file.

use std::io;
use std::path::PathBuf;

/// Result type for logger operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for logger operations
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The log folder (or one of its parents) could not be created
    #[error("failed to create log directory '{}': {source}", path.display())]
    CreateDir {
        /// Directory that was being created
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: io::Error,
    },

    /// A log file could not be opened for appending
    #[error("failed to open log file '{}': {source}", path.display())]
    OpenFile {
        /// File that was being opened
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: io::Error,
    },

    /// Writing a formatted line to its destination failed
    #[error("failed to write log line to {target}: {source}")]
    Write {
        /// Human-readable destination (`stdout` or a file path)
        target: String,
        /// Underlying IO error
        #[source]
        source: io::Error,
    },

    /// A configuration document could not be parsed
    #[error("invalid configuration: {0}")]
    InvalidConfig(#[from] serde_json::Error),

    /// Strict level parsing rejected its input
    #[error("unknown log level '{0}'")]
    UnknownLevel(String),

    /// The tracing bridge could not be installed
    #[error("failed to install tracing subscriber: {0}")]
    Subscriber(String),
}

impl Error {
    /// Returns the IO error behind this error, if there is one
    #[must_use]
    pub fn io_error(&self) -> Option<&io::Error> {
        match self {
            Self::CreateDir { source, .. }
            | Self::OpenFile { source, .. }
            | Self::Write { source, .. } => Some(source),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_carry_path() {
        let error = Error::OpenFile {
            path: PathBuf::from("/var/log/app.log"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        let message = error.to_string();
        assert!(message.contains("/var/log/app.log"));
        assert!(message.contains("denied"));
        assert_eq!(
            error.io_error().map(io::Error::kind),
            Some(io::ErrorKind::PermissionDenied)
        );
    }

    #[test]
    fn test_unknown_level_has_no_io_source() {
        let error = Error::UnknownLevel("verbose".into());
        assert_eq!(error.to_string(), "unknown log level 'verbose'");
        assert!(error.io_error().is_none());
    }
}
