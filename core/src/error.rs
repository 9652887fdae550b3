use std::fmt;
use thiserror::Error;

/// The error type for blobgate operations
#[derive(Error, Debug)]
#[error("{message}")]
pub struct Error {
    kind: ErrorKind,
    message: String,
    #[source]
    source: Option<anyhow::Error>,
}

/// The kind of error that occurred
///
/// Every storage operation fails with its own kind, so callers can tell which
/// operation failed without parsing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bearer token could not be obtained
    Auth,

    /// Blob could not be written
    Write,

    /// Blob could not be read
    Read,

    /// Blob could not be deleted
    Delete,

    /// Blob metadata could not be set
    Metadata,

    /// Configuration error (missing fields, invalid values)
    ConfigInvalid,
}

impl Error {
    /// Create a new error with the given kind and message
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Add a source error
    pub fn with_source(mut self, source: impl Into<anyhow::Error>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Prefix the message with call-site context.
    ///
    /// The kind and source are kept, the original message becomes the suffix:
    /// `"{context}: {message}"`.
    pub fn with_context(mut self, context: impl fmt::Display) -> Self {
        self.message = format!("{context}: {}", self.message);
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Get the error message without the source chain
    pub fn message(&self) -> &str {
        &self.message
    }
}

// Convenience constructors
impl Error {
    /// Create an auth error
    pub fn auth(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Auth, message)
    }

    /// Create a write error
    pub fn write(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Write, message)
    }

    /// Create a read error
    pub fn read(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Read, message)
    }

    /// Create a delete error
    pub fn delete(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Delete, message)
    }

    /// Create a metadata error
    pub fn metadata(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Metadata, message)
    }

    /// Create a config invalid error
    pub fn config_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ConfigInvalid, message)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Auth => write!(f, "auth error"),
            ErrorKind::Write => write!(f, "write error"),
            ErrorKind::Read => write!(f, "read error"),
            ErrorKind::Delete => write!(f, "delete error"),
            ErrorKind::Metadata => write!(f, "metadata error"),
            ErrorKind::ConfigInvalid => write!(f, "invalid configuration"),
        }
    }
}

/// Convenience type alias for Results
pub type Result<T> = std::result::Result<T, Error>;
