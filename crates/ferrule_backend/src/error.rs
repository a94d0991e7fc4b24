//! Error types for mapping and application.

use thiserror::Error;

use ferrule_priority::{ErrorInfo, ErrorKind};

/// Errors that can occur while compiling or applying a priority string.
#[derive(Debug, Error)]
pub enum Error {
    /// Tokenizer or parser failure, carried through unchanged.
    #[error(transparent)]
    Priority(#[from] ferrule_priority::Error),

    /// The backend rejected part of the mapped configuration. The handle
    /// is left in whatever partially-configured state the failing call
    /// produced; callers needing atomicity must apply to a fresh handle.
    #[error("backend rejected {operation}: {message}")]
    Apply {
        /// The configuration operation that was rejected.
        operation: &'static str,
        /// Backend-provided failure detail.
        message: String,
    },
}

impl Error {
    /// Returns the categorical kind for this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Priority(inner) => inner.kind(),
            Self::Apply { .. } => ErrorKind::MapperFailed,
        }
    }

    /// Builds the diagnostic snapshot for this error.
    #[must_use]
    pub fn info(&self) -> ErrorInfo {
        match self {
            Self::Priority(inner) => inner.info(),
            Self::Apply { .. } => ErrorInfo::new(self.kind(), 0, "", &self.to_string()),
        }
    }
}

/// Result type alias for backend operations.
pub type Result<T> = std::result::Result<T, Error>;
