//! Error types for the session cache.

use thiserror::Error;

use crate::cache::{MAX_SESSION_DATA, MAX_SESSION_ID};

/// Errors from cache construction and entry insertion.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// Cache capacity must be at least one entry.
    #[error("session cache capacity must be non-zero")]
    ZeroCapacity,

    /// Session timeout must be non-zero.
    #[error("session timeout must be non-zero")]
    ZeroTimeout,

    /// Session ID exceeds the protocol bound.
    #[error("session ID of {len} bytes exceeds the {MAX_SESSION_ID}-byte limit")]
    SessionIdTooLarge {
        /// Length of the offered session ID.
        len: usize,
    },

    /// Serialized session state exceeds the storage bound.
    #[error("session data of {len} bytes exceeds the {MAX_SESSION_DATA}-byte limit")]
    SessionDataTooLarge {
        /// Length of the offered session data.
        len: usize,
    },

    /// The session ID is empty.
    #[error("session ID must not be empty")]
    EmptySessionId,
}

/// Result type alias for cache operations.
pub type Result<T> = std::result::Result<T, Error>;
