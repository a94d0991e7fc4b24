//! Error types for priority string compilation.
//!
//! Every fallible operation returns a [`Result`] whose error carries the
//! full diagnostic payload inline: error kind, byte offset in the original
//! priority string, the offending token, and a human-readable message.
//! Nothing is reported through hidden shared state; the thread-local
//! snapshot kept by the pipeline facade is derived from these values.

use thiserror::Error;

use crate::model::VersionSet;

/// Maximum length of the offending-token echo in diagnostics.
pub const MAX_ERROR_TOKEN: usize = 64;

/// Maximum length of a diagnostic message.
pub const MAX_ERROR_MSG: usize = 256;

/// Categorical error kinds exposed to callers.
///
/// The full taxonomy is carried even where the safe Rust API cannot
/// produce a kind naturally: `NullInput` and `BufferTooSmall` exist for
/// FFI-style callers, and `UnknownModifier` is reserved because unknown
/// modifiers are deliberately tolerated (forward compatibility) rather
/// than rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorKind {
    /// Absent priority string (caller contract violation).
    NullInput,
    /// Invalid priority string syntax (for example an oversized token).
    SyntaxError,
    /// Base keyword not recognized.
    UnknownKeyword,
    /// Modifier not recognized (reserved, never raised).
    UnknownModifier,
    /// Conflicting specifications, such as a protocol version both
    /// enabled and disabled.
    Conflict,
    /// Feature accepted by the grammar but unsupported by the backend.
    Unsupported,
    /// Too many tokens or list entries; the bounded capacity was hit.
    TooComplex,
    /// Output buffer too small (reserved for bounded-buffer callers).
    BufferTooSmall,
    /// Protocol version name not recognized.
    InvalidVersion,
    /// Cipher name invalid or oversized.
    InvalidCipher,
    /// The backend rejected the mapped configuration.
    MapperFailed,
}

impl ErrorKind {
    /// Returns the canonical short description for this kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NullInput => "absent priority string",
            Self::SyntaxError => "invalid priority string syntax",
            Self::UnknownKeyword => "unknown priority keyword",
            Self::UnknownModifier => "unknown priority modifier",
            Self::Conflict => "conflicting priority specifications",
            Self::Unsupported => "unsupported priority feature",
            Self::TooComplex => "priority string too complex",
            Self::BufferTooSmall => "output buffer too small",
            Self::InvalidVersion => "invalid TLS version specification",
            Self::InvalidCipher => "invalid cipher name",
            Self::MapperFailed => "failed to apply backend configuration",
        }
    }
}

/// Snapshot of the most recent compilation failure.
///
/// One instance exists per calling thread in the pipeline facade and is
/// overwritten on every compiler invocation. The `token` and `message`
/// fields are truncated to [`MAX_ERROR_TOKEN`] and [`MAX_ERROR_MSG`].
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ErrorInfo {
    /// Categorical error kind.
    pub kind: ErrorKind,
    /// Byte offset of the offending token in the original string.
    pub offset: usize,
    /// Offending token text (truncated echo).
    pub token: String,
    /// Human-readable message.
    pub message: String,
}

impl ErrorInfo {
    /// Creates a snapshot, truncating token and message to their bounds.
    #[must_use]
    pub fn new(kind: ErrorKind, offset: usize, token: &str, message: &str) -> Self {
        Self {
            kind,
            offset,
            token: truncate_echo(token, MAX_ERROR_TOKEN),
            message: truncate_echo(message, MAX_ERROR_MSG),
        }
    }
}

/// Errors produced by the tokenizer and parser.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum Error {
    /// Absent priority string. Reserved for callers bridging from APIs
    /// where the input pointer may be null; the safe API cannot hit it.
    #[error("absent priority string")]
    NullInput,

    /// A token met or exceeded the maximum token length.
    #[error("syntax error at byte {offset}: token too long: '{token}'")]
    Syntax {
        /// Byte offset of the token in the input.
        offset: usize,
        /// Truncated echo of the oversized token.
        token: String,
    },

    /// The token count or a per-category list exceeded its bound.
    #[error("priority string too complex at byte {offset}: capacity bound exceeded")]
    TooComplex {
        /// Byte offset where the bound was hit.
        offset: usize,
    },

    /// A keyword-category token did not match any known base keyword.
    #[error("unknown keyword '{token}' at byte {offset}")]
    UnknownKeyword {
        /// Byte offset of the token in the input.
        offset: usize,
        /// The unrecognized keyword text.
        token: String,
    },

    /// A modifier was not recognized. Reserved: unknown modifiers are
    /// tolerated by design and this variant is currently never produced.
    #[error("unknown modifier '{token}' at byte {offset}")]
    UnknownModifier {
        /// Byte offset of the token in the input.
        offset: usize,
        /// The unrecognized modifier text.
        token: String,
    },

    /// A `VERS-` token did not name a known protocol version.
    #[error("invalid TLS version '{token}' at byte {offset}")]
    InvalidVersion {
        /// Byte offset of the token in the input.
        offset: usize,
        /// The unrecognized version text.
        token: String,
    },

    /// A cipher-like name was invalid or oversized.
    #[error("invalid cipher name '{token}' at byte {offset}")]
    InvalidCipher {
        /// Byte offset of the token in the input.
        offset: usize,
        /// Truncated echo of the cipher name.
        token: String,
    },

    /// One or more protocol versions were both enabled and disabled.
    #[error("conflicting versions, both enabled and disabled: {versions}")]
    Conflict {
        /// The overlapping versions.
        versions: VersionSet,
    },
}

impl Error {
    /// Returns the categorical kind for this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::NullInput => ErrorKind::NullInput,
            Self::Syntax { .. } => ErrorKind::SyntaxError,
            Self::TooComplex { .. } => ErrorKind::TooComplex,
            Self::UnknownKeyword { .. } => ErrorKind::UnknownKeyword,
            Self::UnknownModifier { .. } => ErrorKind::UnknownModifier,
            Self::InvalidVersion { .. } => ErrorKind::InvalidVersion,
            Self::InvalidCipher { .. } => ErrorKind::InvalidCipher,
            Self::Conflict { .. } => ErrorKind::Conflict,
        }
    }

    /// Returns the byte offset of the offending token, if positional.
    #[must_use]
    pub const fn offset(&self) -> usize {
        match self {
            Self::Syntax { offset, .. }
            | Self::TooComplex { offset }
            | Self::UnknownKeyword { offset, .. }
            | Self::UnknownModifier { offset, .. }
            | Self::InvalidVersion { offset, .. }
            | Self::InvalidCipher { offset, .. } => *offset,
            Self::NullInput | Self::Conflict { .. } => 0,
        }
    }

    /// Returns the offending token text, if any.
    #[must_use]
    pub fn token(&self) -> &str {
        match self {
            Self::Syntax { token, .. }
            | Self::UnknownKeyword { token, .. }
            | Self::UnknownModifier { token, .. }
            | Self::InvalidVersion { token, .. }
            | Self::InvalidCipher { token, .. } => token,
            Self::NullInput | Self::TooComplex { .. } | Self::Conflict { .. } => "",
        }
    }

    /// Builds the diagnostic snapshot for this error.
    #[must_use]
    pub fn info(&self) -> ErrorInfo {
        ErrorInfo::new(self.kind(), self.offset(), self.token(), &self.to_string())
    }
}

/// Truncates a string to at most `max` characters, appending `...` when
/// anything was cut. Used for echoing oversized tokens in diagnostics.
#[must_use]
pub fn truncate_echo(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}

/// Result type alias for priority string operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_maps_each_variant() {
        let err = Error::Syntax {
            offset: 3,
            token: "X".to_string(),
        };
        assert_eq!(err.kind(), ErrorKind::SyntaxError);
        assert_eq!(Error::NullInput.kind(), ErrorKind::NullInput);
        assert_eq!(
            Error::Conflict {
                versions: VersionSet::EMPTY
            }
            .kind(),
            ErrorKind::Conflict
        );
    }

    #[test]
    fn info_carries_position_and_token() {
        let err = Error::UnknownKeyword {
            offset: 7,
            token: "BOGUS".to_string(),
        };
        let info = err.info();
        assert_eq!(info.kind, ErrorKind::UnknownKeyword);
        assert_eq!(info.offset, 7);
        assert_eq!(info.token, "BOGUS");
        assert!(info.message.contains("BOGUS"));
    }

    #[test]
    fn truncate_echo_bounds_long_input() {
        let long = "A".repeat(500);
        let echoed = truncate_echo(&long, MAX_ERROR_TOKEN);
        assert!(echoed.chars().count() <= MAX_ERROR_TOKEN);
        assert!(echoed.ends_with("..."));
    }

    #[test]
    fn truncate_echo_keeps_short_input() {
        assert_eq!(truncate_echo("NORMAL", MAX_ERROR_TOKEN), "NORMAL");
    }
}
