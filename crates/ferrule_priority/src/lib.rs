//! GnuTLS priority string front end for Ferrule.
//!
//! This crate implements the backend-agnostic half of the priority
//! string compiler: tokenizer, classifier and parser. The output is a
//! [`PolicyConfig`] that a backend mapper translates into concrete
//! cipher lists, version bounds and option flags.
//!
//! All functions are pure and reentrant: no shared mutable state, no
//! I/O, nothing to cancel. Capacity bounds are enforced explicitly
//! (rejecting with `TooComplex`) rather than by unbounded growth, so a
//! hostile priority string cannot exhaust memory on a reconfiguration
//! path.
//!
//! # Contract notes
//!
//! - Unknown **modifiers** are tolerated and skipped; unknown
//!   **keywords** abort with an error. The asymmetry is intentional:
//!   modifiers are cosmetic flags a foreign policy string may carry,
//!   keywords change the meaning of everything after them.
//! - Duplicate base keywords follow last-wins semantics.
//!
//! # Example
//!
//! ```rust
//! use ferrule_priority::{parse, tokenize, BaseKeyword};
//!
//! let tokens = tokenize("NORMAL:%SERVER_PRECEDENCE:-VERS-TLS1.0").unwrap();
//! let policy = parse(&tokens).unwrap();
//! assert_eq!(policy.base_keyword, Some(BaseKeyword::Normal));
//! assert!(policy.server_precedence);
//! ```

#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod error;
pub mod model;
pub mod parser;
pub mod token;
pub mod tokenizer;

pub use error::{Error, ErrorInfo, ErrorKind, Result};
pub use model::{BaseKeyword, PolicyConfig, ProtocolVersion, VersionSet};
pub use parser::parse;
pub use token::{Token, TokenCategory, TokenList, MAX_TOKENS, MAX_TOKEN_LEN};
pub use tokenizer::{classify, tokenize};
