//! Backend half of the Ferrule priority string compiler.
//!
//! Consumes the [`ferrule_priority`] policy model and produces concrete
//! backend configuration: cipher list strings, a protocol version range
//! and an options bitmask. The [`pipeline`] module ties the phases into
//! the three public entry points ([`set_priority_string`],
//! [`validate_priority_string`], [`compile_priority_string`]) and keeps
//! the per-thread diagnostic snapshot behind [`last_error`].
//!
//! Nothing in this crate links against a real TLS library; the
//! [`BackendContext`] trait is the seam where one plugs in.

#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod apply;
pub mod config;
pub mod error;
pub mod fingerprint;
pub mod mapper;
pub mod pipeline;

pub use apply::{apply, BackendContext};
pub use config::{BackendConfig, OptionsMask, MAX_CIPHER_LIST};
pub use error::{Error, Result};
pub use mapper::map;
pub use pipeline::{
    compile_priority_string, last_error, set_priority_string, validate_priority_string,
};
