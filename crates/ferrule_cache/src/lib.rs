//! In-memory TLS session resumption cache.
//!
//! Hash-map lookup with LRU eviction and lazy expiration, mutex
//! protected so backend resumption callbacks can share one cache across
//! connection threads. Entries are opaque byte blobs; this crate knows
//! nothing about session encoding.

#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod cache;
pub mod error;

pub use cache::{
    CacheStats, SessionCache, SessionEntry, DEFAULT_CAPACITY, DEFAULT_TIMEOUT, MAX_SESSION_DATA,
    MAX_SESSION_ID,
};
pub use error::{Error, Result};
