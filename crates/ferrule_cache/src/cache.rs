//! Thread-safe in-memory session cache with LRU eviction.
//!
//! Lookup is a hash map keyed by session ID; recency is a separate
//! ordered index of monotonically increasing access stamps, so eviction
//! pops the smallest stamp in O(log n). Expired entries are removed
//! lazily on access, with [`SessionCache::cleanup_expired`] available
//! for proactive sweeps.

use std::collections::{BTreeMap, HashMap};
use std::net::SocketAddr;
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::{debug, trace};

use crate::error::{Error, Result};

/// Maximum session ID length in bytes.
pub const MAX_SESSION_ID: usize = 256;

/// Maximum serialized session state in bytes.
pub const MAX_SESSION_DATA: usize = 4096;

/// Default cache capacity in entries.
pub const DEFAULT_CAPACITY: usize = 1000;

/// Default session timeout (two hours).
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(7200);

/// Point-in-time cache counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Current number of cached sessions.
    pub count: usize,
    /// Configured maximum capacity.
    pub capacity: usize,
    /// Successful retrievals.
    pub hits: u64,
    /// Failed retrievals, including expired entries.
    pub misses: u64,
    /// Entries dropped to make room for new ones.
    pub evictions: u64,
    /// Entries dropped because they outlived the timeout.
    pub expirations: u64,
}

/// A retrieved session: the opaque state blob plus the peer it was
/// established with, when the backend recorded one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionEntry {
    /// Serialized session state.
    pub data: Vec<u8>,
    /// Remote peer address at establishment time.
    pub peer: Option<SocketAddr>,
}

#[derive(Debug)]
struct Entry {
    data: Vec<u8>,
    peer: Option<SocketAddr>,
    stored_at: Instant,
    stamp: u64,
}

#[derive(Debug, Default)]
struct Inner {
    entries: HashMap<Vec<u8>, Entry>,
    // Access stamp -> session ID. Stamps are unique, so no bucket lists.
    recency: BTreeMap<u64, Vec<u8>>,
    next_stamp: u64,
    hits: u64,
    misses: u64,
    evictions: u64,
    expirations: u64,
}

impl Inner {
    fn touch(&mut self, id: &[u8]) {
        let stamp = self.next_stamp;
        self.next_stamp += 1;
        if let Some(entry) = self.entries.get_mut(id) {
            self.recency.remove(&entry.stamp);
            entry.stamp = stamp;
            self.recency.insert(stamp, id.to_vec());
        }
    }

    fn drop_entry(&mut self, id: &[u8]) -> Option<Entry> {
        let entry = self.entries.remove(id)?;
        self.recency.remove(&entry.stamp);
        Some(entry)
    }

    fn evict_lru(&mut self) {
        if let Some((&stamp, _)) = self.recency.iter().next() {
            if let Some(id) = self.recency.remove(&stamp) {
                self.entries.remove(&id);
                self.evictions += 1;
                trace!(id_len = id.len(), "evicted least recently used session");
            }
        }
    }
}

/// Thread-safe session resumption cache.
///
/// All operations take `&self`; interior mutability is a single mutex.
/// The critical sections are short (map operations only), so one lock
/// is simpler and no slower than sharding at the scale this serves.
#[derive(Debug)]
pub struct SessionCache {
    inner: Mutex<Inner>,
    capacity: usize,
    timeout: Duration,
}

impl SessionCache {
    /// Creates a cache with the given capacity and entry timeout.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ZeroCapacity`] or [`Error::ZeroTimeout`] for
    /// degenerate parameters.
    pub fn new(capacity: usize, timeout: Duration) -> Result<Self> {
        if capacity == 0 {
            return Err(Error::ZeroCapacity);
        }
        if timeout.is_zero() {
            return Err(Error::ZeroTimeout);
        }
        Ok(Self {
            inner: Mutex::new(Inner::default()),
            capacity,
            timeout,
        })
    }

    /// Creates a cache with the default capacity and timeout.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self {
            inner: Mutex::new(Inner::default()),
            capacity: DEFAULT_CAPACITY,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Stores a session, replacing any entry under the same ID.
    ///
    /// Evicts the least recently used entry when the cache is full.
    ///
    /// # Errors
    ///
    /// Rejects empty or oversized session IDs and oversized data.
    pub fn store(&self, session_id: &[u8], data: &[u8], peer: Option<SocketAddr>) -> Result<()> {
        if session_id.is_empty() {
            return Err(Error::EmptySessionId);
        }
        if session_id.len() > MAX_SESSION_ID {
            return Err(Error::SessionIdTooLarge {
                len: session_id.len(),
            });
        }
        if data.len() > MAX_SESSION_DATA {
            return Err(Error::SessionDataTooLarge { len: data.len() });
        }

        let mut inner = self.lock();
        if inner.drop_entry(session_id).is_none() && inner.entries.len() >= self.capacity {
            inner.evict_lru();
        }
        let stamp = inner.next_stamp;
        inner.next_stamp += 1;
        inner.recency.insert(stamp, session_id.to_vec());
        inner.entries.insert(
            session_id.to_vec(),
            Entry {
                data: data.to_vec(),
                peer,
                stored_at: Instant::now(),
                stamp,
            },
        );
        debug!(id_len = session_id.len(), data_len = data.len(), "stored session");
        Ok(())
    }

    /// Retrieves a session by ID, refreshing its recency.
    ///
    /// Expired entries are removed and reported as a miss.
    #[must_use]
    pub fn retrieve(&self, session_id: &[u8]) -> Option<SessionEntry> {
        let mut inner = self.lock();
        let Some(entry) = inner.entries.get(session_id) else {
            inner.misses += 1;
            return None;
        };
        if entry.stored_at.elapsed() > self.timeout {
            inner.drop_entry(session_id);
            inner.expirations += 1;
            inner.misses += 1;
            return None;
        }
        let found = SessionEntry {
            data: entry.data.clone(),
            peer: entry.peer,
        };
        inner.hits += 1;
        inner.touch(session_id);
        Some(found)
    }

    /// Removes a session by ID. Returns true if an entry was removed.
    pub fn remove(&self, session_id: &[u8]) -> bool {
        self.lock().drop_entry(session_id).is_some()
    }

    /// Removes all cached sessions. Counters are preserved.
    pub fn clear(&self) {
        let mut inner = self.lock();
        inner.entries.clear();
        inner.recency.clear();
    }

    /// Removes every expired entry and returns how many were dropped.
    ///
    /// Expiration also happens lazily on retrieval; this sweep exists
    /// for callers that want to bound memory between accesses.
    pub fn cleanup_expired(&self) -> usize {
        let mut inner = self.lock();
        let expired: Vec<Vec<u8>> = inner
            .entries
            .iter()
            .filter(|(_, entry)| entry.stored_at.elapsed() > self.timeout)
            .map(|(id, _)| id.clone())
            .collect();
        for id in &expired {
            inner.drop_entry(id);
            inner.expirations += 1;
        }
        if !expired.is_empty() {
            debug!(removed = expired.len(), "swept expired sessions");
        }
        expired.len()
    }

    /// Current number of cached sessions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    /// Returns true when no sessions are cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns true when the cache is at capacity.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.len() >= self.capacity
    }

    /// Returns a snapshot of the cache counters.
    #[must_use]
    pub fn stats(&self) -> CacheStats {
        let inner = self.lock();
        CacheStats {
            count: inner.entries.len(),
            capacity: self.capacity,
            hits: inner.hits,
            misses: inner.misses,
            evictions: inner.evictions,
            expirations: inner.expirations,
        }
    }
}
