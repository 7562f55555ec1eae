//! In-memory store backing the rate cache.
//!
//! Uses `DashMap` so concurrent requests for different keys never contend on a
//! single lock; callers need no extra synchronisation around it.

use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use tokio::time::Instant;

use rates_types::DailyRates;

/// A thread-safe key-value store with per-entry expiry.
pub trait RateCache: Send + Sync {
    /// Returns the entry for `key` if present and not expired.
    fn get(&self, key: &str) -> Option<DailyRates>;

    /// Stores `rates` under `key`, replacing any existing entry, for `ttl`.
    fn insert(&self, key: String, rates: DailyRates, ttl: Duration);

    /// Removes the entry for `key`, if any.
    fn remove(&self, key: &str);
}

impl<S: RateCache + ?Sized> RateCache for Arc<S> {
    fn get(&self, key: &str) -> Option<DailyRates> {
        (**self).get(key)
    }

    fn insert(&self, key: String, rates: DailyRates, ttl: Duration) {
        (**self).insert(key, rates, ttl)
    }

    fn remove(&self, key: &str) {
        (**self).remove(key)
    }
}

#[derive(Debug, Clone)]
struct CacheEntry {
    rates: DailyRates,
    /// `None` when the TTL reaches past the clock's range; such entries never expire.
    expires_at: Option<Instant>,
}

impl CacheEntry {
    fn is_fresh(&self, now: Instant) -> bool {
        self.expires_at.is_none_or(|expires_at| expires_at > now)
    }
}

/// `DashMap`-backed [`RateCache`]. Expired entries are dropped lazily on lookup.
#[derive(Debug, Default)]
pub struct InMemoryRateCache {
    entries: DashMap<String, CacheEntry>,
}

impl InMemoryRateCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries, expired ones included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl RateCache for InMemoryRateCache {
    fn get(&self, key: &str) -> Option<DailyRates> {
        let now = Instant::now();

        // The read guard must be released before removing the key.
        match self.entries.get(key) {
            Some(entry) if entry.is_fresh(now) => return Some(entry.rates.clone()),
            Some(_) => {}
            None => return None,
        }

        self.entries.remove_if(key, |_, entry| !entry.is_fresh(now));
        None
    }

    fn insert(&self, key: String, rates: DailyRates, ttl: Duration) {
        let expires_at = Instant::now().checked_add(ttl);
        self.entries.insert(key, CacheEntry { rates, expires_at });
    }

    fn remove(&self, key: &str) {
        self.entries.remove(key);
    }
}
