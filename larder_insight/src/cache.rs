//! Time-bounded result cache
//!
//! The cache is an ordinary value owned by the caller. Entries carry their
//! insertion instant; an entry whose age has reached the TTL is never
//! returned. Expired entries are dropped on every insert, so the map holds
//! at most the entries written within one TTL.

use crate::clock::{Clock, SystemClock};
use crate::error::Result;
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use std::collections::HashMap;
use std::hash::Hash;

#[derive(Debug, Clone)]
struct Entry<V> {
    value: V,
    stored_at: DateTime<Utc>,
}

/// Map with per-entry expiry driven by a [`Clock`]
#[derive(Debug, Clone)]
pub struct TtlCache<K, V, C: Clock = SystemClock> {
    entries: HashMap<K, Entry<V>>,
    ttl: Duration,
    clock: C,
}

impl<K: Eq + Hash, V> TtlCache<K, V, SystemClock> {
    /// Cache on wall-clock time
    pub fn with_ttl(ttl: Duration) -> Self {
        Self::new(ttl, SystemClock)
    }
}

impl<K: Eq + Hash, V, C: Clock> TtlCache<K, V, C> {
    pub fn new(ttl: Duration, clock: C) -> Self {
        Self {
            entries: HashMap::new(),
            ttl,
            clock,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    fn is_live(&self, entry: &Entry<V>, now: DateTime<Utc>) -> bool {
        now.signed_duration_since(entry.stored_at) < self.ttl
    }

    /// Value for `key` if present and younger than the TTL
    pub fn get(&self, key: &K) -> Option<&V> {
        let now = self.clock.now();
        self.entries
            .get(key)
            .filter(|entry| self.is_live(entry, now))
            .map(|entry| &entry.value)
    }

    /// Insert or replace, stamping the entry with the current instant.
    ///
    /// Expired entries are purged first.
    pub fn set(&mut self, key: K, value: V) {
        self.purge_expired();
        let stored_at = self.clock.now();
        self.entries.insert(key, Entry { value, stored_at });
    }

    /// Remove `key`, returning its value even if it had expired
    pub fn remove(&mut self, key: &K) -> Option<V> {
        self.entries.remove(key).map(|entry| entry.value)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Drop expired entries and return how many were removed
    pub fn purge_expired(&mut self) -> usize {
        let now = self.clock.now();
        let ttl = self.ttl;
        let before = self.entries.len();
        self.entries
            .retain(|_, entry| now.signed_duration_since(entry.stored_at) < ttl);
        before - self.entries.len()
    }

    /// Number of stored entries, including expired ones not yet purged
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Cache key for a serializable request: `prefix` followed by its full JSON
/// encoding.
pub fn fingerprint<T: Serialize + ?Sized>(prefix: &str, request: &T) -> Result<String> {
    let encoded = serde_json::to_string(request)?;
    Ok(format!("{}_{}", prefix, encoded))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use chrono::TimeZone;

    fn manual() -> ManualClock {
        ManualClock::new(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap())
    }

    #[test]
    fn test_expires_at_ttl() {
        let clock = manual();
        let mut cache = TtlCache::new(Duration::seconds(10), clock.clone());
        cache.set("a", 1);

        clock.advance(Duration::seconds(9));
        assert_eq!(cache.get(&"a"), Some(&1));

        clock.advance(Duration::seconds(1));
        assert_eq!(cache.get(&"a"), None);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.purge_expired(), 1);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_set_evicts_expired_entries() {
        let clock = manual();
        let mut cache = TtlCache::new(Duration::seconds(1), clock.clone());

        for key in 0..1000 {
            cache.set(key, key * 2);
            clock.advance(Duration::seconds(5));
        }

        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get(&999), None);
    }

    #[test]
    fn test_fingerprint_distinguishes_values() {
        let a = fingerprint("analysis", &[1.0, 2.0]).unwrap();
        let b = fingerprint("analysis", &[1.0, 2.5]).unwrap();
        assert_ne!(a, b);
        assert_eq!(a, "analysis_[1.0,2.0]");
    }
}
