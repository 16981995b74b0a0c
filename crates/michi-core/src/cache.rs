//! Bounded, time-expiring in-memory store.
//!
//! Lookups against third-party services (places, images) are memoised here.
//! The cache is an owned value, not process-global state: whoever needs one
//! holds it, usually behind a `Mutex` as [`crate::places::CachedPlaceLookup`]
//! does.

use std::{borrow::Borrow, collections::HashMap, hash::Hash};

use jiff::{SignedDuration, Timestamp};
use log::debug;

#[derive(Debug, Clone)]
struct Entry<V> {
    value: V,
    inserted_at: Timestamp,
    /// Insertion order, breaks ties between entries with equal timestamps
    sequence: u64,
}

/// A key-value map holding at most `capacity` entries, each valid for `ttl`
/// after insertion.
///
/// Expired entries behave as misses and are dropped when seen. Inserting into
/// a full cache first purges expired entries; if it is still full, the oldest
/// insertion is evicted.
#[derive(Debug, Clone)]
pub struct ExpiringCache<K, V> {
    entries: HashMap<K, Entry<V>>,
    capacity: usize,
    ttl: SignedDuration,
    next_sequence: u64,
}

impl<K, V> ExpiringCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    /// Create an empty cache. A zero capacity is treated as one.
    pub fn new(capacity: usize, ttl: SignedDuration) -> Self {
        Self {
            entries: HashMap::new(),
            capacity: capacity.max(1),
            ttl,
            next_sequence: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn ttl(&self) -> SignedDuration {
        self.ttl
    }

    /// Number of stored entries, expired ones included until purged.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up `key` as of the current time.
    pub fn get<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.get_at(key, Timestamp::now())
    }

    /// Look up `key` as of `now`, removing it if it has expired.
    pub fn get_at<Q>(&mut self, key: &Q, now: Timestamp) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let expired = self.is_expired(self.entries.get(key)?, now);
        if expired {
            self.entries.remove(key);
            return None;
        }
        self.entries.get(key).map(|entry| entry.value.clone())
    }

    /// Store `value` under `key` as of the current time.
    pub fn insert(&mut self, key: K, value: V) {
        self.insert_at(key, value, Timestamp::now());
    }

    /// Store `value` under `key` as of `now`, evicting if the cache is full.
    ///
    /// Re-inserting an existing key refreshes its timestamp and never evicts.
    pub fn insert_at(&mut self, key: K, value: V, now: Timestamp) {
        if !self.entries.contains_key(&key) && self.entries.len() >= self.capacity {
            self.purge_expired(now);
            if self.entries.len() >= self.capacity {
                self.evict_oldest();
            }
        }

        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.entries.insert(
            key,
            Entry {
                value,
                inserted_at: now,
                sequence,
            },
        );
    }

    /// Drop every entry that has expired as of `now`; returns how many.
    pub fn purge_expired(&mut self, now: Timestamp) -> usize {
        let before = self.entries.len();
        let ttl = self.ttl;
        self.entries
            .retain(|_, entry| now.duration_since(entry.inserted_at) < ttl);
        let purged = before - self.entries.len();
        if purged > 0 {
            debug!("Purged {purged} expired cache entries");
        }
        purged
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    fn is_expired(&self, entry: &Entry<V>, now: Timestamp) -> bool {
        now.duration_since(entry.inserted_at) >= self.ttl
    }

    fn evict_oldest(&mut self) {
        let oldest = self
            .entries
            .iter()
            .min_by_key(|(_, entry)| (entry.inserted_at, entry.sequence))
            .map(|(key, _)| key.clone());
        if let Some(key) = oldest {
            self.entries.remove(&key);
        }
    }
}
