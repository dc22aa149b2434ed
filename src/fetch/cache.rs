use std::collections::HashMap;
use std::hash::Hash;

use chrono::{DateTime, Duration, Utc};

/// Key-value store whose entries expire a fixed time after insertion.
///
/// Expired entries are replaced on the next insert for the same key; there is no
/// other eviction.
#[derive(Debug)]
pub struct TtlCache<K, V> {
    ttl: Duration,
    entries: HashMap<K, (DateTime<Utc>, V)>,
}

impl<K: Eq + Hash, V> TtlCache<K, V> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: HashMap::new(),
        }
    }

    /// Entry for `key` if it was inserted less than `ttl` before `now`.
    pub fn get(&self, key: &K, now: DateTime<Utc>) -> Option<&V> {
        self.entries
            .get(key)
            .filter(|(inserted_at, _)| now - *inserted_at < self.ttl)
            .map(|(_, value)| value)
    }

    pub fn insert(&mut self, key: K, value: V, now: DateTime<Utc>) {
        self.entries.insert(key, (now, value));
    }
}
