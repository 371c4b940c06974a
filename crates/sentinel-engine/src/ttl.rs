//! Expiry-indexed map: key → expiry time.
//!
//! Entries are dropped lazily when looked up past their expiry, or in bulk by
//! `prune`.

use std::collections::BTreeMap;

use sentinel_core::types::Millis;

#[derive(Debug, Clone)]
pub struct TtlMap<K: Ord> {
    expiry: BTreeMap<K, Millis>,
}

impl<K: Ord> Default for TtlMap<K> {
    fn default() -> Self {
        Self {
            expiry: BTreeMap::new(),
        }
    }
}

impl<K: Ord + Clone> TtlMap<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or refresh `key`, live until `now + ttl`.
    pub fn insert(&mut self, key: K, now: Millis, ttl: Millis) {
        self.expiry.insert(key, now.saturating_add(ttl));
    }

    /// Whether `key` is live at `now`. Drops it if expired.
    pub fn contains(&mut self, key: &K, now: Millis) -> bool {
        match self.expiry.get(key) {
            Some(&until) if now < until => true,
            Some(_) => {
                self.expiry.remove(key);
                false
            }
            None => false,
        }
    }

    /// Drop every expired entry. Returns how many were dropped.
    pub fn prune(&mut self, now: Millis) -> usize {
        let before = self.expiry.len();
        self.expiry.retain(|_, until| now < *until);
        before - self.expiry.len()
    }

    pub fn remove(&mut self, key: &K) -> bool {
        self.expiry.remove(key).is_some()
    }

    /// Live keys at `now`, in key order.
    pub fn live_keys(&self, now: Millis) -> Vec<K> {
        self.expiry
            .iter()
            .filter(|(_, &until)| now < until)
            .map(|(k, _)| k.clone())
            .collect()
    }

    /// Entries held, expired or not.
    pub fn len(&self) -> usize {
        self.expiry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expiry.is_empty()
    }
}
