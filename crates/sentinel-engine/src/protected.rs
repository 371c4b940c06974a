//! Allies currently under the agent's protection.

use sentinel_core::types::Millis;

use crate::ttl::TtlMap;

/// Ally names with an expiry. Every guard trigger refreshes the entry.
#[derive(Debug, Clone)]
pub struct ProtectedPlayers {
    ttl_ms: Millis,
    players: TtlMap<String>,
}

impl ProtectedPlayers {
    pub fn new(ttl_ms: Millis) -> Self {
        Self {
            ttl_ms,
            players: TtlMap::new(),
        }
    }

    pub fn protect(&mut self, username: &str, now: Millis) {
        self.players.insert(username.to_string(), now, self.ttl_ms);
    }

    pub fn is_protected(&mut self, username: &str, now: Millis) -> bool {
        self.players.contains(&username.to_string(), now)
    }

    pub fn prune(&mut self, now: Millis) -> usize {
        self.players.prune(now)
    }

    pub fn names(&self, now: Millis) -> Vec<String> {
        self.players.live_keys(now)
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}
