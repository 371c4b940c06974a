//! Hostility ledger: players that attacked the agent recently.
//!
//! Each record is the time of the player's last attack. A record is live for
//! `window_ms` after that; expired records are evicted lazily on lookup or by
//! `sweep`, and every eviction queues a forgiveness transition the owner can
//! drain with `take_forgiven`.

use std::collections::BTreeMap;

use sentinel_core::types::Millis;

#[derive(Debug, Clone)]
pub struct HostilityLedger {
    window_ms: Millis,
    last_attack: BTreeMap<String, Millis>,
    forgiven: Vec<String>,
}

impl HostilityLedger {
    pub fn new(window_ms: Millis) -> Self {
        Self {
            window_ms,
            last_attack: BTreeMap::new(),
            forgiven: Vec::new(),
        }
    }

    pub fn window_ms(&self) -> Millis {
        self.window_ms
    }

    /// Record an attack by `player` at `now`, restarting its forgiveness window.
    /// A queued forgiveness for `player` is withdrawn.
    pub fn mark_hostile(&mut self, player: &str, now: Millis) {
        self.forgiven.retain(|name| name != player);
        self.last_attack.insert(player.to_string(), now);
    }

    /// Whether `player` is hostile at `now`. Evicts the record if it expired.
    pub fn is_hostile(&mut self, player: &str, now: Millis) -> bool {
        match self.last_attack.get(player) {
            None => false,
            Some(&at) if self.live(at, now) => true,
            Some(_) => {
                self.evict(player);
                false
            }
        }
    }

    /// Read-only variant of `is_hostile`; expired records read as not hostile.
    pub fn is_hostile_at(&self, player: &str, now: Millis) -> bool {
        self.last_attack
            .get(player)
            .is_some_and(|&at| self.live(at, now))
    }

    /// Explicitly evict `player`. Returns false if it was not recorded.
    pub fn forgive(&mut self, player: &str) -> bool {
        self.evict(player)
    }

    /// Evict every expired record. Returns how many were evicted.
    pub fn sweep(&mut self, now: Millis) -> usize {
        let expired: Vec<String> = self
            .last_attack
            .iter()
            .filter(|(_, &at)| !self.live(at, now))
            .map(|(name, _)| name.clone())
            .collect();
        for name in &expired {
            self.evict(name);
        }
        expired.len()
    }

    /// Players evicted since the last call, in eviction order.
    pub fn take_forgiven(&mut self) -> Vec<String> {
        std::mem::take(&mut self.forgiven)
    }

    /// Live hostile players at `now`, sorted by name.
    pub fn hostile_players(&self, now: Millis) -> Vec<&str> {
        self.last_attack
            .iter()
            .filter(|(_, &at)| self.live(at, now))
            .map(|(name, _)| name.as_str())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.last_attack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.last_attack.is_empty()
    }

    fn live(&self, at: Millis, now: Millis) -> bool {
        now < at.saturating_add(self.window_ms)
    }

    fn evict(&mut self, player: &str) -> bool {
        if self.last_attack.remove(player).is_some() {
            self.forgiven.push(player.to_string());
            true
        } else {
            false
        }
    }
}
