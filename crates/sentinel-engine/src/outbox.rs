//! Queue of notifications awaiting presentation.

use std::collections::VecDeque;

use sentinel_core::events::{Notification, Stamped};
use sentinel_core::types::Millis;

#[derive(Debug, Clone, Default)]
pub struct Outbox {
    queue: VecDeque<Stamped>,
}

impl Outbox {
    pub fn push(&mut self, at: Millis, notification: Notification) {
        self.queue.push_back(Stamped { at, notification });
    }

    /// Take everything queued, oldest first.
    pub fn drain(&mut self) -> Vec<Stamped> {
        self.queue.drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
