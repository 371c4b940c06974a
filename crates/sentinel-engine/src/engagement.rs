//! Engagement data model: the agent's current combat focus.
//!
//! Owned by `CompanionEngine`; the executor in `systems::executor` is the
//! only writer.

use serde::{Deserialize, Serialize};

use sentinel_core::enums::{Activity, FleeReason};
use sentinel_core::items::ItemKind;
use sentinel_core::types::{EntityId, Millis};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngagementState {
    /// Current target.
    pub target: Option<EntityId>,
    /// Target's account name when it is a player.
    pub target_name: Option<String>,
    /// Exclusive action mode.
    pub activity: Activity,
    /// Time of the last swing that reached the action surface.
    pub last_attack: Option<Millis>,

    // --- Eating ---
    /// Food being eaten and when the meal completes.
    pub meal: Option<Meal>,
    /// No new meal may start before this time.
    pub eat_ready_at: Millis,

    // --- Misc ---
    /// Last time a low-health notice was emitted.
    pub last_health_notice: Option<Millis>,
    /// Chasing by raw controls because navigation failed.
    pub direct_chase: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Meal {
    pub food: ItemKind,
    pub done_at: Millis,
}

impl EngagementState {
    pub fn is_eating(&self) -> bool {
        self.activity == Activity::Eating
    }

    pub fn is_fleeing(&self) -> bool {
        matches!(self.activity, Activity::Fleeing(_))
    }

    pub fn is_fleeing_from(&self, reason: FleeReason) -> bool {
        self.activity == Activity::Fleeing(reason)
    }

    /// Weapon cooldown elapsed at `now`.
    pub fn attack_ready(&self, now: Millis, cooldown_ms: Millis) -> bool {
        self.last_attack
            .is_none_or(|at| now.saturating_sub(at) >= cooldown_ms)
    }

    pub fn can_eat(&self, now: Millis) -> bool {
        !self.is_eating() && now >= self.eat_ready_at
    }
}
