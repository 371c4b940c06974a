//! ECS components for simulated entities.
//!
//! The agent itself is not an ECS entity; `SimWorld` holds its state
//! directly.

use glam::DVec3;

use sentinel_core::enums::EntityKind;
use sentinel_core::types::{EntityId, Millis};

/// Identity and shape of a simulated entity.
#[derive(Debug, Clone)]
pub struct Body {
    pub id: EntityId,
    pub kind: EntityKind,
    /// Game type name reported in snapshots.
    pub name: String,
    pub username: Option<String>,
    /// Eye height.
    pub height: f64,
}

/// Blocks per second.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Velocity(pub DVec3);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Health {
    pub current: f64,
}

/// Explosive fuse. Lit when the agent comes close, cancelled when it backs off.
#[derive(Debug, Clone, Copy, Default)]
pub struct Fuse {
    pub lit_at: Option<Millis>,
}

/// Random walk, re-rolling the heading at `next_turn_at`.
#[derive(Debug, Clone, Copy)]
pub struct Wander {
    pub speed: f64,
    pub next_turn_at: Millis,
}

/// Who a pursuing entity is after.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quarry {
    Agent,
    Entity(EntityId),
}

/// Walks toward its quarry and hits it in melee range.
#[derive(Debug, Clone, Copy)]
pub struct Pursue {
    pub quarry: Quarry,
    pub speed: f64,
    pub damage: f64,
    pub cooldown_ms: Millis,
    pub next_hit_at: Millis,
}

/// Looses arrows at the agent while it is within `range`.
#[derive(Debug, Clone, Copy)]
pub struct Shooter {
    pub range: f64,
    pub interval_ms: Millis,
    pub next_shot_at: Millis,
}

/// In-flight projectile.
#[derive(Debug, Clone, Copy)]
pub struct Missile {
    pub damage: f64,
    pub expires_at: Millis,
}

/// Died or left the world. Reported with `valid == false` from world step
/// `visible_from` on, then despawned by the next cleanup.
#[derive(Debug, Clone, Copy)]
pub struct Dead {
    pub visible_from: u64,
}
