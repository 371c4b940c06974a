//! 360° reflex awareness.
//!
//! Buckets dangerous entities around the agent by direction relative to its
//! facing, then picks one reaction with a fixed precedence. Buckets live for
//! one evaluation only.

use std::f64::consts::FRAC_PI_4;

use serde::{Deserialize, Serialize};

use sentinel_core::config::CombatConfig;
use sentinel_core::constants::REFLEX_AIM_HEIGHT;
use sentinel_core::entity::Entity;
use sentinel_core::enums::{DangerKind, Direction, EntityKind};
use sentinel_core::types::{EntityId, Position};

use crate::classify::{Scanned, ThreatScan};

const BEHIND_THRESHOLD: f64 = 3.0 * FRAC_PI_4;

/// Why an entity is dangerous to the reflex layer, if it is.
pub fn danger_kind(scanned: &Scanned<'_>) -> Option<DangerKind> {
    if scanned.entity.kind == EntityKind::Projectile {
        return Some(DangerKind::Projectile);
    }
    let profile = scanned.profile?;
    if profile.explosive {
        Some(DangerKind::Explosive)
    } else if profile.ranged {
        Some(DangerKind::Ranged)
    } else {
        None
    }
}

/// Direction bucket for a signed angle relative to the agent's facing.
pub fn direction_of(relative_angle: f64) -> Direction {
    let abs = relative_angle.abs();
    if abs < FRAC_PI_4 {
        Direction::Front
    } else if abs > BEHIND_THRESHOLD {
        Direction::Behind
    } else if relative_angle > 0.0 {
        Direction::Left
    } else {
        Direction::Right
    }
}

/// Point to look at when facing an entity.
pub fn aim_point(entity: &Entity) -> Position {
    let height = if entity.height > 0.0 {
        entity.height
    } else {
        REFLEX_AIM_HEIGHT
    };
    entity.position.offset(0.0, height, 0.0)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DirectedThreat {
    pub id: EntityId,
    pub danger: DangerKind,
    pub distance: f64,
    /// Signed angle from the agent's facing, positive to the left.
    pub relative_angle: f64,
    pub direction: Direction,
    pub aim: Position,
}

/// Dangerous entities by direction, each bucket nearest first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ThreatBuckets {
    pub front: Vec<DirectedThreat>,
    pub behind: Vec<DirectedThreat>,
    pub left: Vec<DirectedThreat>,
    pub right: Vec<DirectedThreat>,
}

impl ThreatBuckets {
    pub fn is_empty(&self) -> bool {
        self.front.is_empty() && self.behind.is_empty() && self.left.is_empty() && self.right.is_empty()
    }

    pub fn len(&self) -> usize {
        self.front.len() + self.behind.len() + self.left.len() + self.right.len()
    }

    pub fn all(&self) -> impl Iterator<Item = &DirectedThreat> {
        self.front
            .iter()
            .chain(&self.behind)
            .chain(&self.left)
            .chain(&self.right)
    }

    /// Nearest threat in any bucket matching `pred`. Ties go to the lower id.
    pub fn nearest(&self, pred: impl Fn(&DirectedThreat) -> bool) -> Option<&DirectedThreat> {
        self.all().filter(|t| pred(t)).min_by(|a, b| {
            a.distance
                .total_cmp(&b.distance)
                .then(a.id.cmp(&b.id))
        })
    }

    fn bucket_mut(&mut self, direction: Direction) -> &mut Vec<DirectedThreat> {
        match direction {
            Direction::Front => &mut self.front,
            Direction::Behind => &mut self.behind,
            Direction::Left => &mut self.left,
            Direction::Right => &mut self.right,
        }
    }
}

/// Bucket every dangerous entity within `radius` of the agent.
pub fn bucket_threats(scan: &ThreatScan<'_>, radius: f64) -> ThreatBuckets {
    let agent = scan.agent;
    let mut buckets = ThreatBuckets::default();

    for scanned in scan.entities.iter().filter(|s| s.distance <= radius) {
        let Some(danger) = danger_kind(scanned) else {
            continue;
        };
        let bearing = agent.position.yaw_to(scanned.position());
        let relative_angle = agent.facing.relative_angle(bearing);
        let direction = direction_of(relative_angle);
        buckets.bucket_mut(direction).push(DirectedThreat {
            id: scanned.id(),
            danger,
            distance: scanned.distance,
            relative_angle,
            direction,
            aim: aim_point(scanned.entity),
        });
    }

    for bucket in [
        &mut buckets.front,
        &mut buckets.behind,
        &mut buckets.left,
        &mut buckets.right,
    ] {
        bucket.sort_by(|a, b| a.distance.total_cmp(&b.distance).then(a.id.cmp(&b.id)));
    }
    buckets
}

/// What the reflex layer does this cycle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Reaction {
    /// Turn toward something behind; `raise` when it is a projectile or explosive.
    FaceBehind {
        threat: EntityId,
        aim: Position,
        raise: bool,
    },
    /// Raise the shield toward a projectile or ranged attacker.
    Block { threat: EntityId, aim: Position },
    /// Raise the shield toward an explosive; `sprint` to also burst away.
    ExplosiveDefense {
        threat: EntityId,
        aim: Position,
        sprint: bool,
    },
    /// Lower any active defense.
    StandDown,
}

impl Reaction {
    /// Whether this reaction raises a defense action.
    pub fn raises_defense(&self) -> bool {
        match self {
            Reaction::FaceBehind { raise, .. } => *raise,
            Reaction::Block { .. } | Reaction::ExplosiveDefense { .. } => true,
            Reaction::StandDown => false,
        }
    }

    pub fn threat(&self) -> Option<EntityId> {
        match self {
            Reaction::FaceBehind { threat, .. }
            | Reaction::Block { threat, .. }
            | Reaction::ExplosiveDefense { threat, .. } => Some(*threat),
            Reaction::StandDown => None,
        }
    }
}

/// Pick the reaction for this cycle:
/// behind > projectile > explosive > ranged > stand down.
pub fn choose_reaction(buckets: &ThreatBuckets, config: &CombatConfig) -> Reaction {
    if let Some(t) = buckets.behind.first() {
        return Reaction::FaceBehind {
            threat: t.id,
            aim: t.aim,
            raise: matches!(t.danger, DangerKind::Projectile | DangerKind::Explosive),
        };
    }

    if let Some(t) = buckets.nearest(|t| {
        t.danger == DangerKind::Projectile && t.distance < config.reflex_projectile_radius
    }) {
        return Reaction::Block {
            threat: t.id,
            aim: t.aim,
        };
    }

    if let Some(t) = buckets.nearest(|t| {
        t.danger == DangerKind::Explosive && t.distance < config.reflex_explosive_radius
    }) {
        return Reaction::ExplosiveDefense {
            threat: t.id,
            aim: t.aim,
            sprint: t.distance < config.reflex_sprint_radius,
        };
    }

    if let Some(t) = buckets.nearest(|t| {
        t.danger == DangerKind::Ranged && t.distance < config.reflex_ranged_radius
    }) {
        return Reaction::Block {
            threat: t.id,
            aim: t.aim,
        };
    }

    Reaction::StandDown
}
