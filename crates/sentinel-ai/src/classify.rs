//! Per-tick entity classification.
//!
//! `ThreatScan::build` classifies every visible entity exactly once per tick
//! and caches its category, creature profile and distance to the agent. All
//! rule, guard and reflex evaluations of that tick read from the scan.

use sentinel_core::entity::{AgentState, Entity};
use sentinel_core::enums::{Category, EntityKind};
use sentinel_core::types::{EntityId, Millis, Position};

use crate::hostility::HostilityLedger;
use crate::profiles::{get_profile, MobProfile};

/// One classified entity.
#[derive(Debug, Clone, Copy)]
pub struct Scanned<'a> {
    pub entity: &'a Entity,
    pub category: Category,
    /// Creature profile, mobs with a known name only.
    pub profile: Option<MobProfile>,
    /// Distance from the agent.
    pub distance: f64,
}

/// Classification of the visible world for one tick.
#[derive(Debug, Clone)]
pub struct ThreatScan<'a> {
    pub now: Millis,
    pub agent: &'a AgentState,
    /// Valid entities other than the agent, in snapshot order.
    pub entities: Vec<Scanned<'a>>,
}

/// Classify one entity relative to the hostility ledger.
pub fn classify(entity: &Entity, ledger: &HostilityLedger, now: Millis) -> Category {
    match entity.kind {
        EntityKind::Player => match entity.username.as_deref() {
            Some(name) if ledger.is_hostile_at(name, now) => Category::Hostile,
            _ => Category::Ally,
        },
        EntityKind::Mob => match entity.mob_kind() {
            Some(kind) if get_profile(kind).hostile => Category::Hostile,
            _ => Category::Neutral,
        },
        EntityKind::Projectile => Category::Projectile,
        EntityKind::Other => Category::Neutral,
    }
}

impl<'a> Scanned<'a> {
    pub fn id(&self) -> EntityId {
        self.entity.id
    }

    pub fn position(&self) -> &'a Position {
        &self.entity.position
    }

    pub fn is_player(&self) -> bool {
        self.entity.kind == EntityKind::Player
    }

    /// Hostile creature (not a player).
    pub fn is_hostile_mob(&self) -> bool {
        self.category == Category::Hostile && self.entity.kind == EntityKind::Mob
    }

    pub fn is_hostile_player(&self) -> bool {
        self.category == Category::Hostile && self.is_player()
    }

    pub fn is_explosive(&self) -> bool {
        self.profile.is_some_and(|p| p.explosive)
    }

    pub fn threat_priority(&self) -> u8 {
        self.profile.map_or(0, |p| p.threat_priority)
    }
}

impl<'a> ThreatScan<'a> {
    /// Classify every valid entity except the agent itself.
    pub fn build(
        agent: &'a AgentState,
        entities: &'a [Entity],
        ledger: &HostilityLedger,
        now: Millis,
    ) -> Self {
        let entities = entities
            .iter()
            .filter(|e| e.valid && e.id != agent.id && !is_self(e, agent))
            .map(|entity| Scanned {
                entity,
                category: classify(entity, ledger, now),
                profile: entity.mob_kind().map(get_profile),
                distance: agent.position.distance_to(&entity.position),
            })
            .collect();

        Self {
            now,
            agent,
            entities,
        }
    }

    pub fn get(&self, id: EntityId) -> Option<&Scanned<'a>> {
        self.entities.iter().find(|s| s.id() == id)
    }

    pub fn allies(&self) -> impl Iterator<Item = &Scanned<'a>> {
        self.entities
            .iter()
            .filter(|s| s.category == Category::Ally)
    }

    pub fn hostile_mobs(&self) -> impl Iterator<Item = &Scanned<'a>> {
        self.entities.iter().filter(|s| s.is_hostile_mob())
    }

    /// Whether a hostile creature is within `radius` of any ally.
    pub fn menaces_ally(&self, mob: &Scanned<'_>, radius: f64) -> bool {
        self.allies()
            .any(|ally| ally.position().distance_to(mob.position()) < radius)
    }

    /// Nearest entity to the agent satisfying `pred`. Ties go to the lower id.
    pub fn nearest(&self, pred: impl Fn(&Scanned<'a>) -> bool) -> Option<&Scanned<'a>> {
        nearest_to(self.entities.iter().filter(|s| pred(s)), |s| s.distance)
    }

    /// Nearest player other than the agent to `point`, any category.
    pub fn nearest_player_to(&self, point: &Position) -> Option<&Scanned<'a>> {
        nearest_to(self.entities.iter().filter(|s| s.is_player()), |s| {
            s.position().distance_to(point)
        })
    }
}

/// Pick the candidate with the smallest key; ties go to the lower entity id.
pub fn nearest_to<'s, 'a: 's>(
    candidates: impl Iterator<Item = &'s Scanned<'a>>,
    key: impl Fn(&Scanned<'a>) -> f64,
) -> Option<&'s Scanned<'a>> {
    let mut best: Option<(&'s Scanned<'a>, f64)> = None;
    for candidate in candidates {
        let d = key(candidate);
        let better = match best {
            None => true,
            Some((b, bd)) => d < bd || (d == bd && candidate.id() < b.id()),
        };
        if better {
            best = Some((candidate, d));
        }
    }
    best.map(|(s, _)| s)
}

fn is_self(entity: &Entity, agent: &AgentState) -> bool {
    entity.kind == EntityKind::Player && entity.username.as_deref() == Some(agent.username.as_str())
}
