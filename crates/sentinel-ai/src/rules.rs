//! Self-defense priority resolver.
//!
//! The resolver is an ordered rule table. Each rule inspects the tick's
//! `ThreatContext` and either produces a decision or passes. The first rule
//! that fires wins; when none fires the agent idles. Every pick among
//! several candidates takes the nearest one.

use serde::{Deserialize, Serialize};

use sentinel_core::config::CombatConfig;
use sentinel_core::enums::{Category, ClearReason};
use sentinel_core::items::ItemKind;
use sentinel_core::types::{EntityId, Position};

use crate::classify::ThreatScan;

/// Everything one self-defense evaluation needs.
pub struct ThreatContext<'a> {
    pub scan: &'a ThreatScan<'a>,
    pub config: &'a CombatConfig,
    /// Current engagement target, if any.
    pub target: Option<EntityId>,
    /// Eating is allowed right now (not on cooldown).
    pub can_eat: bool,
}

/// Outcome of one self-defense evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Decision {
    /// Health critical: drop the target and run. `None` when nothing is near.
    Flee { escape_point: Option<Position> },
    /// Recover health with the best food carried.
    Eat { food: ItemKind },
    /// Run from an explosive creature.
    RetreatFromExplosive {
        threat: EntityId,
        escape_point: Position,
    },
    /// Swing at a threat already in reach without changing the target.
    Strike { target: EntityId },
    /// Swing at the current target.
    Attack { target: EntityId },
    /// Close the distance to the current target.
    Chase { target: EntityId },
    /// Drop the current target.
    ClearTarget {
        target: EntityId,
        reason: ClearReason,
    },
    /// Adopt a new target.
    Acquire { target: EntityId },
    Idle,
}

/// One entry of the resolver table.
pub struct Rule {
    pub name: &'static str,
    pub priority: u8,
    pub evaluate: fn(&ThreatContext<'_>) -> Option<Decision>,
}

/// Self-defense rules, strongest first.
pub const SELF_DEFENSE_RULES: &[Rule] = &[
    Rule {
        name: "flee",
        priority: 60,
        evaluate: flee,
    },
    Rule {
        name: "eat",
        priority: 50,
        evaluate: eat,
    },
    Rule {
        name: "retreat_from_explosive",
        priority: 40,
        evaluate: retreat_from_explosive,
    },
    Rule {
        name: "opportunistic_strike",
        priority: 30,
        evaluate: opportunistic_strike,
    },
    Rule {
        name: "pursue_target",
        priority: 20,
        evaluate: pursue_target,
    },
    Rule {
        name: "acquire_target",
        priority: 10,
        evaluate: acquire_target,
    },
];

/// Evaluate the rule table top-down.
pub fn resolve(ctx: &ThreatContext<'_>) -> Decision {
    resolve_traced(ctx).1
}

/// Like `resolve`, also naming the rule that fired (`"idle"` when none did).
pub fn resolve_traced(ctx: &ThreatContext<'_>) -> (&'static str, Decision) {
    for rule in SELF_DEFENSE_RULES {
        if let Some(decision) = (rule.evaluate)(ctx) {
            return (rule.name, decision);
        }
    }
    ("idle", Decision::Idle)
}

pub fn flee(ctx: &ThreatContext<'_>) -> Option<Decision> {
    if ctx.scan.agent.health >= ctx.config.escape_health {
        return None;
    }
    Some(Decision::Flee {
        escape_point: escape_point(ctx.scan, ctx.config),
    })
}

pub fn eat(ctx: &ThreatContext<'_>) -> Option<Decision> {
    if !ctx.can_eat || ctx.scan.agent.health >= ctx.config.eat_health {
        return None;
    }
    ctx.scan
        .agent
        .inventory
        .best_food()
        .map(|food| Decision::Eat { food })
}

pub fn retreat_from_explosive(ctx: &ThreatContext<'_>) -> Option<Decision> {
    let config = ctx.config;
    let creeper = ctx.scan.nearest(|s| {
        s.is_hostile_mob()
            && s.is_explosive()
            && s.distance <= config.creeper_safe_distance
            && (s.entity.fusing || s.distance < config.creeper_urgent_distance)
    })?;
    Some(Decision::RetreatFromExplosive {
        threat: creeper.id(),
        escape_point: ctx
            .scan
            .agent
            .position
            .away_from(creeper.position(), config.creeper_retreat_distance),
    })
}

pub fn opportunistic_strike(ctx: &ThreatContext<'_>) -> Option<Decision> {
    let config = ctx.config;
    let scan = ctx.scan;
    let victim = scan.nearest(|s| {
        s.distance <= config.attack_reach
            && (s.is_hostile_player()
                || (s.is_hostile_mob() && scan.menaces_ally(s, config.threaten_radius)))
    })?;
    Some(Decision::Strike {
        target: victim.id(),
    })
}

pub fn pursue_target(ctx: &ThreatContext<'_>) -> Option<Decision> {
    let target = ctx.target?;
    let Some(scanned) = ctx.scan.get(target) else {
        return Some(Decision::ClearTarget {
            target,
            reason: ClearReason::Invalid,
        });
    };
    if scanned.is_player() && !scanned.is_hostile_player() {
        return Some(Decision::ClearTarget {
            target,
            reason: ClearReason::Forgiven,
        });
    }
    if scanned.distance > ctx.config.chase_range {
        return Some(Decision::ClearTarget {
            target,
            reason: ClearReason::OutOfRange,
        });
    }
    if scanned.distance <= ctx.config.attack_reach {
        Some(Decision::Attack { target })
    } else {
        Some(Decision::Chase { target })
    }
}

pub fn acquire_target(ctx: &ThreatContext<'_>) -> Option<Decision> {
    let config = ctx.config;
    let scan = ctx.scan;
    let threat = scan.nearest(|s| {
        s.distance <= config.detect_range
            && (s.is_hostile_player()
                || (s.is_hostile_mob() && scan.menaces_ally(s, config.threaten_radius)))
    })?;
    Some(Decision::Acquire {
        target: threat.id(),
    })
}

/// Flee goal: `flee_distance` from the agent, directly away from the centroid
/// of every hostile within `flee_scan_radius`. `None` when there is none.
pub fn escape_point(scan: &ThreatScan<'_>, config: &CombatConfig) -> Option<Position> {
    let mut sum = glam::DVec3::ZERO;
    let mut count = 0u32;
    for s in scan
        .entities
        .iter()
        .filter(|s| s.category == Category::Hostile && s.distance <= config.flee_scan_radius)
    {
        sum += s.position().to_vec();
        count += 1;
    }
    if count == 0 {
        return None;
    }
    let centroid = Position::from_vec(sum / count as f64);
    Some(scan.agent.position.away_from(&centroid, config.flee_distance))
}
