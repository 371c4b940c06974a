//! Ally protection scenarios.
//!
//! Classifies the situation around each ally into a `GuardScenario` with a
//! strict precedence, and picks the primary threat the agent should engage.
//! The coordinator in the engine only nominates targets from these results.

use serde::{Deserialize, Serialize};

use sentinel_core::config::CombatConfig;
use sentinel_core::enums::{Category, GuardScenario};
use sentinel_core::types::EntityId;

use crate::classify::{nearest_to, Scanned, ThreatScan};

const CREEPER_EMERGENCY_PRIORITY: u8 = 10;
const SURROUNDED_PRIORITY: u8 = 8;
const CHASING_PRIORITY: u8 = 6;
const NORMAL_COMBAT_PRIORITY: u8 = 5;

/// Result of classifying one ally's surroundings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuardAssessment {
    pub ally: EntityId,
    pub ally_name: String,
    pub scenario: GuardScenario,
    pub priority: u8,
    /// Threat the agent should engage. `None` only for `Safe`.
    pub primary_threat: Option<EntityId>,
    /// Every hostile creature counted against this ally.
    pub threats: Vec<EntityId>,
}

/// Classify the hostile creatures around one ally.
pub fn assess_ally(
    ally: &Scanned<'_>,
    scan: &ThreatScan<'_>,
    config: &CombatConfig,
) -> GuardAssessment {
    let ally_pos = ally.position();
    let dist = |s: &Scanned<'_>| s.position().distance_to(ally_pos);

    let near: Vec<&Scanned<'_>> = scan
        .hostile_mobs()
        .filter(|m| dist(*m) < config.guard_threat_radius)
        .collect();

    let mut assessment = GuardAssessment {
        ally: ally.id(),
        ally_name: ally.entity.label().to_string(),
        scenario: GuardScenario::Safe,
        priority: 0,
        primary_threat: None,
        threats: near.iter().map(|m| m.id()).collect(),
    };
    if near.is_empty() {
        return assessment;
    }

    let nearest = nearest_to(near.iter().copied(), dist);
    let creeper = nearest_to(
        near.iter()
            .copied()
            .filter(|m| m.is_explosive() && dist(*m) < config.guard_creeper_radius),
        dist,
    );
    let top_priority = near.iter().map(|m| m.threat_priority()).max().unwrap_or(0);

    let (scenario, priority, primary) = if let Some(creeper) = creeper {
        (
            GuardScenario::CreeperEmergency,
            CREEPER_EMERGENCY_PRIORITY,
            Some(creeper),
        )
    } else if near.len() >= config.surrounded_count {
        (GuardScenario::Surrounded, SURROUNDED_PRIORITY, nearest)
    } else if top_priority >= config.high_threat_level {
        let most_dangerous = nearest_to(
            near.iter()
                .copied()
                .filter(|m| m.threat_priority() == top_priority),
            dist,
        );
        (GuardScenario::HighThreat, top_priority, most_dangerous)
    } else if nearest.is_some_and(|m| dist(m) < config.guard_chase_radius) {
        (GuardScenario::Chasing, CHASING_PRIORITY, nearest)
    } else {
        (GuardScenario::NormalCombat, NORMAL_COMBAT_PRIORITY, nearest)
    };

    assessment.scenario = scenario;
    assessment.priority = priority;
    assessment.primary_threat = primary.map(|m| m.id());
    assessment
}

/// Assess every ally within guard range of the agent, in snapshot order.
/// Allies with nothing around them are reported as `Safe`.
pub fn assess_allies(scan: &ThreatScan<'_>, config: &CombatConfig) -> Vec<GuardAssessment> {
    scan.allies()
        .filter(|ally| ally.distance < config.guard_range)
        .map(|ally| assess_ally(ally, scan, config))
        .collect()
}

/// The single assessment to act on: highest priority, ties to the ally
/// nearer the agent, then the lower ally id.
pub fn pick_nomination<'g>(
    assessments: &'g [GuardAssessment],
    scan: &ThreatScan<'_>,
) -> Option<&'g GuardAssessment> {
    let ally_distance = |a: &GuardAssessment| scan.get(a.ally).map_or(f64::MAX, |s| s.distance);
    assessments
        .iter()
        .filter(|a| a.scenario != GuardScenario::Safe && a.primary_threat.is_some())
        .min_by(|a, b| {
            b.priority
                .cmp(&a.priority)
                .then(ally_distance(a).total_cmp(&ally_distance(b)))
                .then(a.ally.cmp(&b.ally))
        })
}

/// Nomination produced by an entity-damaged observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HurtNomination {
    /// Ally to mark protected.
    pub ally: String,
    /// Creature to engage.
    pub threat: EntityId,
}

/// React to an entity other than the agent taking damage.
///
/// A damaged ally within guard range nominates the nearest hostile creature
/// within `damage_attribution_radius` of it. A damaged hostile creature
/// nominates itself when the player nearest to it is an ally within guard
/// range.
pub fn hurt_nomination(
    hurt: EntityId,
    scan: &ThreatScan<'_>,
    config: &CombatConfig,
) -> Option<HurtNomination> {
    let victim = scan.get(hurt)?;

    if victim.category == Category::Ally {
        if victim.distance >= config.guard_range {
            return None;
        }
        let attacker = nearest_to(
            scan.hostile_mobs().filter(|m| {
                m.position().distance_to(victim.position()) < config.damage_attribution_radius
            }),
            |m| m.position().distance_to(victim.position()),
        )?;
        return Some(HurtNomination {
            ally: victim.entity.label().to_string(),
            threat: attacker.id(),
        });
    }

    if victim.is_hostile_mob() {
        let player = scan.nearest_player_to(victim.position())?;
        if player.category == Category::Ally && player.distance < config.guard_range {
            return Some(HurtNomination {
                ally: player.entity.label().to_string(),
                threat: victim.id(),
            });
        }
    }
    None
}
