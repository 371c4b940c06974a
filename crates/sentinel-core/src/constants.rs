//! Engine constants and default tuning parameters.
//!
//! Distances are in blocks, durations in milliseconds, health in half-hearts.

/// World tick rate (Hz).
pub const TICK_RATE: u32 = 20;

/// Milliseconds per world tick.
pub const TICK_MS: u64 = 1000 / TICK_RATE as u64;

/// Full health.
pub const MAX_HEALTH: f64 = 20.0;

/// Eye height used when an entity does not report one.
pub const DEFAULT_ENTITY_HEIGHT: f64 = 1.8;

// --- Self-defense ---

/// Below this health the agent drops everything and runs.
pub const ESCAPE_HEALTH: f64 = 6.0;

/// Below this health the agent eats if it carries food.
pub const EAT_HEALTH: f64 = 15.0;

/// Melee reach.
pub const ATTACK_REACH: f64 = 3.5;

/// Preferred distance while chasing, tighter than reach.
pub const OPTIMAL_DISTANCE: f64 = 2.5;

/// Radius for adopting a new target when idle.
pub const DETECT_RANGE: f64 = 8.0;

/// Targets beyond this are given up.
pub const CHASE_RANGE: f64 = 20.0;

/// A hostile creature this close to an ally is menacing it.
pub const THREATEN_RADIUS: f64 = 5.0;

/// Time without a fresh attack after which a hostile player is forgiven.
pub const FORGIVE_MS: u64 = 4000;

/// Minimum time between two swings.
pub const ATTACK_COOLDOWN_MS: u64 = 500;

// --- Explosives ---

/// A fusing explosive inside this radius triggers a retreat.
pub const CREEPER_SAFE_DISTANCE: f64 = 6.0;

/// Any explosive inside this radius triggers a retreat, fusing or not.
pub const CREEPER_URGENT_DISTANCE: f64 = 4.0;

/// How far to run from an explosive.
pub const CREEPER_RETREAT_DISTANCE: f64 = 10.0;

// --- Fleeing ---

/// Threats inside this radius contribute to the flee centroid.
pub const FLEE_SCAN_RADIUS: f64 = 15.0;

/// Distance of the flee goal from the agent.
pub const FLEE_DISTANCE: f64 = 20.0;

/// Minimum interval between two low-health notifications.
pub const LOW_HEALTH_NOTICE_COOLDOWN_MS: u64 = 10_000;

// --- Eating ---

/// Duration of the consumption animation.
pub const EAT_DURATION_MS: u64 = 1600;

/// Pause after a meal before eating again.
pub const EAT_COOLDOWN_MS: u64 = 3000;

// --- Guard ---

/// Allies farther than this from the agent are not guarded.
pub const GUARD_RANGE: f64 = 12.0;

/// Hostile creatures within this radius of an ally are counted against it.
pub const GUARD_THREAT_RADIUS: f64 = 8.0;

/// Explosive this close to an ally is an emergency.
pub const GUARD_CREEPER_RADIUS: f64 = 4.0;

/// Hostile creature this close to an ally is chasing it.
pub const GUARD_CHASE_RADIUS: f64 = 4.0;

/// Number of distinct creatures that make an ally surrounded.
pub const SURROUNDED_COUNT: usize = 3;

/// Threat priority at or above which a creature is a high threat.
pub const HIGH_THREAT_LEVEL: u8 = 7;

/// Interval between guard scans.
pub const GUARD_SCAN_INTERVAL_MS: u64 = 500;

/// Radius around a damaged ally searched for its attacker.
pub const DAMAGE_ATTRIBUTION_RADIUS: f64 = 5.0;

/// How long an ally stays on the protected list after the last trigger.
pub const PROTECTED_TTL_MS: u64 = 30_000;

// --- Reflex defense ---

/// Dangerous entities inside this radius are bucketed by direction.
pub const REFLEX_RADIUS: f64 = 10.0;

/// Inbound projectiles inside this radius raise the shield.
pub const REFLEX_PROJECTILE_RADIUS: f64 = 8.0;

/// Explosives inside this radius raise the shield.
pub const REFLEX_EXPLOSIVE_RADIUS: f64 = 5.0;

/// Explosives inside this radius also trigger a sprint burst.
pub const REFLEX_SPRINT_RADIUS: f64 = 3.0;

/// Ranged creatures inside this radius raise the shield.
pub const REFLEX_RANGED_RADIUS: f64 = 10.0;

/// How long a raised shield is held without re-trigger.
pub const BLOCK_DURATION_MS: u64 = 2000;

/// Length of the sprint-away burst.
pub const SPRINT_BURST_MS: u64 = 1000;

/// Fallback eye height for reflex aiming.
pub const REFLEX_AIM_HEIGHT: f64 = 1.0;

// --- Auxiliary timers ---

/// Interval of the inventory check for a shield.
pub const SHIELD_CHECK_INTERVAL_MS: u64 = 5000;

/// Interval of the armor upgrade pass.
pub const ARMOR_CHECK_INTERVAL_MS: u64 = 2000;

/// Per-slot pause between armor equips.
pub const EQUIP_COOLDOWN_MS: u64 = 3000;
