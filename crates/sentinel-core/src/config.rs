//! Tunable engine parameters.
//!
//! Defaults come from `constants`. A JSON file may override any subset of
//! fields; missing fields keep their defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatConfig {
    // --- Self-defense ---
    pub escape_health: f64,
    pub eat_health: f64,
    pub attack_reach: f64,
    pub optimal_distance: f64,
    pub detect_range: f64,
    pub chase_range: f64,
    pub threaten_radius: f64,
    pub forgive_ms: u64,
    pub attack_cooldown_ms: u64,

    // --- Explosives and fleeing ---
    pub creeper_safe_distance: f64,
    pub creeper_urgent_distance: f64,
    pub creeper_retreat_distance: f64,
    pub flee_scan_radius: f64,
    pub flee_distance: f64,
    pub low_health_notice_cooldown_ms: u64,

    // --- Eating ---
    pub eat_duration_ms: u64,
    pub eat_cooldown_ms: u64,

    // --- Guard ---
    pub guard_range: f64,
    pub guard_threat_radius: f64,
    pub guard_creeper_radius: f64,
    pub guard_chase_radius: f64,
    pub surrounded_count: usize,
    pub high_threat_level: u8,
    pub guard_scan_interval_ms: u64,
    pub damage_attribution_radius: f64,
    pub protected_ttl_ms: u64,

    // --- Reflex ---
    pub reflex_radius: f64,
    pub reflex_projectile_radius: f64,
    pub reflex_explosive_radius: f64,
    pub reflex_sprint_radius: f64,
    pub reflex_ranged_radius: f64,
    pub block_duration_ms: u64,
    pub sprint_burst_ms: u64,

    // --- Auxiliary timers ---
    pub shield_check_interval_ms: u64,
    pub armor_check_interval_ms: u64,
    pub equip_cooldown_ms: u64,
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self {
            escape_health: ESCAPE_HEALTH,
            eat_health: EAT_HEALTH,
            attack_reach: ATTACK_REACH,
            optimal_distance: OPTIMAL_DISTANCE,
            detect_range: DETECT_RANGE,
            chase_range: CHASE_RANGE,
            threaten_radius: THREATEN_RADIUS,
            forgive_ms: FORGIVE_MS,
            attack_cooldown_ms: ATTACK_COOLDOWN_MS,
            creeper_safe_distance: CREEPER_SAFE_DISTANCE,
            creeper_urgent_distance: CREEPER_URGENT_DISTANCE,
            creeper_retreat_distance: CREEPER_RETREAT_DISTANCE,
            flee_scan_radius: FLEE_SCAN_RADIUS,
            flee_distance: FLEE_DISTANCE,
            low_health_notice_cooldown_ms: LOW_HEALTH_NOTICE_COOLDOWN_MS,
            eat_duration_ms: EAT_DURATION_MS,
            eat_cooldown_ms: EAT_COOLDOWN_MS,
            guard_range: GUARD_RANGE,
            guard_threat_radius: GUARD_THREAT_RADIUS,
            guard_creeper_radius: GUARD_CREEPER_RADIUS,
            guard_chase_radius: GUARD_CHASE_RADIUS,
            surrounded_count: SURROUNDED_COUNT,
            high_threat_level: HIGH_THREAT_LEVEL,
            guard_scan_interval_ms: GUARD_SCAN_INTERVAL_MS,
            damage_attribution_radius: DAMAGE_ATTRIBUTION_RADIUS,
            protected_ttl_ms: PROTECTED_TTL_MS,
            reflex_radius: REFLEX_RADIUS,
            reflex_projectile_radius: REFLEX_PROJECTILE_RADIUS,
            reflex_explosive_radius: REFLEX_EXPLOSIVE_RADIUS,
            reflex_sprint_radius: REFLEX_SPRINT_RADIUS,
            reflex_ranged_radius: REFLEX_RANGED_RADIUS,
            block_duration_ms: BLOCK_DURATION_MS,
            sprint_burst_ms: SPRINT_BURST_MS,
            shield_check_interval_ms: SHIELD_CHECK_INTERVAL_MS,
            armor_check_interval_ms: ARMOR_CHECK_INTERVAL_MS,
            equip_cooldown_ms: EQUIP_COOLDOWN_MS,
        }
    }
}

impl CombatConfig {
    /// Parse a JSON document and validate it.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: CombatConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a JSON config file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Reject configurations the decision rules cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let distances = [
            ("attack_reach", self.attack_reach),
            ("optimal_distance", self.optimal_distance),
            ("detect_range", self.detect_range),
            ("chase_range", self.chase_range),
            ("threaten_radius", self.threaten_radius),
            ("creeper_safe_distance", self.creeper_safe_distance),
            ("creeper_urgent_distance", self.creeper_urgent_distance),
            ("flee_scan_radius", self.flee_scan_radius),
            ("flee_distance", self.flee_distance),
            ("guard_range", self.guard_range),
            ("guard_threat_radius", self.guard_threat_radius),
            ("reflex_radius", self.reflex_radius),
        ];
        for (name, value) in distances {
            if !(value > 0.0) {
                return Err(ConfigError::Invalid(format!("{name} must be positive")));
            }
        }
        if self.escape_health >= self.eat_health {
            return Err(ConfigError::Invalid(
                "escape_health must be below eat_health".into(),
            ));
        }
        if self.creeper_urgent_distance > self.creeper_safe_distance {
            return Err(ConfigError::Invalid(
                "creeper_urgent_distance must not exceed creeper_safe_distance".into(),
            ));
        }
        if self.optimal_distance > self.attack_reach {
            return Err(ConfigError::Invalid(
                "optimal_distance must not exceed attack_reach".into(),
            ));
        }
        if self.guard_scan_interval_ms == 0 {
            return Err(ConfigError::Invalid(
                "guard_scan_interval_ms must be positive".into(),
            ));
        }
        Ok(())
    }
}
