//! Creature-specific behavioral profiles.
//!
//! Consolidates per-creature parameters used by classification, guard
//! scenarios and reflex defense.

use sentinel_core::enums::MobKind;

/// Static profile of a creature type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MobProfile {
    /// Attacks players unprovoked.
    pub hostile: bool,
    /// Guard threat priority, higher is more dangerous.
    pub threat_priority: u8,
    /// Attacks from range (arrows, crossbows, fireballs).
    pub ranged: bool,
    /// Explodes next to its victim.
    pub explosive: bool,
}

const DEFAULT_THREAT_PRIORITY: u8 = 2;

/// Get the profile for a creature type.
pub fn get_profile(kind: MobKind) -> MobProfile {
    use MobKind::*;

    let hostile = matches!(
        kind,
        Zombie
            | Skeleton
            | Creeper
            | Spider
            | Enderman
            | Witch
            | Slime
            | Phantom
            | Drowned
            | Husk
            | Stray
            | Blaze
            | Ghast
            | MagmaCube
            | Hoglin
            | PiglinBrute
            | Warden
            | Pillager
            | Vindicator
            | Evoker
            | Ravager
            | Vex
            | CaveSpider
            | Silverfish
            | Endermite
            | Guardian
            | ElderGuardian
            | WitherSkeleton
            | ZombifiedPiglin
    );

    let threat_priority = match kind {
        Creeper => 10,
        Warden => 9,
        WitherSkeleton => 8,
        Pillager | Skeleton => 7,
        Vindicator => 6,
        Zombie => 5,
        Spider => 4,
        Enderman => 3,
        _ if hostile => DEFAULT_THREAT_PRIORITY,
        _ => 0,
    };

    MobProfile {
        hostile,
        threat_priority,
        ranged: matches!(kind, Skeleton | Stray | Pillager | Blaze),
        explosive: kind == Creeper,
    }
}
