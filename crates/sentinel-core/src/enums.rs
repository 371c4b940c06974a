//! Enumeration types used throughout the engine.

use serde::{Deserialize, Serialize};

/// Raw entity kind as reported by the world snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Player,
    Mob,
    Projectile,
    Other,
}

/// Per-tick classification of an entity from the agent's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Hostile creature, or a player currently in the hostility ledger.
    Hostile,
    /// Passive creatures, dropped items, anything the agent ignores.
    Neutral,
    /// Another player the agent may protect.
    Ally,
    /// Arrows, fireballs and other inbound projectiles.
    Projectile,
}

/// Creature types known to the engine. Names follow the game's snake_case ids.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum MobKind {
    // --- Hostile ---
    Zombie,
    Skeleton,
    Creeper,
    Spider,
    Enderman,
    Witch,
    Slime,
    Phantom,
    Drowned,
    Husk,
    Stray,
    Blaze,
    Ghast,
    MagmaCube,
    Hoglin,
    PiglinBrute,
    Warden,
    Pillager,
    Vindicator,
    Evoker,
    Ravager,
    Vex,
    CaveSpider,
    Silverfish,
    Endermite,
    Guardian,
    ElderGuardian,
    WitherSkeleton,
    ZombifiedPiglin,

    // --- Passive / friendly ---
    Horse,
    Donkey,
    Mule,
    Llama,
    Wolf,
    Cat,
    Parrot,
    Villager,
    WanderingTrader,
    IronGolem,
    SnowGolem,
    Pig,
    Cow,
    Sheep,
    Chicken,
    Rabbit,
    Turtle,
    Panda,
    Fox,
}

/// Projectile types the reflex layer reacts to.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ProjectileKind {
    Arrow,
    SpectralArrow,
    Trident,
    Fireball,
    SmallFireball,
    WitherSkull,
}

/// Which hand an item is held or used in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Hand {
    Main,
    Off,
}

/// Equipment destination for `ActionSurface::equip`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EquipSlot {
    MainHand,
    OffHand,
    Head,
    Torso,
    Legs,
    Feet,
}

/// Movement control flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Control {
    Forward,
    Back,
    Left,
    Right,
    Jump,
    Sprint,
    Sneak,
}

/// Classification of one ally's threat situation, strongest first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GuardScenario {
    #[default]
    Safe,
    CreeperEmergency,
    Surrounded,
    HighThreat,
    Chasing,
    NormalCombat,
}

/// Coarse guard posture exposed for presentation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GuardMode {
    #[default]
    Passive,
    Active,
    Emergency,
}

/// Direction bucket relative to the agent's facing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Front,
    Behind,
    Left,
    Right,
}

/// Why an entity matters to the reflex layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DangerKind {
    Projectile,
    Ranged,
    Explosive,
}

/// Mutually exclusive action mode of the engagement executor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Activity {
    #[default]
    Idle,
    /// Holding a target: attacking in reach or chasing it.
    Engaged,
    /// Running from danger; no attacks are issued.
    Fleeing(FleeReason),
    /// Consuming food; no movement or attacks are issued.
    Eating,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FleeReason {
    LowHealth,
    Explosive,
}

/// Why the engagement target was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClearReason {
    /// Target despawned, died or vanished from the snapshot.
    Invalid,
    /// Target player left the hostility ledger.
    Forgiven,
    /// Target moved beyond chase range.
    OutOfRange,
    /// Target dropped to run away.
    Fleeing,
}
