//! Entity spawn factories for the simulated world.
//!
//! Creates creatures, players and projectiles with the component bundles
//! their behavior needs. Ids are allocated by `SimWorld`.

use glam::DVec3;
use hecs::World;

use sentinel_core::constants::MAX_HEALTH;
use sentinel_core::enums::{EntityKind, MobKind, ProjectileKind};
use sentinel_core::types::{EntityId, Millis, Position};
use sentinel_engine::ai::profiles::get_profile;

use crate::components::*;

/// Melee swing interval of hostile creatures.
const MOB_HIT_COOLDOWN_MS: Millis = 1000;

/// Arrow lifetime before it drops out of the world.
const ARROW_LIFETIME_MS: Millis = 3000;

const ARROW_DAMAGE: f64 = 3.0;

/// Spawn a creature. Hostile creatures pursue the agent; passive ones wander.
pub fn spawn_mob(world: &mut World, id: EntityId, kind: MobKind, position: Position) -> hecs::Entity {
    let (height, health, speed, damage) = mob_params(kind);
    let profile = get_profile(kind);

    let entity = world.spawn((
        Body {
            id,
            kind: EntityKind::Mob,
            name: kind.to_string(),
            username: None,
            height,
        },
        position,
        Velocity::default(),
        Health { current: health },
    ));

    if !profile.hostile {
        let _ = world.insert_one(
            entity,
            Wander {
                speed,
                next_turn_at: 0,
            },
        );
    } else if profile.ranged {
        let _ = world.insert_one(
            entity,
            Shooter {
                range: 15.0,
                interval_ms: 1500,
                next_shot_at: 0,
            },
        );
    } else {
        let _ = world.insert_one(
            entity,
            Pursue {
                quarry: Quarry::Agent,
                speed,
                damage,
                cooldown_ms: MOB_HIT_COOLDOWN_MS,
                next_hit_at: 0,
            },
        );
    }
    if profile.explosive {
        let _ = world.insert_one(entity, Fuse::default());
    }
    entity
}

/// Spawn a player that stands still.
pub fn spawn_player(world: &mut World, id: EntityId, username: &str, position: Position) -> hecs::Entity {
    world.spawn((
        Body {
            id,
            kind: EntityKind::Player,
            name: "player".to_string(),
            username: Some(username.to_string()),
            height: 1.62,
        },
        position,
        Velocity::default(),
        Health {
            current: MAX_HEALTH,
        },
    ))
}

/// Spawn a player that walks up to the agent and hits it.
pub fn spawn_attacker(world: &mut World, id: EntityId, username: &str, position: Position) -> hecs::Entity {
    let entity = spawn_player(world, id, username, position);
    let _ = world.insert_one(
        entity,
        Pursue {
            quarry: Quarry::Agent,
            speed: 4.0,
            damage: 3.0,
            cooldown_ms: 800,
            next_hit_at: 0,
        },
    );
    entity
}

/// Spawn an arrow flying with `velocity`.
pub fn spawn_arrow(
    world: &mut World,
    id: EntityId,
    position: Position,
    velocity: DVec3,
    now: Millis,
) -> hecs::Entity {
    world.spawn((
        Body {
            id,
            kind: EntityKind::Projectile,
            name: ProjectileKind::Arrow.to_string(),
            username: None,
            height: 0.0,
        },
        position,
        Velocity(velocity),
        Missile {
            damage: ARROW_DAMAGE,
            expires_at: now.saturating_add(ARROW_LIFETIME_MS),
        },
    ))
}

/// (eye height, max health, walk speed b/s, melee damage) of a creature.
fn mob_params(kind: MobKind) -> (f64, f64, f64, f64) {
    match kind {
        MobKind::Zombie | MobKind::Husk | MobKind::Drowned => (1.74, 20.0, 2.3, 3.0),
        MobKind::Skeleton | MobKind::Stray => (1.74, 20.0, 2.5, 0.0),
        MobKind::Creeper => (1.45, 20.0, 2.5, 0.0),
        MobKind::Spider | MobKind::CaveSpider => (0.65, 16.0, 3.0, 2.0),
        MobKind::Enderman => (2.55, 40.0, 3.0, 7.0),
        MobKind::Vindicator => (1.62, 24.0, 3.5, 10.0),
        MobKind::Warden => (2.5, 500.0, 3.0, 30.0),
        _ => (1.3, 10.0, 1.0, 2.0),
    }
}
