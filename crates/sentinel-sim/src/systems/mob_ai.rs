//! Creature behavior: seeded random wander and melee pursuit.

use std::collections::BTreeMap;
use std::f64::consts::TAU;

use glam::DVec3;
use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use sentinel_core::types::{EntityId, Millis, Position};

use crate::components::{Body, Dead, Pursue, Quarry, Velocity, Wander};
use crate::systems::Hit;

/// Pursuers stop and swing inside this horizontal distance.
pub const MELEE_RANGE: f64 = 1.5;

pub fn run(
    world: &mut World,
    agent: &Position,
    now: Millis,
    rng: &mut ChaCha8Rng,
    hits: &mut Vec<Hit>,
) {
    wander(world, now, rng);
    pursue(world, agent, now, hits);
}

fn wander(world: &mut World, now: Millis, rng: &mut ChaCha8Rng) {
    for (_entity, (vel, wander, dead)) in world.query_mut::<(&mut Velocity, &mut Wander, Option<&Dead>)>() {
        if dead.is_some() || now < wander.next_turn_at {
            continue;
        }
        wander.next_turn_at = now + rng.gen_range(1000..4000);
        vel.0 = if rng.gen_bool(0.3) {
            DVec3::ZERO
        } else {
            let heading: f64 = rng.gen_range(0.0..TAU);
            DVec3::new(heading.sin(), 0.0, heading.cos()) * wander.speed
        };
    }
}

fn pursue(world: &mut World, agent: &Position, now: Millis, hits: &mut Vec<Hit>) {
    // Quarry positions are read before the mutable pass.
    let positions: BTreeMap<EntityId, Position> = world
        .query::<(&Body, &Position, Option<&Dead>)>()
        .iter()
        .filter(|(_, (_, _, dead))| dead.is_none())
        .map(|(_, (body, pos, _))| (body.id, *pos))
        .collect();

    for (_entity, (body, pos, vel, pursue, dead)) in
        world.query_mut::<(&Body, &Position, &mut Velocity, &mut Pursue, Option<&Dead>)>()
    {
        if dead.is_some() {
            continue;
        }
        let target = match pursue.quarry {
            Quarry::Agent => Some(*agent),
            Quarry::Entity(id) => positions.get(&id).copied(),
        };
        let Some(target) = target else {
            vel.0 = DVec3::ZERO;
            continue;
        };

        let offset = DVec3::new(target.x - pos.x, 0.0, target.z - pos.z);
        let distance = offset.length();
        if distance > MELEE_RANGE {
            vel.0 = offset / distance * pursue.speed;
            continue;
        }
        vel.0 = DVec3::ZERO;
        if pursue.damage > 0.0 && now >= pursue.next_hit_at {
            pursue.next_hit_at = now + pursue.cooldown_ms;
            hits.push(Hit {
                victim: pursue.quarry,
                amount: pursue.damage,
                source: *pos,
                by: body.id,
            });
        }
    }
}
