//! Cleanup system: despawns entities already reported dead and retires
//! anything that wandered out of bounds.

use std::collections::BTreeMap;

use hecs::World;

use sentinel_core::types::{EntityId, Position};

use crate::components::{Body, Dead};

/// Horizontal distance from the origin beyond which entities are retired.
pub const WORLD_BOUND: f64 = 128.0;

/// Uses a caller-owned buffer to avoid per-step allocation.
pub fn run(
    world: &mut World,
    ids: &mut BTreeMap<EntityId, hecs::Entity>,
    step: u64,
    despawn_buffer: &mut Vec<hecs::Entity>,
) {
    despawn_buffer.clear();
    let bound_sq = WORLD_BOUND * WORLD_BOUND;
    let mut strays = Vec::new();

    for (entity, (body, pos, dead)) in world.query_mut::<(&Body, &Position, Option<&Dead>)>() {
        match dead {
            Some(dead) if dead.visible_from < step => {
                ids.remove(&body.id);
                despawn_buffer.push(entity);
            }
            Some(_) => {}
            None if pos.x * pos.x + pos.z * pos.z > bound_sq => strays.push(entity),
            None => {}
        }
    }

    // Out-of-bounds entities are reported invalid once like any death.
    for entity in strays {
        let _ = world.insert_one(entity, Dead { visible_from: step });
    }
    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
