//! Kinematic integration: position += velocity * dt for every live entity.

use hecs::World;

use sentinel_core::types::Position;

use crate::components::{Dead, Velocity};

pub fn run(world: &mut World, dt: f64) {
    for (_entity, (pos, vel, dead)) in world.query_mut::<(&mut Position, &Velocity, Option<&Dead>)>() {
        if dead.is_some() {
            continue;
        }
        *pos = Position::from_vec(pos.to_vec() + vel.0 * dt);
    }
}
