//! One loop iteration: step the world, report damage, tick the engine.

use sentinel_engine::report::TickReport;
use sentinel_engine::CompanionEngine;

use crate::world::{SimEvent, SimWorld};

/// Advance `world` one step, forward every damage event to the engine, then
/// run one engine tick at the world's time.
pub fn drive(world: &mut SimWorld, engine: &mut CompanionEngine) -> TickReport {
    world.step();
    let now = world.now();
    for event in world.take_events() {
        if let SimEvent::Hurt { victim, .. } = event {
            engine.on_entity_hurt(now, victim, world);
        }
    }
    engine.tick(now, world)
}
