//! Explosive fuses, archers and in-flight projectiles.

use glam::DVec3;
use hecs::World;
use tracing::debug;

use sentinel_core::types::{EntityId, Millis, Position};

use crate::components::{Body, Dead, Fuse, Missile, Quarry, Shooter};
use crate::systems::Hit;

/// The fuse lights when the agent comes this close.
pub const FUSE_TRIGGER_RADIUS: f64 = 3.0;

/// A lit fuse goes out when the agent backs off this far.
pub const FUSE_CANCEL_RADIUS: f64 = 7.0;

pub const FUSE_MS: Millis = 1500;

/// Blocks per second.
pub const ARROW_SPEED: f64 = 20.0;

/// Height above the agent's feet that projectiles aim for and hit.
pub const AGENT_CHEST: f64 = 1.0;

pub const MISSILE_HIT_RADIUS: f64 = 1.0;

/// An explosive whose fuse ran out.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Blast {
    pub by: EntityId,
    pub at: Position,
}

/// An arrow to spawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArrowShot {
    pub from: Position,
    pub velocity: DVec3,
}

/// Light, cancel or detonate fuses depending on the agent's distance.
pub fn fuses(world: &mut World, agent: &Position, now: Millis, blasts: &mut Vec<Blast>) {
    for (_entity, (body, pos, fuse, dead)) in world.query_mut::<(&Body, &Position, &mut Fuse, Option<&Dead>)>() {
        if dead.is_some() {
            continue;
        }
        let distance = pos.distance_to(agent);
        match fuse.lit_at {
            None if distance < FUSE_TRIGGER_RADIUS => {
                debug!(id = ?body.id, "fuse lit");
                fuse.lit_at = Some(now);
            }
            Some(_) if distance > FUSE_CANCEL_RADIUS => {
                debug!(id = ?body.id, "fuse out");
                fuse.lit_at = None;
            }
            Some(lit) if now.saturating_sub(lit) >= FUSE_MS => blasts.push(Blast {
                by: body.id,
                at: *pos,
            }),
            _ => {}
        }
    }
}

/// Archers in range loose an arrow at the agent's chest.
pub fn shooters(world: &mut World, agent: &Position, now: Millis, shots: &mut Vec<ArrowShot>) {
    let aim = agent.offset(0.0, AGENT_CHEST, 0.0).to_vec();
    for (_entity, (body, pos, shooter, dead)) in world.query_mut::<(&Body, &Position, &mut Shooter, Option<&Dead>)>() {
        if dead.is_some() || now < shooter.next_shot_at || pos.distance_to(agent) > shooter.range {
            continue;
        }
        shooter.next_shot_at = now + shooter.interval_ms;
        let from = pos.offset(0.0, body.height, 0.0).to_vec();
        let dir = (aim - from).normalize_or_zero();
        // Released one block out so the archer is clear of its own arrow
        shots.push(ArrowShot {
            from: Position::from_vec(from + dir),
            velocity: dir * ARROW_SPEED,
        });
    }
}

/// Projectiles that reached the agent or ran out of time. Hits and spent
/// projectiles are reported; `SimWorld` applies them.
pub fn missiles(
    world: &World,
    agent: &Position,
    now: Millis,
    hits: &mut Vec<Hit>,
    spent: &mut Vec<EntityId>,
) {
    let chest = agent.offset(0.0, AGENT_CHEST, 0.0);
    for (_entity, (body, pos, missile, dead)) in world
        .query::<(&Body, &Position, &Missile, Option<&Dead>)>()
        .iter()
    {
        if dead.is_some() {
            continue;
        }
        if now >= missile.expires_at {
            spent.push(body.id);
        } else if pos.distance_to(&chest) < MISSILE_HIT_RADIUS {
            hits.push(Hit {
                victim: Quarry::Agent,
                amount: missile.damage,
                source: *pos,
                by: body.id,
            });
            spent.push(body.id);
        }
    }
}
