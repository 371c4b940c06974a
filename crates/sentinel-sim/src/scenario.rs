//! Scenario presets: who stands where when the run starts.
//!
//! The agent always starts at the origin facing north (-z) with the same
//! kit. Ally `Kai` is present in every preset.

use serde::{Deserialize, Serialize};

use sentinel_core::entity::AgentState;
use sentinel_core::enums::MobKind;
use sentinel_core::items::{Inventory, ItemKind, ItemStack};
use sentinel_core::types::Position;

use crate::components::Quarry;
use crate::world::{SimConfig, SimWorld};

pub const AGENT_NAME: &str = "Sentinel";
pub const ALLY_NAME: &str = "Kai";
pub const ATTACKER_NAME: &str = "Raf";

/// Ground level of every preset.
const GROUND_Y: f64 = 64.0;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Scenario {
    /// One zombie going for the ally, a cow wandering nearby.
    LoneZombie,
    /// Three zombies closing in on the ally.
    SurroundedAlly,
    /// A creeper sneaking up behind the agent.
    CreeperAmbush,
    /// A skeleton shooting from range.
    SkeletonSniper,
    /// Another player attacking the agent.
    HostilePlayer,
    /// Agent at low health with zombies on it.
    LastStand,
}

impl Scenario {
    pub const ALL: [Scenario; 6] = [
        Scenario::LoneZombie,
        Scenario::SurroundedAlly,
        Scenario::CreeperAmbush,
        Scenario::SkeletonSniper,
        Scenario::HostilePlayer,
        Scenario::LastStand,
    ];
}

/// Build the world for a preset.
pub fn build(scenario: Scenario, config: SimConfig) -> SimWorld {
    let mut world = SimWorld::new(config, starting_agent());

    match scenario {
        Scenario::LoneZombie => {
            let kai = world.spawn_ally(ALLY_NAME, at(6.0, 0.0));
            let zombie = world.spawn_mob(MobKind::Zombie, at(10.0, 2.0));
            world.hunt(zombie, Quarry::Entity(kai));
            world.spawn_mob(MobKind::Cow, at(-6.0, -6.0));
        }
        Scenario::SurroundedAlly => {
            let kai = world.spawn_ally(ALLY_NAME, at(8.0, 0.0));
            for (x, z) in [(8.0, 4.0), (12.0, 0.0), (8.0, -4.0)] {
                let zombie = world.spawn_mob(MobKind::Zombie, at(x, z));
                world.hunt(zombie, Quarry::Entity(kai));
            }
        }
        Scenario::CreeperAmbush => {
            world.spawn_ally(ALLY_NAME, at(-5.0, 3.0));
            world.spawn_mob(MobKind::Creeper, at(0.0, 4.0));
        }
        Scenario::SkeletonSniper => {
            world.spawn_ally(ALLY_NAME, at(3.0, -3.0));
            world.spawn_mob(MobKind::Skeleton, at(0.0, -12.0));
        }
        Scenario::HostilePlayer => {
            world.spawn_ally(ALLY_NAME, at(-8.0, 0.0));
            world.spawn_attacker(ATTACKER_NAME, at(6.0, 4.0));
        }
        Scenario::LastStand => {
            world.set_agent_health(5.0);
            world.spawn_ally(ALLY_NAME, at(10.0, -2.0));
            world.spawn_mob(MobKind::Zombie, at(3.0, 3.0));
            world.spawn_mob(MobKind::Zombie, at(-4.0, 2.0));
        }
    }
    world
}

/// The agent's kit: two weapons, a shield, food and some armor to put on.
pub fn starting_agent() -> AgentState {
    let mut agent = AgentState::new(0, AGENT_NAME, at(0.0, 0.0));
    agent.inventory = Inventory::new(vec![
        ItemStack::new(ItemKind::StoneAxe, 1),
        ItemStack::new(ItemKind::IronSword, 1),
        ItemStack::new(ItemKind::Shield, 1),
        ItemStack::new(ItemKind::Bread, 8),
        ItemStack::new(ItemKind::CookedBeef, 4),
        ItemStack::new(ItemKind::IronHelmet, 1),
        ItemStack::new(ItemKind::IronChestplate, 1),
    ]);
    agent
}

fn at(x: f64, z: f64) -> Position {
    Position::new(x, GROUND_Y, z)
}
