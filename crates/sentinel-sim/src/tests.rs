//! Tests for the simulated world, its ports and full engine runs on presets.

use sentinel_core::enums::*;
use sentinel_core::error::{ActionError, NavError};
use sentinel_core::events::Notification;
use sentinel_core::items::ItemKind;
use sentinel_core::types::{EntityId, Position};
use sentinel_engine::ports::{ActionSurface, Navigation, WorldView};
use sentinel_engine::CompanionEngine;

use crate::driver::drive;
use crate::scenario::{self, starting_agent, Scenario, ALLY_NAME, ATTACKER_NAME};
use crate::world::{NavGoal, SimAction, SimConfig, SimEvent, SimWorld};

fn at(x: f64, z: f64) -> Position {
    Position::new(x, 64.0, z)
}

fn bare_world() -> SimWorld {
    SimWorld::new(SimConfig::default(), starting_agent())
}

fn seeded(seed: u64) -> SimConfig {
    SimConfig {
        seed,
        ..Default::default()
    }
}

fn notes(engine: &mut CompanionEngine) -> Vec<Notification> {
    engine
        .drain_notifications()
        .into_iter()
        .map(|s| s.notification)
        .collect()
}

// ---- Determinism ----

#[test]
fn test_determinism_same_seed() {
    let mut world_a = scenario::build(Scenario::LoneZombie, seeded(12345));
    let mut world_b = scenario::build(Scenario::LoneZombie, seeded(12345));
    let mut engine_a = CompanionEngine::default();
    let mut engine_b = CompanionEngine::default();

    for _ in 0..200 {
        let report_a = drive(&mut world_a, &mut engine_a);
        let report_b = drive(&mut world_b, &mut engine_b);
        assert_eq!(
            serde_json::to_string(&report_a).unwrap(),
            serde_json::to_string(&report_b).unwrap(),
            "Reports diverged with same seed"
        );
        assert_eq!(
            serde_json::to_string(&world_a.entities()).unwrap(),
            serde_json::to_string(&world_b.entities()).unwrap(),
            "Worlds diverged with same seed"
        );
    }
}

#[test]
fn test_determinism_different_seeds() {
    let mut world_a = scenario::build(Scenario::LoneZombie, seeded(111));
    let mut world_b = scenario::build(Scenario::LoneZombie, seeded(222));
    // The cow's wander is the only random input.
    let cow = EntityId(3);

    let mut diverged = false;
    for _ in 0..200 {
        world_a.step();
        world_b.step();
        if world_a.position_of(cow) != world_b.position_of(cow) {
            diverged = true;
            break;
        }
    }
    assert!(diverged, "Different seeds should produce divergent wander");
}

// ---- Entity lifecycle ----

#[test]
fn test_dead_entity_reported_once() {
    let mut world = bare_world();
    let zombie = world.spawn_mob(MobKind::Zombie, at(2.0, 0.0));
    assert!(world.kill(zombie));
    assert!(!world.kill(zombie), "killed twice");

    world.step();
    let entities = world.entities();
    assert_eq!(entities.len(), 1);
    assert!(!entities[0].valid);

    world.step();
    assert!(world.entities().is_empty());
    assert!(!world.contains(zombie));
}

#[test]
fn test_out_of_bounds_entity_retired() {
    let mut world = bare_world();
    let cow = world.spawn_mob(MobKind::Cow, at(200.0, 0.0));
    world.step();
    assert!(!world.is_alive(cow));
    assert!(world.contains(cow));
    world.step();
    assert!(!world.contains(cow));
}

#[test]
fn test_snapshot_sorted_by_id() {
    let mut world = bare_world();
    world.spawn_ally("Kai", at(5.0, 0.0));
    world.spawn_mob(MobKind::Zombie, at(-5.0, 0.0));
    world.spawn_mob(MobKind::Creeper, at(0.0, 9.0));
    let ids: Vec<EntityId> = world.entities().iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![EntityId(1), EntityId(2), EntityId(3)]);
    assert_eq!(world.agent().id, EntityId(0));
}

// ---- Navigation ----

#[test]
fn test_move_toward_arrives_and_stops() {
    let mut world = bare_world();
    assert_eq!(
        world.move_toward(at(100.0, 0.0), false),
        Err(NavError::Unreachable)
    );
    assert!(world.move_toward(at(10.0, 0.0), false).is_ok());
    for _ in 0..60 {
        world.step();
    }
    assert!(world.agent_state().position.x >= 9.5);
    assert_eq!(world.nav_goal(), None);
}

#[test]
fn test_follow_keeps_standoff() {
    let mut world = bare_world();
    let kai = world.spawn_ally("Kai", at(10.0, 0.0));
    assert_eq!(
        world.follow_entity(EntityId(99), 2.5),
        Err(NavError::UnknownTarget(EntityId(99)))
    );
    world.follow_entity(kai, 2.5).unwrap();
    for _ in 0..60 {
        world.step();
    }
    let distance = world
        .agent_state()
        .position
        .horizontal_distance_to(&at(10.0, 0.0));
    assert!((distance - 2.5).abs() < 1e-6, "standoff {distance}");
    assert!(matches!(world.nav_goal(), Some(NavGoal::Follow { .. })));

    world.stop();
    assert_eq!(world.nav_goal(), None);
}

#[test]
fn test_controls_walk_along_facing() {
    let mut world = bare_world();
    world.set_control(Control::Forward, true);
    for _ in 0..20 {
        world.step();
    }
    // Facing north: forward is -z
    let z = world.agent_state().position.z;
    assert!(z < -4.0, "walked to {z}");

    world.clear_controls();
    world.step();
    assert_eq!(world.agent_state().position.z, z);
}

// ---- Actions ----

#[test]
fn test_equip_rules() {
    let mut world = bare_world();
    assert_eq!(
        world.equip(ItemKind::DiamondSword, EquipSlot::MainHand),
        Err(ActionError::MissingItem {
            item: ItemKind::DiamondSword,
            slot: EquipSlot::MainHand
        })
    );
    assert!(matches!(
        world.equip(ItemKind::IronHelmet, EquipSlot::Torso),
        Err(ActionError::Rejected(_))
    ));
    world.equip(ItemKind::IronHelmet, EquipSlot::Head).unwrap();
    assert_eq!(world.agent_state().armor, vec![ItemKind::IronHelmet]);
    assert_eq!(
        world.actions(),
        &[SimAction::Equip {
            item: ItemKind::IronHelmet,
            slot: EquipSlot::Head
        }]
    );
}

#[test]
fn test_attack_damages_and_kills() {
    let mut world = bare_world();
    let zombie = world.spawn_mob(MobKind::Zombie, at(2.0, 0.0));
    let far = world.spawn_mob(MobKind::Zombie, at(6.0, 0.0));
    world.equip(ItemKind::IronSword, EquipSlot::MainHand).unwrap();

    assert!(matches!(world.attack(far), Err(ActionError::Rejected(_))));

    for _ in 0..3 {
        world.attack(zombie).unwrap();
    }
    assert_eq!(world.health_of(zombie), Some(2.0));
    world.attack(zombie).unwrap();
    assert!(!world.is_alive(zombie));
    assert!(world.take_events().contains(&SimEvent::Died(zombie)));
    assert_eq!(
        world.attack(zombie),
        Err(ActionError::InvalidTarget(zombie))
    );
}

#[test]
fn test_eating_heals_after_duration() {
    let mut world = bare_world();
    world.set_agent_health(10.0);
    world.equip(ItemKind::Bread, EquipSlot::MainHand).unwrap();
    world.activate_item(Hand::Main).unwrap();

    for _ in 0..31 {
        world.step();
    }
    assert_eq!(world.agent_state().health, 10.0);

    world.step();
    assert_eq!(world.agent_state().health, 16.0);
    assert_eq!(world.item_in_use(), None);
    assert!(world.actions().contains(&SimAction::Ate {
        food: ItemKind::Bread,
        healed: 6.0
    }));
    let bread = world
        .agent_state()
        .inventory
        .items
        .iter()
        .find(|s| s.kind == ItemKind::Bread)
        .map(|s| s.count);
    assert_eq!(bread, Some(7));
}

#[test]
fn test_deactivate_cancels_meal() {
    let mut world = bare_world();
    world.set_agent_health(10.0);
    world.equip(ItemKind::Bread, EquipSlot::MainHand).unwrap();
    world.activate_item(Hand::Main).unwrap();
    world.step();
    world.deactivate_item();
    for _ in 0..40 {
        world.step();
    }
    assert_eq!(world.agent_state().health, 10.0);
}

// ---- Hazards ----

#[test]
fn test_creeper_fuse_and_blast() {
    let mut world = bare_world();
    let creeper = world.spawn_mob(MobKind::Creeper, at(0.0, 2.0));

    world.step();
    assert!(world.entities()[0].fusing);

    for _ in 0..30 {
        world.step();
    }
    assert!(!world.is_alive(creeper));
    let events = world.take_events();
    assert!(events
        .iter()
        .any(|e| matches!(e, SimEvent::Exploded { by, .. } if *by == creeper)));
    let health = world.agent_state().health;
    assert!(health < 12.0 && health > 5.0, "health after blast {health}");
}

#[test]
fn test_shield_blocks_arrows() {
    let run = |block: bool| {
        let mut world = bare_world();
        world.spawn_mob(MobKind::Skeleton, at(0.0, -10.0));
        if block {
            world.equip(ItemKind::Shield, EquipSlot::OffHand).unwrap();
            world.activate_item(Hand::Off).unwrap();
            world.look_at(at(0.0, -10.0).offset(0.0, 1.74, 0.0));
        }
        for _ in 0..60 {
            world.step();
        }
        world.agent_state().health
    };
    assert_eq!(run(true), 20.0);
    assert!(run(false) < 20.0);
}

// ---- Engine runs ----

#[test]
fn test_lone_zombie_defended() {
    let mut world = scenario::build(Scenario::LoneZombie, SimConfig::default());
    let mut engine = CompanionEngine::default();
    let zombie = EntityId(2);

    for _ in 0..200 {
        drive(&mut world, &mut engine);
    }
    assert!(!world.is_alive(zombie));

    let swings = world
        .actions()
        .iter()
        .filter(|a| matches!(a, SimAction::Attack { target, .. } if *target == zombie))
        .count();
    assert!(swings >= 4, "only {swings} swings");

    let notes = notes(&mut engine);
    assert!(notes.iter().any(|n| matches!(
        n,
        Notification::ScenarioTriggered { ally, threat, .. } if ally == ALLY_NAME && *threat == zombie
    )));
    assert!(notes.contains(&Notification::TargetCleared {
        target: zombie,
        reason: ClearReason::Invalid
    }));
    assert!(engine.is_protected(ALLY_NAME, world.now()));
}

#[test]
fn test_hostile_player_marked_and_fought() {
    let mut world = scenario::build(Scenario::HostilePlayer, SimConfig::default());
    let mut engine = CompanionEngine::default();
    let raf = EntityId(2);

    for _ in 0..100 {
        drive(&mut world, &mut engine);
    }
    assert!(notes(&mut engine).contains(&Notification::HostileMarked {
        username: ATTACKER_NAME.into()
    }));
    assert!(world
        .actions()
        .iter()
        .any(|a| matches!(a, SimAction::Attack { target, .. } if *target == raf)));
}

#[test]
fn test_last_stand_flees() {
    let mut world = scenario::build(Scenario::LastStand, SimConfig::default());
    let mut engine = CompanionEngine::default();

    let report = drive(&mut world, &mut engine);
    assert_eq!(report.activity, Activity::Fleeing(FleeReason::LowHealth));
    assert!(matches!(world.nav_goal(), Some(NavGoal::Point { .. })));

    for _ in 0..40 {
        drive(&mut world, &mut engine);
    }
    let z = world.agent_state().position.z;
    assert!(z < -5.0, "only reached z = {z}");
    assert_eq!(world.agent_state().health, 5.0);
}

#[test]
fn test_skeleton_sniper_blocked() {
    let mut world = scenario::build(Scenario::SkeletonSniper, SimConfig::default());
    let mut engine = CompanionEngine::default();

    let mut blocked = false;
    for _ in 0..40 {
        blocked |= drive(&mut world, &mut engine).blocking;
    }
    assert!(blocked, "shield never raised");
    assert_eq!(world.agent_state().health, 20.0);
    assert_eq!(world.agent_state().off_hand, Some(ItemKind::Shield));
}

#[test]
fn test_armor_put_on_at_start() {
    let mut world = scenario::build(Scenario::LoneZombie, SimConfig::default());
    let mut engine = CompanionEngine::default();
    drive(&mut world, &mut engine);
    let armor = &world.agent_state().armor;
    assert!(armor.contains(&ItemKind::IronHelmet));
    assert!(armor.contains(&ItemKind::IronChestplate));
}

// ---- Presets ----

#[test]
fn test_scenario_names_parse() {
    assert_eq!("lone_zombie".parse::<Scenario>().unwrap(), Scenario::LoneZombie);
    for scenario in Scenario::ALL {
        let name = scenario.to_string();
        assert_eq!(name.parse::<Scenario>().unwrap(), scenario);
        let world = scenario::build(scenario, SimConfig::default());
        assert!(world
            .entities()
            .iter()
            .any(|e| e.username.as_deref() == Some(ALLY_NAME)));
    }
}
