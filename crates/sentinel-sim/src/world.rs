//! Simulated world: a hecs ECS of creatures, players and projectiles plus
//! the agent's own body.
//!
//! `SimWorld` implements the engine's collaborator ports, so the companion
//! engine drives it exactly as it would a live game connection. Completely
//! headless and seeded: the same seed and the same calls give the same run.

use std::collections::BTreeMap;
use std::f64::consts::FRAC_PI_2;

use glam::DVec3;
use hecs::World;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use sentinel_core::constants::{ATTACK_REACH, EAT_DURATION_MS, MAX_HEALTH, TICK_MS};
use sentinel_core::entity::{AgentState, Entity};
use sentinel_core::enums::{Control, EquipSlot, Hand, MobKind};
use sentinel_core::error::{ActionError, NavError};
use sentinel_core::items::ItemKind;
use sentinel_core::types::{EntityId, Facing, Millis, Position};
use sentinel_engine::ports::{ActionSurface, Navigation, WorldView};

use crate::components::{Body, Dead, Fuse, Health, Pursue, Quarry};
use crate::systems;
use crate::systems::hazards::Blast;
use crate::systems::Hit;
use crate::world_setup;

/// Eye height of the agent, for aiming.
const AGENT_EYE_HEIGHT: f64 = 1.62;

/// Tolerance on top of the engine's reach before a swing is refused.
const REACH_SLACK: f64 = 0.5;

/// Point goals count as reached inside this distance.
const ARRIVAL_RADIUS: f64 = 0.5;

const BLAST_RADIUS: f64 = 6.0;
const BLAST_DAMAGE: f64 = 12.0;

/// Configuration for a simulated world.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// RNG seed. Same seed = same run.
    pub seed: u64,
    /// Navigation goals farther than this are unreachable.
    pub nav_range: f64,
    /// Blocks per second.
    pub walk_speed: f64,
    pub sprint_speed: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            nav_range: 48.0,
            walk_speed: 4.3,
            sprint_speed: 5.6,
        }
    }
}

/// Current navigation goal of the agent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NavGoal {
    Point { goal: Position, continuous: bool },
    Follow { target: EntityId, standoff: f64 },
}

/// Something the action surface did, in call order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SimAction {
    Attack { target: EntityId, damage: f64 },
    Equip { item: ItemKind, slot: EquipSlot },
    Activate(Hand),
    Deactivate,
    Ate { food: ItemKind, healed: f64 },
}

/// Observable world events, drained by the driver after each step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SimEvent {
    /// An entity or the agent took damage.
    Hurt { victim: EntityId, amount: f64 },
    Died(EntityId),
    Exploded { by: EntityId, at: Position },
}

/// Entity to add to a running world.
#[derive(Debug, Clone, PartialEq)]
pub enum Spawn {
    Mob { kind: MobKind, position: Position },
    Ally { username: String, position: Position },
    /// A player that walks up to the agent and hits it.
    Attacker { username: String, position: Position },
}

pub struct SimWorld {
    world: World,
    ids: BTreeMap<EntityId, hecs::Entity>,
    next_id: u32,
    agent: AgentState,
    nav: Option<NavGoal>,
    controls: Vec<Control>,
    using: Option<Hand>,
    /// Food being eaten and when the meal started.
    meal: Option<(ItemKind, Millis)>,
    now: Millis,
    step: u64,
    rng: ChaCha8Rng,
    config: SimConfig,
    actions: Vec<SimAction>,
    events: Vec<SimEvent>,
    despawn_buffer: Vec<hecs::Entity>,
}

impl SimWorld {
    pub fn new(config: SimConfig, agent: AgentState) -> Self {
        Self {
            world: World::new(),
            ids: BTreeMap::new(),
            next_id: agent.id.0 + 1,
            agent,
            nav: None,
            controls: Vec::new(),
            using: None,
            meal: None,
            now: 0,
            step: 0,
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            config,
            actions: Vec::new(),
            events: Vec::new(),
            despawn_buffer: Vec::new(),
        }
    }

    /// Current world time.
    pub fn now(&self) -> Millis {
        self.now
    }

    /// Number of steps run so far.
    pub fn steps(&self) -> u64 {
        self.step
    }

    pub fn agent_state(&self) -> &AgentState {
        &self.agent
    }

    pub fn agent_mut(&mut self) -> &mut AgentState {
        &mut self.agent
    }

    pub fn set_agent_health(&mut self, health: f64) {
        self.agent.health = health.clamp(0.0, MAX_HEALTH);
    }

    pub fn nav_goal(&self) -> Option<NavGoal> {
        self.nav
    }

    /// Movement controls currently held.
    pub fn controls(&self) -> &[Control] {
        &self.controls
    }

    pub fn item_in_use(&self) -> Option<Hand> {
        self.using
    }

    /// Shield raised in the off hand.
    pub fn is_blocking(&self) -> bool {
        self.using == Some(Hand::Off) && self.agent.off_hand == Some(ItemKind::Shield)
    }

    /// Every action-surface call that took effect, oldest first.
    pub fn actions(&self) -> &[SimAction] {
        &self.actions
    }

    pub fn take_events(&mut self) -> Vec<SimEvent> {
        std::mem::take(&mut self.events)
    }

    /// Read-only access to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Entity still present, alive or awaiting cleanup.
    pub fn contains(&self, id: EntityId) -> bool {
        self.ids.contains_key(&id)
    }

    pub fn is_alive(&self, id: EntityId) -> bool {
        self.handle(id).is_some()
    }

    /// Position of a live entity.
    pub fn position_of(&self, id: EntityId) -> Option<Position> {
        let entity = self.handle(id)?;
        self.world.get::<&Position>(entity).ok().map(|p| *p)
    }

    pub fn health_of(&self, id: EntityId) -> Option<f64> {
        let entity = *self.ids.get(&id)?;
        self.world.get::<&Health>(entity).ok().map(|h| h.current)
    }

    // --- Spawning ---

    pub fn spawn(&mut self, spawn: &Spawn) -> EntityId {
        match spawn {
            Spawn::Mob { kind, position } => self.spawn_mob(*kind, *position),
            Spawn::Ally { username, position } => self.spawn_ally(username, *position),
            Spawn::Attacker { username, position } => self.spawn_attacker(username, *position),
        }
    }

    pub fn spawn_mob(&mut self, kind: MobKind, position: Position) -> EntityId {
        let id = self.alloc_id();
        let entity = world_setup::spawn_mob(&mut self.world, id, kind, position);
        self.ids.insert(id, entity);
        id
    }

    pub fn spawn_ally(&mut self, username: &str, position: Position) -> EntityId {
        let id = self.alloc_id();
        let entity = world_setup::spawn_player(&mut self.world, id, username, position);
        self.ids.insert(id, entity);
        id
    }

    pub fn spawn_attacker(&mut self, username: &str, position: Position) -> EntityId {
        let id = self.alloc_id();
        let entity = world_setup::spawn_attacker(&mut self.world, id, username, position);
        self.ids.insert(id, entity);
        id
    }

    pub fn spawn_arrow(&mut self, position: Position, velocity: DVec3) -> EntityId {
        let id = self.alloc_id();
        let entity = world_setup::spawn_arrow(&mut self.world, id, position, velocity, self.now);
        self.ids.insert(id, entity);
        id
    }

    /// Point a pursuer at a new quarry. Returns false if `id` does not pursue.
    pub fn hunt(&mut self, id: EntityId, quarry: Quarry) -> bool {
        let Some(entity) = self.handle(id) else {
            return false;
        };
        match self.world.get::<&mut Pursue>(entity) {
            Ok(mut pursue) => {
                pursue.quarry = quarry;
                true
            }
            Err(_) => false,
        }
    }

    /// Remove an entity as if it died. It is reported invalid on the next step.
    pub fn kill(&mut self, id: EntityId) -> bool {
        self.mark_dead(id, self.step + 1)
    }

    // --- Stepping ---

    /// Advance the world by one tick.
    pub fn step(&mut self) {
        self.now += TICK_MS;
        self.step += 1;
        let dt = TICK_MS as f64 / 1000.0;

        // 1. Drop entities already reported dead
        systems::cleanup::run(&mut self.world, &mut self.ids, self.step, &mut self.despawn_buffer);
        // 2. Meal completion
        self.finish_meal();
        // 3. Creature behavior
        let mut hits = Vec::new();
        systems::mob_ai::run(&mut self.world, &self.agent.position, self.now, &mut self.rng, &mut hits);
        // 4. Fuses and archers
        let mut blasts = Vec::new();
        systems::hazards::fuses(&mut self.world, &self.agent.position, self.now, &mut blasts);
        let mut shots = Vec::new();
        systems::hazards::shooters(&mut self.world, &self.agent.position, self.now, &mut shots);
        for shot in shots {
            self.spawn_arrow(shot.from, shot.velocity);
        }
        // 5. Movement integration
        systems::movement::run(&mut self.world, dt);
        self.move_agent(dt);
        // 6. Projectile impacts
        let mut spent = Vec::new();
        systems::hazards::missiles(&self.world, &self.agent.position, self.now, &mut hits, &mut spent);
        for id in spent {
            self.mark_dead(id, self.step);
        }
        // 7. Damage
        for blast in blasts {
            self.explode(blast);
        }
        for hit in hits {
            self.apply_hit(hit);
        }
    }

    fn alloc_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// hecs handle of a live entity.
    fn handle(&self, id: EntityId) -> Option<hecs::Entity> {
        let entity = *self.ids.get(&id)?;
        if self.world.get::<&Dead>(entity).is_ok() {
            return None;
        }
        Some(entity)
    }

    fn mark_dead(&mut self, id: EntityId, visible_from: u64) -> bool {
        let Some(entity) = self.handle(id) else {
            return false;
        };
        self.world.insert_one(entity, Dead { visible_from }).is_ok()
    }

    fn finish_meal(&mut self) {
        let Some((food, started)) = self.meal else {
            return;
        };
        if self.now.saturating_sub(started) < EAT_DURATION_MS {
            return;
        }
        self.meal = None;
        self.using = None;
        if self.agent.inventory.consume(food) {
            let healed = food_heal(food);
            self.agent.health = (self.agent.health + healed).min(MAX_HEALTH);
            debug!(%food, healed, "meal eaten");
            self.actions.push(SimAction::Ate { food, healed });
        }
    }

    fn move_agent(&mut self, dt: f64) {
        let speed = if self.controls.contains(&Control::Sprint) {
            self.config.sprint_speed
        } else {
            self.config.walk_speed
        };
        let stride = speed * dt;

        match self.nav {
            Some(NavGoal::Point { goal, continuous }) => {
                if self.walk_toward(&goal, ARRIVAL_RADIUS, stride) && !continuous {
                    self.nav = None;
                }
            }
            Some(NavGoal::Follow { target, standoff }) => match self.position_of(target) {
                Some(goal) => {
                    self.walk_toward(&goal, standoff, stride);
                }
                None => self.nav = None,
            },
            None => {
                let forward = self.agent.facing.forward();
                let mut dir = DVec3::ZERO;
                if self.controls.contains(&Control::Forward) {
                    dir += forward;
                }
                if self.controls.contains(&Control::Back) {
                    dir -= forward;
                }
                if let Some(dir) = dir.try_normalize() {
                    self.agent.position = Position::from_vec(self.agent.position.to_vec() + dir * stride);
                }
            }
        }
    }

    /// Move up to `stride` toward `goal`, stopping `stop_at` short of it.
    /// Returns true once within `stop_at`.
    fn walk_toward(&mut self, goal: &Position, stop_at: f64, stride: f64) -> bool {
        let pos = self.agent.position;
        let offset = DVec3::new(goal.x - pos.x, 0.0, goal.z - pos.z);
        let distance = offset.length();
        if distance <= stop_at {
            return true;
        }
        let advance = stride.min(distance - stop_at);
        self.agent.position = Position::from_vec(pos.to_vec() + offset / distance * advance);
        distance - advance <= stop_at
    }

    fn explode(&mut self, blast: Blast) {
        if !self.mark_dead(blast.by, self.step) {
            return;
        }
        info!(by = ?blast.by, "explosion");
        self.events.push(SimEvent::Exploded {
            by: blast.by,
            at: blast.at,
        });
        let distance = self.agent.position.distance_to(&blast.at);
        if distance < BLAST_RADIUS {
            let mut amount = BLAST_DAMAGE * (1.0 - distance / BLAST_RADIUS);
            if self.shield_faces(&blast.at) {
                amount /= 2.0;
            }
            self.damage_agent(amount);
        }
    }

    fn apply_hit(&mut self, hit: Hit) {
        match hit.victim {
            Quarry::Agent => {
                if self.shield_faces(&hit.source) {
                    debug!(by = ?hit.by, "blocked");
                    return;
                }
                self.damage_agent(hit.amount);
            }
            Quarry::Entity(id) => {
                self.damage_entity(id, hit.amount, self.step);
            }
        }
    }

    fn shield_faces(&self, source: &Position) -> bool {
        self.is_blocking()
            && self
                .agent
                .facing
                .relative_angle(self.agent.position.yaw_to(source))
                .abs()
                < FRAC_PI_2
    }

    fn damage_agent(&mut self, amount: f64) {
        self.agent.health = (self.agent.health - amount).max(0.0);
        debug!(amount, health = self.agent.health, "agent hurt");
        self.events.push(SimEvent::Hurt {
            victim: self.agent.id,
            amount,
        });
    }

    /// Returns whether the entity died.
    fn damage_entity(&mut self, id: EntityId, amount: f64, visible_from: u64) -> bool {
        let Some(entity) = self.handle(id) else {
            return false;
        };
        let died = match self.world.get::<&mut Health>(entity) {
            Ok(mut health) => {
                health.current -= amount;
                health.current <= 0.0
            }
            Err(_) => false,
        };
        self.events.push(SimEvent::Hurt { victim: id, amount });
        if died {
            info!(?id, "entity died");
            self.mark_dead(id, visible_from);
            self.events.push(SimEvent::Died(id));
        }
        died
    }
}

/// Melee damage of the held item.
pub fn weapon_damage(item: Option<ItemKind>) -> f64 {
    match item.and_then(ItemKind::weapon_tier) {
        // Swords
        Some(tier) if tier >= 6 => tier as f64 - 2.0,
        // Axes
        Some(tier) => 4.0 + tier as f64,
        None => 1.0,
    }
}

fn food_heal(food: ItemKind) -> f64 {
    food.food_priority().map_or(0.0, |p| 2.0 + p as f64)
}

impl WorldView for SimWorld {
    fn entities(&self) -> Vec<Entity> {
        let mut entities: Vec<Entity> = self
            .world
            .query::<(&Body, &Position, Option<&Fuse>, Option<&Dead>)>()
            .iter()
            .map(|(_, (body, pos, fuse, dead))| Entity {
                id: body.id,
                kind: body.kind,
                name: body.name.clone(),
                username: body.username.clone(),
                position: *pos,
                facing: None,
                height: body.height,
                valid: dead.is_none(),
                fusing: fuse.is_some_and(|f| f.lit_at.is_some()),
            })
            .collect();
        entities.sort_by_key(|e| e.id);
        entities
    }

    fn agent(&self) -> AgentState {
        self.agent.clone()
    }
}

impl Navigation for SimWorld {
    fn move_toward(&mut self, goal: Position, continuous: bool) -> Result<(), NavError> {
        if self.agent.position.horizontal_distance_to(&goal) > self.config.nav_range {
            return Err(NavError::Unreachable);
        }
        self.nav = Some(NavGoal::Point { goal, continuous });
        Ok(())
    }

    fn follow_entity(&mut self, target: EntityId, standoff: f64) -> Result<(), NavError> {
        let Some(position) = self.position_of(target) else {
            return Err(NavError::UnknownTarget(target));
        };
        if self.agent.position.horizontal_distance_to(&position) > self.config.nav_range {
            return Err(NavError::Unreachable);
        }
        self.nav = Some(NavGoal::Follow { target, standoff });
        Ok(())
    }

    fn stop(&mut self) {
        self.nav = None;
    }
}

impl ActionSurface for SimWorld {
    fn attack(&mut self, target: EntityId) -> Result<(), ActionError> {
        let Some(position) = self.position_of(target) else {
            return Err(ActionError::InvalidTarget(target));
        };
        if self.agent.position.distance_to(&position) > ATTACK_REACH + REACH_SLACK {
            return Err(ActionError::Rejected("target out of reach".into()));
        }
        let damage = weapon_damage(self.agent.main_hand);
        self.actions.push(SimAction::Attack { target, damage });
        self.damage_entity(target, damage, self.step + 1);
        Ok(())
    }

    fn equip(&mut self, item: ItemKind, slot: EquipSlot) -> Result<(), ActionError> {
        if !self.agent.inventory.contains(item) {
            return Err(ActionError::MissingItem { item, slot });
        }
        match slot {
            EquipSlot::MainHand => {
                // Swapping the main hand ends a meal
                if self.meal.take().is_some() {
                    self.using = None;
                }
                self.agent.main_hand = Some(item);
            }
            EquipSlot::OffHand => self.agent.off_hand = Some(item),
            armor_slot => {
                if item.armor().map(|(s, _)| s) != Some(armor_slot) {
                    return Err(ActionError::Rejected(format!(
                        "{item} does not fit {armor_slot:?}"
                    )));
                }
                self.agent
                    .armor
                    .retain(|worn| worn.armor().map(|(s, _)| s) != Some(armor_slot));
                self.agent.armor.push(item);
            }
        }
        self.actions.push(SimAction::Equip { item, slot });
        Ok(())
    }

    fn activate_item(&mut self, hand: Hand) -> Result<(), ActionError> {
        let held = match hand {
            Hand::Main => self.agent.main_hand,
            Hand::Off => self.agent.off_hand,
        };
        let Some(item) = held else {
            return Err(ActionError::Rejected("nothing to use".into()));
        };
        if hand == Hand::Main && item.is_food() {
            self.meal = Some((item, self.now));
        }
        self.using = Some(hand);
        self.actions.push(SimAction::Activate(hand));
        Ok(())
    }

    fn deactivate_item(&mut self) {
        self.meal = None;
        if self.using.take().is_some() {
            self.actions.push(SimAction::Deactivate);
        }
    }

    fn look_at(&mut self, point: Position) {
        let eye = self.agent.position.offset(0.0, AGENT_EYE_HEIGHT, 0.0);
        let yaw = eye.yaw_to(&point);
        let pitch = (eye.y - point.y).atan2(eye.horizontal_distance_to(&point));
        self.agent.facing = Facing::new(yaw, pitch);
    }

    fn set_control(&mut self, control: Control, state: bool) {
        if state {
            if !self.controls.contains(&control) {
                self.controls.push(control);
            }
        } else {
            self.controls.retain(|c| *c != control);
        }
    }

    fn clear_controls(&mut self) {
        self.controls.clear();
    }
}
