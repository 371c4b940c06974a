//! Read-only records exposed by the world snapshot.
//!
//! Records are plain data. The engine never mutates them; it reads a fresh
//! copy every tick.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_ENTITY_HEIGHT, MAX_HEALTH};
use crate::enums::{EntityKind, MobKind, ProjectileKind};
use crate::items::{Inventory, ItemKind};
use crate::types::{EntityId, Facing, Position};

/// One visible entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    pub kind: EntityKind,
    /// Game type name (`zombie`, `arrow`, `player`).
    pub name: String,
    /// Account name, players only.
    pub username: Option<String>,
    pub position: Position,
    pub facing: Option<Facing>,
    /// Eye height above `position`, used to aim at the head.
    pub height: f64,
    /// False once the entity died or despawned.
    pub valid: bool,
    /// Explosive creature has started its fuse.
    #[serde(default)]
    pub fusing: bool,
}

/// The agent's own state as seen by the snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentState {
    pub id: EntityId,
    pub username: String,
    pub position: Position,
    pub facing: Facing,
    pub health: f64,
    pub inventory: Inventory,
    pub main_hand: Option<ItemKind>,
    pub off_hand: Option<ItemKind>,
    /// Equipped armor, one entry per worn piece.
    #[serde(default)]
    pub armor: Vec<ItemKind>,
}

impl Entity {
    pub fn mob(id: u32, kind: MobKind, position: Position) -> Self {
        Self {
            id: EntityId(id),
            kind: EntityKind::Mob,
            name: kind.to_string(),
            username: None,
            position,
            facing: None,
            height: DEFAULT_ENTITY_HEIGHT,
            valid: true,
            fusing: false,
        }
    }

    pub fn player(id: u32, username: &str, position: Position) -> Self {
        Self {
            id: EntityId(id),
            kind: EntityKind::Player,
            name: "player".to_string(),
            username: Some(username.to_string()),
            position,
            facing: None,
            height: DEFAULT_ENTITY_HEIGHT,
            valid: true,
            fusing: false,
        }
    }

    pub fn projectile(id: u32, kind: ProjectileKind, position: Position) -> Self {
        Self {
            id: EntityId(id),
            kind: EntityKind::Projectile,
            name: kind.to_string(),
            username: None,
            position,
            facing: None,
            height: 0.0,
            valid: true,
            fusing: false,
        }
    }

    /// Creature type, if this is a mob with a known name.
    pub fn mob_kind(&self) -> Option<MobKind> {
        if self.kind != EntityKind::Mob {
            return None;
        }
        self.name.parse().ok()
    }

    /// Projectile type, if this is a known projectile.
    pub fn projectile_kind(&self) -> Option<ProjectileKind> {
        if self.kind != EntityKind::Projectile {
            return None;
        }
        self.name.parse().ok()
    }

    /// Aim point: the entity's position raised to its head height.
    pub fn head(&self) -> Position {
        self.position.offset(0.0, self.height, 0.0)
    }

    /// Display label: username for players, type name otherwise.
    pub fn label(&self) -> &str {
        self.username.as_deref().unwrap_or(&self.name)
    }
}

impl AgentState {
    pub fn new(id: u32, username: &str, position: Position) -> Self {
        Self {
            id: EntityId(id),
            username: username.to_string(),
            position,
            facing: Facing::default(),
            health: MAX_HEALTH,
            inventory: Inventory::default(),
            main_hand: None,
            off_hand: None,
            armor: Vec::new(),
        }
    }
}
