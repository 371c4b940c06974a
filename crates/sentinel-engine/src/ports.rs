//! Collaborator contracts the engine drives but does not own.
//!
//! `WorldView` is read once per tick into a `Snapshot`. `Navigation` and
//! `ActionSurface` are fire-and-forget from the engine's point of view:
//! failures are logged and the decision is retried on the next tick.

use sentinel_ai::classify::ThreatScan;
use sentinel_ai::hostility::HostilityLedger;
use sentinel_core::entity::{AgentState, Entity};
use sentinel_core::enums::{Control, EquipSlot, Hand};
use sentinel_core::error::{ActionError, NavError};
use sentinel_core::items::ItemKind;
use sentinel_core::types::{EntityId, Millis, Position};

/// Read-only view of the game world.
pub trait WorldView {
    /// Every visible entity. Dead or despawned entities are reported with
    /// `valid == false` rather than silently dropped.
    fn entities(&self) -> Vec<Entity>;

    /// The agent's own position, health, facing and inventory.
    fn agent(&self) -> AgentState;
}

/// Movement and pathfinding.
pub trait Navigation {
    /// Walk toward `goal`. `continuous` keeps following the goal once reached.
    fn move_toward(&mut self, goal: Position, continuous: bool) -> Result<(), NavError>;

    /// Keep `standoff` blocks away from a moving entity.
    fn follow_entity(&mut self, target: EntityId, standoff: f64) -> Result<(), NavError>;

    /// Cancel the current goal.
    fn stop(&mut self);
}

/// Low-level actions on the agent's body.
pub trait ActionSurface {
    fn attack(&mut self, target: EntityId) -> Result<(), ActionError>;

    fn equip(&mut self, item: ItemKind, slot: EquipSlot) -> Result<(), ActionError>;

    /// Start using the item in `hand` (eat, raise shield).
    fn activate_item(&mut self, hand: Hand) -> Result<(), ActionError>;

    /// Stop using whatever item is in use.
    fn deactivate_item(&mut self);

    fn look_at(&mut self, point: Position);

    fn set_control(&mut self, control: Control, state: bool);

    /// Release every movement control.
    fn clear_controls(&mut self);
}

/// Everything the engine drives in one tick.
pub trait Host: WorldView + Navigation + ActionSurface {}

impl<T: WorldView + Navigation + ActionSurface + ?Sized> Host for T {}

/// World state read at the start of a tick.
///
/// The agent record is updated locally when the engine equips something so
/// later steps of the same tick see the change.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub agent: AgentState,
    pub entities: Vec<Entity>,
}

impl Snapshot {
    pub fn capture(world: &(impl WorldView + ?Sized)) -> Self {
        Self {
            agent: world.agent(),
            entities: world.entities(),
        }
    }

    /// A valid entity by id. The agent itself is never returned.
    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        if id == self.agent.id {
            return None;
        }
        self.entities.iter().find(|e| e.id == id && e.valid)
    }

    pub fn scan<'a>(&'a self, ledger: &HostilityLedger, now: Millis) -> ThreatScan<'a> {
        ThreatScan::build(&self.agent, &self.entities, ledger, now)
    }

    /// Record a successful equip so the rest of the tick sees it.
    pub fn note_equipped(&mut self, item: ItemKind, slot: EquipSlot) {
        match slot {
            EquipSlot::MainHand => self.agent.main_hand = Some(item),
            EquipSlot::OffHand => self.agent.off_hand = Some(item),
            armor_slot => {
                self.agent
                    .armor
                    .retain(|worn| worn.armor().map(|(s, _)| s) != Some(armor_slot));
                self.agent.armor.push(item);
            }
        }
    }
}
