//! Recording fake host for engine tests.

use sentinel_core::entity::{AgentState, Entity};
use sentinel_core::enums::{Control, EquipSlot, Hand};
use sentinel_core::error::{ActionError, NavError};
use sentinel_core::items::ItemKind;
use sentinel_core::types::{EntityId, Position};

use crate::ports::{ActionSurface, Navigation, WorldView};

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    MoveToward(Position),
    Follow(EntityId, f64),
    Stop,
    Attack(EntityId),
    Equip(ItemKind, EquipSlot),
    Activate(Hand),
    Deactivate,
    LookAt(Position),
    Control(Control, bool),
    ClearControls,
}

#[derive(Debug, Clone)]
pub struct FakeHost {
    pub agent: AgentState,
    pub entities: Vec<Entity>,
    pub calls: Vec<Call>,
    pub fail_navigation: bool,
    pub fail_equip: bool,
}

impl FakeHost {
    pub fn new(agent: AgentState, entities: Vec<Entity>) -> Self {
        Self {
            agent,
            entities,
            calls: Vec::new(),
            fail_navigation: false,
            fail_equip: false,
        }
    }

    pub fn take_calls(&mut self) -> Vec<Call> {
        std::mem::take(&mut self.calls)
    }

    pub fn attacks(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, Call::Attack(_)))
            .count()
    }

    pub fn entity_mut(&mut self, id: u32) -> &mut Entity {
        self.entities
            .iter_mut()
            .find(|e| e.id == EntityId(id))
            .expect("entity exists")
    }
}

impl WorldView for FakeHost {
    fn entities(&self) -> Vec<Entity> {
        self.entities.clone()
    }

    fn agent(&self) -> AgentState {
        self.agent.clone()
    }
}

impl Navigation for FakeHost {
    fn move_toward(&mut self, goal: Position, _continuous: bool) -> Result<(), NavError> {
        self.calls.push(Call::MoveToward(goal));
        if self.fail_navigation {
            return Err(NavError::Unreachable);
        }
        Ok(())
    }

    fn follow_entity(&mut self, target: EntityId, standoff: f64) -> Result<(), NavError> {
        self.calls.push(Call::Follow(target, standoff));
        if self.fail_navigation {
            return Err(NavError::Unreachable);
        }
        Ok(())
    }

    fn stop(&mut self) {
        self.calls.push(Call::Stop);
    }
}

impl ActionSurface for FakeHost {
    fn attack(&mut self, target: EntityId) -> Result<(), ActionError> {
        self.calls.push(Call::Attack(target));
        Ok(())
    }

    fn equip(&mut self, item: ItemKind, slot: EquipSlot) -> Result<(), ActionError> {
        self.calls.push(Call::Equip(item, slot));
        if self.fail_equip || !self.agent.inventory.contains(item) {
            return Err(ActionError::MissingItem { item, slot });
        }
        match slot {
            EquipSlot::MainHand => self.agent.main_hand = Some(item),
            EquipSlot::OffHand => self.agent.off_hand = Some(item),
            _ => self.agent.armor.push(item),
        }
        Ok(())
    }

    fn activate_item(&mut self, hand: Hand) -> Result<(), ActionError> {
        self.calls.push(Call::Activate(hand));
        Ok(())
    }

    fn deactivate_item(&mut self) {
        self.calls.push(Call::Deactivate);
    }

    fn look_at(&mut self, point: Position) {
        self.calls.push(Call::LookAt(point));
    }

    fn set_control(&mut self, control: Control, state: bool) {
        self.calls.push(Call::Control(control, state));
    }

    fn clear_controls(&mut self) {
        self.calls.push(Call::ClearControls);
    }
}
