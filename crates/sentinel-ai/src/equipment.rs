//! Equipment selection policy.
//!
//! Decides what should be worn or held. Equipping itself is the action
//! surface's job.

use sentinel_core::entity::AgentState;
use sentinel_core::enums::EquipSlot;
use sentinel_core::items::ItemKind;

pub const ARMOR_SLOTS: [EquipSlot; 4] = [
    EquipSlot::Head,
    EquipSlot::Torso,
    EquipSlot::Legs,
    EquipSlot::Feet,
];

/// Best weapon carried, only when it differs from the main-hand item.
pub fn weapon_swap(agent: &AgentState) -> Option<ItemKind> {
    agent
        .inventory
        .best_weapon()
        .filter(|&best| agent.main_hand != Some(best))
}

/// Tier of the armor currently worn in `slot`.
pub fn equipped_tier(agent: &AgentState, slot: EquipSlot) -> Option<u8> {
    agent
        .armor
        .iter()
        .filter_map(|item| item.armor())
        .find(|(s, _)| *s == slot)
        .map(|(_, tier)| tier)
}

/// Per-slot armor pieces strictly better than what is worn.
pub fn armor_upgrades(agent: &AgentState) -> Vec<(EquipSlot, ItemKind)> {
    ARMOR_SLOTS
        .iter()
        .filter_map(|&slot| {
            let (item, tier) = agent.inventory.best_armor(slot)?;
            match equipped_tier(agent, slot) {
                Some(worn) if worn >= tier => None,
                _ => Some((slot, item)),
            }
        })
        .collect()
}

/// Whether a shield is carried but not held in the off hand.
pub fn shield_missing(agent: &AgentState) -> bool {
    agent.off_hand != Some(ItemKind::Shield) && agent.inventory.contains(ItemKind::Shield)
}
