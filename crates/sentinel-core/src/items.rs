//! Item catalogue and the static selection tables for weapons, food and armor.

use serde::{Deserialize, Serialize};

use crate::enums::EquipSlot;

/// Items the engine knows how to select. Anything else is carried as `Other`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ItemKind {
    // --- Weapons ---
    NetheriteSword,
    DiamondSword,
    IronSword,
    StoneSword,
    WoodenSword,
    NetheriteAxe,
    DiamondAxe,
    IronAxe,
    StoneAxe,
    WoodenAxe,

    // --- Defense ---
    Shield,

    // --- Armor ---
    NetheriteHelmet,
    DiamondHelmet,
    IronHelmet,
    ChainmailHelmet,
    GoldenHelmet,
    LeatherHelmet,
    NetheriteChestplate,
    DiamondChestplate,
    IronChestplate,
    ChainmailChestplate,
    GoldenChestplate,
    LeatherChestplate,
    NetheriteLeggings,
    DiamondLeggings,
    IronLeggings,
    ChainmailLeggings,
    GoldenLeggings,
    LeatherLeggings,
    NetheriteBoots,
    DiamondBoots,
    IronBoots,
    ChainmailBoots,
    GoldenBoots,
    LeatherBoots,

    // --- Food ---
    EnchantedGoldenApple,
    GoldenApple,
    CookedBeef,
    CookedPorkchop,
    CookedMutton,
    CookedChicken,
    CookedSalmon,
    CookedRabbit,
    CookedCod,
    BakedPotato,
    Bread,
    Apple,
    Cookie,
    MelonSlice,
    SweetBerries,
    Carrot,
    Beef,
    Porkchop,
    Mutton,
    Chicken,
    Rabbit,
    Potato,

    Other,
}

/// A stack of items in the agent's inventory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemStack {
    pub kind: ItemKind,
    pub count: u32,
}

/// The agent's carried items (excluding what is currently equipped in armor slots).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Inventory {
    pub items: Vec<ItemStack>,
}

impl ItemStack {
    pub fn new(kind: ItemKind, count: u32) -> Self {
        Self { kind, count }
    }
}

impl ItemKind {
    /// Weapon ranking: swords above axes, better materials first. `None` for non-weapons.
    pub fn weapon_tier(self) -> Option<u8> {
        use ItemKind::*;
        match self {
            NetheriteSword => Some(10),
            DiamondSword => Some(9),
            IronSword => Some(8),
            StoneSword => Some(7),
            WoodenSword => Some(6),
            NetheriteAxe => Some(5),
            DiamondAxe => Some(4),
            IronAxe => Some(3),
            StoneAxe => Some(2),
            WoodenAxe => Some(1),
            _ => None,
        }
    }

    /// Food ranking: enchanted/golden > cooked > plain > raw. `None` for non-food.
    pub fn food_priority(self) -> Option<u8> {
        use ItemKind::*;
        match self {
            EnchantedGoldenApple => Some(10),
            GoldenApple => Some(9),
            CookedBeef | CookedPorkchop => Some(7),
            CookedMutton | CookedChicken | CookedSalmon => Some(6),
            CookedRabbit | CookedCod | BakedPotato => Some(5),
            Bread => Some(4),
            Apple | Carrot => Some(3),
            Cookie | MelonSlice | SweetBerries => Some(2),
            Beef | Porkchop | Mutton | Chicken | Rabbit | Potato => Some(1),
            _ => None,
        }
    }

    /// Armor slot and material tier (netherite 5 .. leather 0).
    pub fn armor(self) -> Option<(EquipSlot, u8)> {
        use ItemKind::*;
        let slot_tier = match self {
            NetheriteHelmet => (EquipSlot::Head, 5),
            DiamondHelmet => (EquipSlot::Head, 4),
            IronHelmet => (EquipSlot::Head, 3),
            ChainmailHelmet => (EquipSlot::Head, 2),
            GoldenHelmet => (EquipSlot::Head, 1),
            LeatherHelmet => (EquipSlot::Head, 0),
            NetheriteChestplate => (EquipSlot::Torso, 5),
            DiamondChestplate => (EquipSlot::Torso, 4),
            IronChestplate => (EquipSlot::Torso, 3),
            ChainmailChestplate => (EquipSlot::Torso, 2),
            GoldenChestplate => (EquipSlot::Torso, 1),
            LeatherChestplate => (EquipSlot::Torso, 0),
            NetheriteLeggings => (EquipSlot::Legs, 5),
            DiamondLeggings => (EquipSlot::Legs, 4),
            IronLeggings => (EquipSlot::Legs, 3),
            ChainmailLeggings => (EquipSlot::Legs, 2),
            GoldenLeggings => (EquipSlot::Legs, 1),
            LeatherLeggings => (EquipSlot::Legs, 0),
            NetheriteBoots => (EquipSlot::Feet, 5),
            DiamondBoots => (EquipSlot::Feet, 4),
            IronBoots => (EquipSlot::Feet, 3),
            ChainmailBoots => (EquipSlot::Feet, 2),
            GoldenBoots => (EquipSlot::Feet, 1),
            LeatherBoots => (EquipSlot::Feet, 0),
            _ => return None,
        };
        Some(slot_tier)
    }

    pub fn is_weapon(self) -> bool {
        self.weapon_tier().is_some()
    }

    pub fn is_food(self) -> bool {
        self.food_priority().is_some()
    }
}

impl Inventory {
    pub fn new(items: Vec<ItemStack>) -> Self {
        Self { items }
    }

    fn kinds(&self) -> impl Iterator<Item = ItemKind> + '_ {
        self.items.iter().filter(|s| s.count > 0).map(|s| s.kind)
    }

    pub fn contains(&self, kind: ItemKind) -> bool {
        self.kinds().any(|k| k == kind)
    }

    pub fn has_food(&self) -> bool {
        self.kinds().any(ItemKind::is_food)
    }

    /// Highest-tier weapon carried. Earlier stacks win ties.
    pub fn best_weapon(&self) -> Option<ItemKind> {
        best_by(self.kinds(), ItemKind::weapon_tier)
    }

    /// Highest-priority food carried.
    pub fn best_food(&self) -> Option<ItemKind> {
        best_by(self.kinds(), ItemKind::food_priority)
    }

    /// Best armor piece for one slot.
    pub fn best_armor(&self, slot: EquipSlot) -> Option<(ItemKind, u8)> {
        let mut best: Option<(ItemKind, u8)> = None;
        for kind in self.kinds() {
            if let Some((s, tier)) = kind.armor() {
                if s == slot && best.is_none_or(|(_, t)| tier > t) {
                    best = Some((kind, tier));
                }
            }
        }
        best
    }

    /// Remove one item of `kind`. Returns false if none was carried.
    pub fn consume(&mut self, kind: ItemKind) -> bool {
        match self.items.iter_mut().find(|s| s.kind == kind && s.count > 0) {
            Some(stack) => {
                stack.count -= 1;
                true
            }
            None => false,
        }
    }
}

fn best_by(
    kinds: impl Iterator<Item = ItemKind>,
    rank: impl Fn(ItemKind) -> Option<u8>,
) -> Option<ItemKind> {
    let mut best: Option<(ItemKind, u8)> = None;
    for kind in kinds {
        if let Some(r) = rank(kind) {
            if best.is_none_or(|(_, b)| r > b) {
                best = Some((kind, r));
            }
        }
    }
    best.map(|(k, _)| k)
}
