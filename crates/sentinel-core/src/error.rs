//! Error types surfaced by collaborators and configuration loading.
//!
//! None of these are fatal to the decision loop: the engine logs action and
//! navigation failures and retries on the next tick.

use crate::enums::EquipSlot;
use crate::items::ItemKind;
use crate::types::EntityId;

/// Failure reported by the action surface.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ActionError {
    #[error("entity {0:?} is not attackable")]
    InvalidTarget(EntityId),
    #[error("cannot equip {item} into {slot:?}: item not carried")]
    MissingItem { item: ItemKind, slot: EquipSlot },
    #[error("action rejected: {0}")]
    Rejected(String),
}

/// Failure reported by the navigation subsystem.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum NavError {
    #[error("goal is unreachable")]
    Unreachable,
    #[error("follow target {0:?} is unknown")]
    UnknownTarget(EntityId),
    #[error("navigation unavailable: {0}")]
    Unavailable(String),
}

/// Failure while loading or validating a `CombatConfig`.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}
