//! Systems that advance the simulated world each step.
//!
//! Systems are plain functions over `&mut World` (or `&World`). Damage they
//! cause is returned as `Hit`s and applied by `SimWorld`, which also owns
//! the agent.

use sentinel_core::types::{EntityId, Position};

use crate::components::Quarry;

pub mod cleanup;
pub mod hazards;
pub mod mob_ai;
pub mod movement;

/// Damage dealt during a step, applied after every system ran.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    pub victim: Quarry,
    pub amount: f64,
    /// Where the blow came from, used for shield facing.
    pub source: Position,
    pub by: EntityId,
}
