//! Notifications emitted by the engine for presentation (chat, logs).
//!
//! Consumers drain them after each tick; the engine never waits on them.

use serde::{Deserialize, Serialize};

use crate::enums::{ClearReason, FleeReason, GuardScenario};
use crate::items::ItemKind;
use crate::types::{EntityId, Millis};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Notification {
    /// A new engagement target was adopted.
    TargetAcquired { target: EntityId, label: String },
    /// The engagement target was dropped.
    TargetCleared { target: EntityId, reason: ClearReason },
    /// A player attacked the agent and is now hostile.
    HostileMarked { username: String },
    /// A hostile player's forgiveness window ran out.
    Forgiven { username: String },
    /// The guard coordinator found an ally in trouble.
    ScenarioTriggered {
        ally: String,
        scenario: GuardScenario,
        priority: u8,
        threat: EntityId,
    },
    /// Health fell below the escape threshold.
    HealthCritical { health: f64 },
    /// The agent started running away.
    FleeStarted { reason: FleeReason },
    /// The agent started eating.
    EatingStarted { food: ItemKind },
    /// A meal finished or was interrupted.
    EatingFinished { interrupted: bool },
    /// Shield raised against a threat.
    DefenseRaised { threat: EntityId },
    /// Shield lowered.
    DefenseLowered,
}

/// A notification stamped with the engine time it was emitted at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stamped {
    pub at: Millis,
    pub notification: Notification,
}
