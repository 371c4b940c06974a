//! Per-tick summary returned by `CompanionEngine::tick`.

use serde::{Deserialize, Serialize};

use sentinel_ai::guard::GuardAssessment;
use sentinel_ai::reflex::Reaction;
use sentinel_ai::rules::Decision;
use sentinel_core::enums::{Activity, GuardMode};
use sentinel_core::types::{EntityId, Millis};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickReport {
    pub at: Millis,
    /// Name of the self-defense rule that fired, `"idle"` when none did.
    pub rule: String,
    pub decision: Decision,
    /// The decision waited for a meal to finish.
    pub deferred: bool,
    pub reaction: Reaction,
    pub activity: Activity,
    pub target: Option<EntityId>,
    pub guard_mode: GuardMode,
    /// Nomination made by a guard scan this tick, if one ran and matched.
    pub guard: Option<GuardAssessment>,
    pub blocking: bool,
    pub health: f64,
}
