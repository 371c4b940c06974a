//! Guard coordinator: periodic ally scan and damage-triggered nominations.
//!
//! Never attacks; it marks allies protected and nominates targets through
//! the executor's target-setting contract.

use serde::{Deserialize, Serialize};
use tracing::info;

use sentinel_ai::guard::{assess_allies, hurt_nomination, pick_nomination, GuardAssessment};
use sentinel_ai::hostility::HostilityLedger;
use sentinel_core::enums::{GuardMode, GuardScenario};
use sentinel_core::events::Notification;
use sentinel_core::types::{EntityId, Millis};

use crate::protected::ProtectedPlayers;
use crate::systems::executor::Executor;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GuardState {
    pub mode: GuardMode,
    pub next_scan_at: Millis,
    /// Ally, scenario and threat of the last nomination, to announce changes once.
    pub last_nomination: Option<(EntityId, GuardScenario, EntityId)>,
}

impl GuardState {
    pub fn scan_due(&self, now: Millis) -> bool {
        now >= self.next_scan_at
    }
}

/// Scan every ally in range and nominate the most urgent threat.
pub fn run(
    exec: &mut Executor<'_>,
    guard: &mut GuardState,
    protected: &mut ProtectedPlayers,
    ledger: &HostilityLedger,
) -> Option<GuardAssessment> {
    guard.next_scan_at = exec
        .now
        .saturating_add(exec.config.guard_scan_interval_ms);

    let (assessments, pick) = {
        let scan = exec.snapshot.scan(ledger, exec.now);
        let assessments = assess_allies(&scan, exec.config);
        let pick = pick_nomination(&assessments, &scan).cloned();
        (assessments, pick)
    };

    let mut emergency = false;
    for a in assessments
        .iter()
        .filter(|a| a.scenario != GuardScenario::Safe)
    {
        protected.protect(&a.ally_name, exec.now);
        emergency |= a.scenario == GuardScenario::CreeperEmergency;
    }

    let mode = if emergency {
        GuardMode::Emergency
    } else if pick.is_some() {
        GuardMode::Active
    } else {
        GuardMode::Passive
    };
    if mode != guard.mode {
        info!(from = ?guard.mode, to = ?mode, "guard mode");
        guard.mode = mode;
    }

    let Some(pick) = pick else {
        guard.last_nomination = None;
        return None;
    };
    let threat = pick.primary_threat?;

    let key = (pick.ally, pick.scenario, threat);
    if guard.last_nomination != Some(key) {
        info!(
            ally = %pick.ally_name,
            scenario = ?pick.scenario,
            priority = pick.priority,
            ?threat,
            "guard scenario"
        );
        exec.outbox.push(
            exec.now,
            Notification::ScenarioTriggered {
                ally: pick.ally_name.clone(),
                scenario: pick.scenario,
                priority: pick.priority,
                threat,
            },
        );
        guard.last_nomination = Some(key);
    }
    exec.set_target(threat);
    Some(pick)
}

/// Backup detection for an entity other than the agent taking damage.
pub fn on_hurt(
    exec: &mut Executor<'_>,
    protected: &mut ProtectedPlayers,
    ledger: &HostilityLedger,
    hurt: EntityId,
) -> bool {
    let nomination = {
        let scan = exec.snapshot.scan(ledger, exec.now);
        hurt_nomination(hurt, &scan, exec.config)
    };
    let Some(nomination) = nomination else {
        return false;
    };
    info!(ally = %nomination.ally, threat = ?nomination.threat, "ally in a fight");
    protected.protect(&nomination.ally, exec.now);
    exec.set_target(nomination.threat)
}
