//! Companion engine: the core of the agent.
//!
//! `CompanionEngine` owns all decision state (hostility ledger, engagement,
//! guard and reflex timers, protected allies, notification queue) and drives
//! a `Host` once per tick. It is headless and does no I/O; time is passed in
//! explicitly, so identical inputs produce identical runs.

use tracing::debug;

use sentinel_ai::guard::GuardAssessment;
use sentinel_ai::hostility::HostilityLedger;
use sentinel_core::config::CombatConfig;
use sentinel_core::enums::GuardMode;
use sentinel_core::events::Stamped;
use sentinel_core::types::{EntityId, Millis};

use crate::engagement::EngagementState;
use crate::outbox::Outbox;
use crate::ports::{Host, Snapshot};
use crate::protected::ProtectedPlayers;
use crate::report::TickReport;
use crate::systems;
use crate::systems::executor::Executor;
use crate::systems::guard::GuardState;
use crate::systems::reflex::DefenseState;
use crate::systems::upkeep::AuxTimers;

pub struct CompanionEngine {
    config: CombatConfig,
    ledger: HostilityLedger,
    engagement: EngagementState,
    defense: DefenseState,
    guard: GuardState,
    protected: ProtectedPlayers,
    timers: AuxTimers,
    outbox: Outbox,
}

impl Default for CompanionEngine {
    fn default() -> Self {
        Self::new(CombatConfig::default())
    }
}

impl CompanionEngine {
    pub fn new(config: CombatConfig) -> Self {
        Self {
            ledger: HostilityLedger::new(config.forgive_ms),
            protected: ProtectedPlayers::new(config.protected_ttl_ms),
            engagement: EngagementState::default(),
            defense: DefenseState::default(),
            guard: GuardState::default(),
            timers: AuxTimers::default(),
            outbox: Outbox::default(),
            config,
        }
    }

    /// Advance one world tick at time `now`.
    pub fn tick(&mut self, now: Millis, host: &mut dyn Host) -> TickReport {
        let mut snapshot = Snapshot::capture(&*host);
        let mut exec = Executor {
            now,
            config: &self.config,
            state: &mut self.engagement,
            snapshot: &mut snapshot,
            host,
            outbox: &mut self.outbox,
        };

        // 1. Forgiveness
        systems::upkeep::forgive_expired(&mut exec, &mut self.ledger);
        // 2. Meal completion
        systems::upkeep::finish_meal(&mut exec);
        // 3. Shield, armor and protected-set upkeep
        systems::upkeep::equipment(&mut exec, &mut self.timers, &mut self.protected);
        // 4. Guard scan (coarse interval)
        let guard = if self.guard.scan_due(now) {
            systems::guard::run(&mut exec, &mut self.guard, &mut self.protected, &self.ledger)
        } else {
            None
        };
        // 5. Self-defense
        let resolution = systems::self_defense::run(&mut exec, &self.ledger);
        // 6. Reflex defense
        let reaction = systems::reflex::run(&mut exec, &mut self.defense, &self.ledger);

        let report = TickReport {
            at: now,
            rule: resolution.rule.to_string(),
            decision: resolution.decision,
            deferred: resolution.deferred,
            reaction,
            activity: exec.state.activity,
            target: exec.state.target,
            guard_mode: self.guard.mode,
            guard,
            blocking: self.defense.is_blocking(),
            health: exec.snapshot.agent.health,
        };
        debug!(rule = %report.rule, activity = ?report.activity, "tick");
        report
    }

    /// Run a guard scan immediately, outside the regular interval.
    pub fn guard_scan(&mut self, now: Millis, host: &mut dyn Host) -> Option<GuardAssessment> {
        let mut snapshot = Snapshot::capture(&*host);
        let mut exec = Executor {
            now,
            config: &self.config,
            state: &mut self.engagement,
            snapshot: &mut snapshot,
            host,
            outbox: &mut self.outbox,
        };
        systems::guard::run(&mut exec, &mut self.guard, &mut self.protected, &self.ledger)
    }

    /// Entity-damaged observation. `id` may be the agent itself.
    pub fn on_entity_hurt(&mut self, now: Millis, id: EntityId, host: &mut dyn Host) {
        let mut snapshot = Snapshot::capture(&*host);
        let agent_hurt = id == snapshot.agent.id;
        let mut exec = Executor {
            now,
            config: &self.config,
            state: &mut self.engagement,
            snapshot: &mut snapshot,
            host,
            outbox: &mut self.outbox,
        };
        if agent_hurt {
            systems::self_defense::on_agent_hurt(&mut exec, &mut self.ledger);
        } else {
            systems::guard::on_hurt(&mut exec, &mut self.protected, &self.ledger, id);
        }
    }

    /// Nominate a target from outside the engine.
    pub fn set_target(&mut self, now: Millis, target: EntityId, host: &mut dyn Host) -> bool {
        let mut snapshot = Snapshot::capture(&*host);
        let mut exec = Executor {
            now,
            config: &self.config,
            state: &mut self.engagement,
            snapshot: &mut snapshot,
            host,
            outbox: &mut self.outbox,
        };
        exec.set_target(target)
    }

    /// Record an attack by `username` at `now`.
    pub fn mark_hostile(&mut self, username: &str, now: Millis) {
        self.ledger.mark_hostile(username, now);
    }

    pub fn is_hostile(&mut self, username: &str, now: Millis) -> bool {
        self.ledger.is_hostile(username, now)
    }

    /// Explicitly forgive `username`, dropping it as target if it was one.
    pub fn forgive(&mut self, now: Millis, username: &str, host: &mut dyn Host) {
        if !self.ledger.forgive(username) {
            return;
        }
        let mut snapshot = Snapshot::capture(&*host);
        let mut exec = Executor {
            now,
            config: &self.config,
            state: &mut self.engagement,
            snapshot: &mut snapshot,
            host,
            outbox: &mut self.outbox,
        };
        systems::upkeep::forgive_expired(&mut exec, &mut self.ledger);
    }

    /// Take every notification queued so far, oldest first.
    pub fn drain_notifications(&mut self) -> Vec<Stamped> {
        self.outbox.drain()
    }

    pub fn config(&self) -> &CombatConfig {
        &self.config
    }

    pub fn engagement(&self) -> &EngagementState {
        &self.engagement
    }

    pub fn defense(&self) -> &DefenseState {
        &self.defense
    }

    pub fn guard_mode(&self) -> GuardMode {
        self.guard.mode
    }

    pub fn ledger(&self) -> &HostilityLedger {
        &self.ledger
    }

    pub fn is_protected(&mut self, username: &str, now: Millis) -> bool {
        self.protected.is_protected(username, now)
    }

    pub fn protected_players(&self, now: Millis) -> Vec<String> {
        self.protected.names(now)
    }
}
