//! Self-defense system: resolve one decision per tick and execute it.
//!
//! While eating only a flight may interrupt; any other decision is deferred
//! until the meal ends.

use tracing::{debug, info};

use sentinel_ai::hostility::HostilityLedger;
use sentinel_ai::rules::{resolve_traced, Decision, ThreatContext};
use sentinel_core::enums::FleeReason;
use sentinel_core::events::Notification;
use sentinel_core::types::EntityId;

use crate::systems::executor::Executor;

/// Outcome of the self-defense step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolution {
    pub rule: &'static str,
    pub decision: Decision,
    /// The decision was not executed because a meal is in progress.
    pub deferred: bool,
}

pub fn run(exec: &mut Executor<'_>, ledger: &HostilityLedger) -> Resolution {
    let (rule, decision) = {
        let scan = exec.snapshot.scan(ledger, exec.now);
        resolve_traced(&ThreatContext {
            scan: &scan,
            config: exec.config,
            target: exec.state.target,
            can_eat: exec.state.can_eat(exec.now),
        })
    };
    debug!(rule, ?decision, "self-defense");

    let interrupts_meal = matches!(
        decision,
        Decision::Flee { .. } | Decision::RetreatFromExplosive { .. }
    );
    if exec.state.is_eating() && !interrupts_meal {
        return Resolution {
            rule,
            decision,
            deferred: true,
        };
    }

    apply(exec, decision);
    Resolution {
        rule,
        decision,
        deferred: false,
    }
}

fn apply(exec: &mut Executor<'_>, decision: Decision) {
    match decision {
        Decision::Flee { escape_point } => exec.flee(FleeReason::LowHealth, escape_point),
        Decision::Eat { food } => {
            exec.begin_eating(food);
        }
        Decision::RetreatFromExplosive { escape_point, .. } => {
            exec.flee(FleeReason::Explosive, Some(escape_point))
        }
        Decision::Strike { target } => {
            exec.settle();
            exec.attack(target);
        }
        Decision::Attack { target } => {
            exec.settle();
            if exec.state.direct_chase {
                exec.host.clear_controls();
                exec.state.direct_chase = false;
            }
            exec.attack(target);
        }
        Decision::Chase { target } => {
            exec.settle();
            exec.chase(target);
        }
        Decision::ClearTarget { target, reason } => {
            exec.drop_if_current(target, reason);
            exec.settle();
        }
        Decision::Acquire { target } => {
            exec.settle();
            exec.set_target(target);
        }
        Decision::Idle => exec.settle(),
    }
}

/// The agent took damage: blame the nearest other player unless a hostile
/// creature is closer, mark it hostile and adopt it as target.
pub fn on_agent_hurt(exec: &mut Executor<'_>, ledger: &mut HostilityLedger) -> Option<EntityId> {
    let attacker = {
        let scan = exec.snapshot.scan(ledger, exec.now);
        let player = scan.nearest(|s| s.is_player())?;
        let mob_nearer = scan
            .nearest(|s| s.is_hostile_mob())
            .is_some_and(|mob| mob.distance < player.distance);
        if mob_nearer {
            None
        } else {
            player
                .entity
                .username
                .clone()
                .map(|name| (player.id(), name))
        }
    };
    let (id, username) = attacker?;

    if !ledger.is_hostile_at(&username, exec.now) {
        info!(%username, "under attack");
        exec.outbox.push(
            exec.now,
            Notification::HostileMarked {
                username: username.clone(),
            },
        );
    }
    ledger.mark_hostile(&username, exec.now);
    exec.set_target(id);
    Some(id)
}
