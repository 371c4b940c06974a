//! Reflex defense system: 360° awareness and shield timing.
//!
//! Runs every tick after self-defense. It only touches the look direction,
//! the off hand and the sprint-burst controls, so it never competes with the
//! main-hand weapon.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use sentinel_ai::hostility::HostilityLedger;
use sentinel_ai::reflex::{bucket_threats, choose_reaction, Reaction};
use sentinel_core::enums::{Control, EquipSlot, Hand};
use sentinel_core::events::Notification;
use sentinel_core::items::ItemKind;
use sentinel_core::types::{EntityId, Millis, Position};

use crate::systems::executor::Executor;

/// Shield and sprint-burst timers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DefenseState {
    pub blocking: Option<ActiveBlock>,
    /// End of the current sprint-retreat burst.
    pub sprint_until: Option<Millis>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActiveBlock {
    pub threat: EntityId,
    pub until: Millis,
}

impl DefenseState {
    pub fn is_blocking(&self) -> bool {
        self.blocking.is_some()
    }
}

pub fn run(exec: &mut Executor<'_>, defense: &mut DefenseState, ledger: &HostilityLedger) -> Reaction {
    expire(exec, defense);

    let reaction = {
        let scan = exec.snapshot.scan(ledger, exec.now);
        let buckets = bucket_threats(&scan, exec.config.reflex_radius);
        choose_reaction(&buckets, exec.config)
    };

    if exec.state.is_eating() {
        // Eating holds the use action; the shield cannot be raised.
        if defense.blocking.take().is_some() {
            exec.outbox.push(exec.now, Notification::DefenseLowered);
        }
        if let Reaction::FaceBehind { aim, .. } = reaction {
            exec.host.look_at(aim);
        }
        return reaction;
    }

    match reaction {
        Reaction::FaceBehind { threat, aim, raise } => {
            exec.host.look_at(aim);
            if raise {
                raise_defense(exec, defense, threat, aim);
            }
        }
        Reaction::Block { threat, aim } => raise_defense(exec, defense, threat, aim),
        Reaction::ExplosiveDefense { threat, aim, sprint } => {
            raise_defense(exec, defense, threat, aim);
            if sprint && defense.sprint_until.is_none() {
                debug!(?threat, "sprint burst");
                exec.host.set_control(Control::Back, true);
                exec.host.set_control(Control::Sprint, true);
                defense.sprint_until = Some(exec.now.saturating_add(exec.config.sprint_burst_ms));
            }
        }
        Reaction::StandDown => lower_defense(exec, defense),
    }
    reaction
}

/// Equip the shield if needed, face the threat and hold the block. A block
/// already up is extended instead of restarted.
fn raise_defense(exec: &mut Executor<'_>, defense: &mut DefenseState, threat: EntityId, aim: Position) {
    let agent = &exec.snapshot.agent;
    if agent.off_hand != Some(ItemKind::Shield) {
        if !agent.inventory.contains(ItemKind::Shield) {
            return;
        }
        if let Err(err) = exec.host.equip(ItemKind::Shield, EquipSlot::OffHand) {
            warn!(%err, "cannot equip shield");
            return;
        }
        exec.snapshot
            .note_equipped(ItemKind::Shield, EquipSlot::OffHand);
    }

    exec.host.look_at(aim);
    let until = exec.now.saturating_add(exec.config.block_duration_ms);
    if let Some(block) = defense.blocking.as_mut() {
        block.threat = threat;
        block.until = until;
        return;
    }
    match exec.host.activate_item(Hand::Off) {
        Ok(()) => {
            debug!(?threat, "shield raised");
            defense.blocking = Some(ActiveBlock { threat, until });
            exec.outbox
                .push(exec.now, Notification::DefenseRaised { threat });
        }
        Err(err) => warn!(%err, "cannot raise shield"),
    }
}

fn lower_defense(exec: &mut Executor<'_>, defense: &mut DefenseState) {
    if defense.blocking.take().is_some() {
        exec.host.deactivate_item();
        debug!("shield lowered");
        exec.outbox.push(exec.now, Notification::DefenseLowered);
    }
}

/// End a block or sprint burst whose time is up.
fn expire(exec: &mut Executor<'_>, defense: &mut DefenseState) {
    if defense.blocking.is_some_and(|b| exec.now >= b.until) {
        lower_defense(exec, defense);
    }
    if defense.sprint_until.is_some_and(|until| exec.now >= until) {
        defense.sprint_until = None;
        exec.host.set_control(Control::Back, false);
        if !exec.state.is_fleeing() && !exec.state.direct_chase {
            exec.host.set_control(Control::Sprint, false);
        }
    }
}
