//! Timed upkeep: forgiveness, meal completion and equipment checks.

use tracing::{debug, info, warn};

use sentinel_ai::equipment::{armor_upgrades, shield_missing};
use sentinel_ai::hostility::HostilityLedger;
use sentinel_core::enums::{ClearReason, EquipSlot};
use sentinel_core::events::Notification;
use sentinel_core::items::ItemKind;
use sentinel_core::types::Millis;

use crate::protected::ProtectedPlayers;
use crate::systems::executor::Executor;
use crate::ttl::TtlMap;

/// Evict expired hostility records. A forgiven player that is the current
/// target is dropped at once.
pub fn forgive_expired(exec: &mut Executor<'_>, ledger: &mut HostilityLedger) {
    ledger.sweep(exec.now);
    for username in ledger.take_forgiven() {
        info!(%username, "forgiven");
        if exec.state.target_name.as_deref() == Some(username.as_str()) {
            exec.clear_target(ClearReason::Forgiven);
        }
        exec.outbox
            .push(exec.now, Notification::Forgiven { username });
    }
}

/// Complete a meal whose duration has elapsed.
pub fn finish_meal(exec: &mut Executor<'_>) {
    if exec.state.meal.is_some_and(|meal| exec.now >= meal.done_at) {
        exec.finish_eating(false);
    }
}

/// Auxiliary timer schedule.
#[derive(Debug, Clone, Default)]
pub struct AuxTimers {
    pub next_shield_check: Millis,
    pub next_armor_check: Millis,
    /// Slots recently equipped; no further equip into them until expiry.
    pub equip_cooldowns: TtlMap<EquipSlot>,
}

/// Keep the shield in the off hand and wear the best armor carried.
pub fn equipment(exec: &mut Executor<'_>, timers: &mut AuxTimers, protected: &mut ProtectedPlayers) {
    let now = exec.now;
    let config = exec.config;

    if now >= timers.next_shield_check {
        timers.next_shield_check = now.saturating_add(config.shield_check_interval_ms);
        if shield_missing(&exec.snapshot.agent) {
            equip_slot(exec, timers, ItemKind::Shield, EquipSlot::OffHand);
        }
    }

    if now >= timers.next_armor_check {
        timers.next_armor_check = now.saturating_add(config.armor_check_interval_ms);
        for (slot, item) in armor_upgrades(&exec.snapshot.agent) {
            equip_slot(exec, timers, item, slot);
        }
        let pruned = protected.prune(now);
        if pruned > 0 {
            debug!(pruned, "protected players expired");
        }
        timers.equip_cooldowns.prune(now);
    }
}

fn equip_slot(exec: &mut Executor<'_>, timers: &mut AuxTimers, item: ItemKind, slot: EquipSlot) {
    if timers.equip_cooldowns.contains(&slot, exec.now) {
        return;
    }
    timers
        .equip_cooldowns
        .insert(slot, exec.now, exec.config.equip_cooldown_ms);
    match exec.host.equip(item, slot) {
        Ok(()) => {
            debug!(%item, ?slot, "equipped");
            exec.snapshot.note_equipped(item, slot);
        }
        Err(err) => warn!(%item, ?slot, %err, "equip failed"),
    }
}
