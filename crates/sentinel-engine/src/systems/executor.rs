//! Engagement executor: turns decisions into collaborator calls.
//!
//! Enforces the exclusive action modes of `EngagementState`. Every action
//! re-resolves its target against the tick snapshot first; a missing or dead
//! target aborts the action and clears it. Collaborator failures are logged
//! and retried next tick.

use tracing::{debug, info, warn};

use sentinel_ai::equipment::weapon_swap;
use sentinel_core::config::CombatConfig;
use sentinel_core::enums::{Activity, ClearReason, Control, EquipSlot, FleeReason, Hand};
use sentinel_core::error::ActionError;
use sentinel_core::events::Notification;
use sentinel_core::items::ItemKind;
use sentinel_core::types::{EntityId, Millis, Position};

use crate::engagement::{EngagementState, Meal};
use crate::outbox::Outbox;
use crate::ports::{Host, Snapshot};

/// Borrowed view of everything one tick's actions touch.
pub struct Executor<'a> {
    pub now: Millis,
    pub config: &'a CombatConfig,
    pub state: &'a mut EngagementState,
    pub snapshot: &'a mut Snapshot,
    pub host: &'a mut dyn Host,
    pub outbox: &'a mut Outbox,
}

impl Executor<'_> {
    /// Swing at `target` if the weapon cooldown allows. Returns whether a
    /// swing reached the action surface.
    pub fn attack(&mut self, target: EntityId) -> bool {
        if self.state.is_eating() || self.state.is_fleeing() {
            return false;
        }
        let Some(entity) = self.snapshot.entity(target) else {
            self.drop_if_current(target, ClearReason::Invalid);
            return false;
        };
        let aim = entity.head();
        if !self
            .state
            .attack_ready(self.now, self.config.attack_cooldown_ms)
        {
            // Keep tracking the target between swings
            self.host.look_at(aim);
            return false;
        }

        self.equip_best_weapon();
        self.host.look_at(aim);
        match self.host.attack(target) {
            Ok(()) => {
                self.state.last_attack = Some(self.now);
                debug!(?target, "attack");
                true
            }
            Err(ActionError::InvalidTarget(_)) => {
                self.drop_if_current(target, ClearReason::Invalid);
                false
            }
            Err(err) => {
                warn!(?target, %err, "attack failed");
                false
            }
        }
    }

    /// Follow `target` at the standoff distance, falling back to walking
    /// straight at it when navigation fails.
    pub fn chase(&mut self, target: EntityId) {
        if self.state.is_eating() {
            return;
        }
        let Some(entity) = self.snapshot.entity(target) else {
            self.drop_if_current(target, ClearReason::Invalid);
            return;
        };
        let aim = entity.head();

        match self
            .host
            .follow_entity(target, self.config.optimal_distance)
        {
            Ok(()) => {
                if self.state.direct_chase {
                    self.host.clear_controls();
                    self.state.direct_chase = false;
                }
            }
            Err(err) => {
                warn!(?target, %err, "navigation failed, chasing directly");
                self.walk_toward(aim);
                self.state.direct_chase = true;
            }
        }
    }

    /// Run toward `goal`. Low-health flight drops the target; any flight
    /// cancels a meal in progress.
    pub fn flee(&mut self, reason: FleeReason, goal: Option<Position>) {
        if self.state.is_eating() {
            self.finish_eating(true);
        }
        if reason == FleeReason::LowHealth {
            self.clear_target(ClearReason::Fleeing);
            self.notice_low_health();
        }
        if !self.state.is_fleeing_from(reason) {
            info!(?reason, "fleeing");
            self.state.activity = Activity::Fleeing(reason);
            self.outbox
                .push(self.now, Notification::FleeStarted { reason });
        }

        let Some(goal) = goal else {
            return;
        };
        match self.host.move_toward(goal, false) {
            Ok(()) => self.host.set_control(Control::Sprint, true),
            Err(err) => {
                warn!(%err, "escape path failed, running directly");
                self.walk_toward(goal);
            }
        }
    }

    /// Start eating `food`. No-op while already eating.
    pub fn begin_eating(&mut self, food: ItemKind) -> bool {
        if self.state.is_eating() {
            return false;
        }
        self.enter(Activity::Idle);
        self.host.stop();
        self.host.clear_controls();

        if let Err(err) = self.host.equip(food, EquipSlot::MainHand) {
            warn!(%food, %err, "cannot equip food");
            return false;
        }
        self.snapshot.note_equipped(food, EquipSlot::MainHand);
        if let Err(err) = self.host.activate_item(Hand::Main) {
            warn!(%food, %err, "cannot start eating");
            self.equip_best_weapon();
            return false;
        }

        info!(%food, "eating");
        self.state.activity = Activity::Eating;
        self.state.meal = Some(Meal {
            food,
            done_at: self.now.saturating_add(self.config.eat_duration_ms),
        });
        self.outbox
            .push(self.now, Notification::EatingStarted { food });
        true
    }

    /// End the current meal, completed or cut short.
    pub fn finish_eating(&mut self, interrupted: bool) {
        let Some(meal) = self.state.meal.take() else {
            return;
        };
        self.host.deactivate_item();
        self.state.activity = if self.state.target.is_some() {
            Activity::Engaged
        } else {
            Activity::Idle
        };
        self.state.eat_ready_at = self.now.saturating_add(self.config.eat_cooldown_ms);
        self.equip_best_weapon();
        debug!(food = %meal.food, interrupted, "meal finished");
        self.outbox
            .push(self.now, Notification::EatingFinished { interrupted });
    }

    /// Target-setting contract shared by self-defense and the guard
    /// coordinator. Rejected while fleeing for health; stored without
    /// re-arming while eating. Returns whether `target` is now the target.
    pub fn set_target(&mut self, target: EntityId) -> bool {
        if self.state.is_fleeing_from(FleeReason::LowHealth) {
            debug!(?target, "target rejected while fleeing");
            return false;
        }
        if self.state.target == Some(target) {
            return true;
        }
        let Some(entity) = self.snapshot.entity(target) else {
            return false;
        };
        let label = entity.label().to_string();
        let username = entity.username.clone();

        info!(?target, %label, "target acquired");
        self.state.target = Some(target);
        self.state.target_name = username;
        self.outbox
            .push(self.now, Notification::TargetAcquired { target, label });

        if !self.state.is_eating() && !self.state.is_fleeing() {
            self.enter(Activity::Engaged);
            self.equip_best_weapon();
        }
        true
    }

    pub fn clear_target(&mut self, reason: ClearReason) {
        let Some(target) = self.state.target.take() else {
            return;
        };
        self.state.target_name = None;
        if self.state.activity == Activity::Engaged {
            self.enter(Activity::Idle);
            self.host.stop();
        }
        info!(?target, ?reason, "target cleared");
        self.outbox
            .push(self.now, Notification::TargetCleared { target, reason });
    }

    /// Clear the target only if it is `target`.
    pub fn drop_if_current(&mut self, target: EntityId, reason: ClearReason) {
        if self.state.target == Some(target) {
            self.clear_target(reason);
        }
    }

    /// Leave a flight, if any, for the mode matching the current target.
    /// A meal in progress is left alone.
    pub fn settle(&mut self) {
        if self.state.is_eating() {
            return;
        }
        let next = if self.state.target.is_some() {
            Activity::Engaged
        } else {
            Activity::Idle
        };
        self.enter(next);
    }

    /// Hold the best weapon carried, if not already held.
    pub fn equip_best_weapon(&mut self) {
        let Some(weapon) = weapon_swap(&self.snapshot.agent) else {
            return;
        };
        match self.host.equip(weapon, EquipSlot::MainHand) {
            Ok(()) => {
                debug!(%weapon, "weapon equipped");
                self.snapshot.note_equipped(weapon, EquipSlot::MainHand);
            }
            Err(err) => warn!(%weapon, %err, "cannot equip weapon"),
        }
    }

    /// Switch action mode. Leaving a flight or a direct chase releases
    /// navigation and controls.
    pub fn enter(&mut self, next: Activity) {
        if self.state.activity == next {
            return;
        }
        if self.state.is_fleeing() || self.state.direct_chase {
            self.host.stop();
            self.host.clear_controls();
            self.state.direct_chase = false;
        }
        debug!(from = ?self.state.activity, to = ?next, "activity");
        self.state.activity = next;
    }

    fn walk_toward(&mut self, point: Position) {
        self.host.look_at(point);
        self.host.set_control(Control::Forward, true);
        self.host.set_control(Control::Sprint, true);
    }

    fn notice_low_health(&mut self) {
        let due = self.state.last_health_notice.is_none_or(|at| {
            self.now.saturating_sub(at) >= self.config.low_health_notice_cooldown_ms
        });
        if due {
            let health = self.snapshot.agent.health;
            warn!(health, "health critical");
            self.state.last_health_notice = Some(self.now);
            self.outbox
                .push(self.now, Notification::HealthCritical { health });
        }
    }
}
