//! Combat orchestrator: the engine's reactions to bus events and to its own
//! scheduled tasks.

use log::{debug, info, warn};

use arena_core::components::Position;
use arena_core::constants::MAX_REACTION_PASSES;
use arena_core::damage::Damageable;
use arena_core::enums::MatchPhase;
use arena_core::events::{CombatEvent, FxEvent};
use arena_core::units::PlayerTank;

use crate::collision;
use crate::engine::ArenaEngine;
use crate::scheduler::ScheduledTask;

impl ArenaEngine {
    /// Drain the orchestrator's inbox until it stays empty. Reactions may
    /// publish further events (an explosion killing a unit, for instance),
    /// so this loops a bounded number of times.
    pub(crate) fn react(&mut self) {
        for _ in 0..MAX_REACTION_PASSES {
            let events = self.bus.drain(self.orchestrator);
            if events.is_empty() {
                return;
            }
            for event in events {
                self.handle_event(event);
            }
        }
        let deferred = self.bus.pending(self.orchestrator);
        if deferred > 0 {
            warn!("reaction passes exhausted, {deferred} events deferred to next tick");
        }
    }

    fn handle_event(&mut self, event: CombatEvent) {
        let rules = self.config.rules;
        let now_ms = self.clock.now_ms;

        match event {
            CombatEvent::UnitDestroyed { position, reward } => {
                info!("unit destroyed at ({:.0}, {:.0}), reward {reward}", position.x, position.y);
                self.scheduler.schedule_in(
                    now_ms,
                    rules.reward_delay_ms,
                    ScheduledTask::AwardReward { amount: reward },
                );
                if self.state.record_unit_destroyed(rules.victory_remaining_units) {
                    self.enter_victory();
                }
                if rules.regen_on_unit_destroyed {
                    self.bus.publish(CombatEvent::AllyDestroyed);
                }
            }
            CombatEvent::PlayerDestroyed => {
                info!("player destroyed at {now_ms:.0} ms");
                self.clock.time_scale = rules.slow_motion_scale;
                self.scheduler
                    .schedule_in(now_ms, rules.defeat_delay_ms, ScheduledTask::EnterDefeat);
            }
            CombatEvent::ScoreDelta { amount } => {
                self.state.apply_score_delta(amount);
            }
            CombatEvent::AllyDestroyed => {
                self.regenerate_player(rules.regen_amount);
            }
            CombatEvent::Explosion {
                position,
                radius,
                damage,
            } => {
                if self.state.phase == MatchPhase::Playing {
                    let hits = collision::apply_explosion(
                        &mut self.world,
                        position,
                        radius,
                        damage,
                        &mut self.bus,
                    );
                    debug!("explosion at ({:.0}, {:.0}) hit {hits}", position.x, position.y);
                }
            }
            CombatEvent::PauseRequested => {
                self.state.paused = true;
            }
            CombatEvent::SoundSettingChanged { enabled } => {
                self.state.sound_enabled = enabled;
            }
            CombatEvent::SceneryDestroyed { position } => {
                debug!("scenery destroyed at ({:.0}, {:.0})", position.x, position.y);
            }
        }
    }

    /// Run every scheduled task that has come due.
    pub(crate) fn run_scheduled(&mut self) {
        for task in self.scheduler.drain_due(self.clock.now_ms) {
            debug!("scheduled task {task:?} at {:.0} ms", self.clock.now_ms);
            match task {
                ScheduledTask::AwardReward { amount } => {
                    self.state.award(amount);
                }
                ScheduledTask::EnterDefeat => {
                    if self.state.enter_defeat() {
                        self.log_phase_change();
                    }
                }
                ScheduledTask::ExpireShield { generation } => {
                    let mut expired = false;
                    for (_entity, tank) in self.world.query_mut::<&mut PlayerTank>() {
                        expired |= tank.expire_shield(generation);
                    }
                    if expired {
                        self.bus.emit_fx(FxEvent::ShieldExpired);
                    }
                }
            }
        }
    }

    fn enter_victory(&mut self) {
        if self.state.enter_victory(self.config.rules.victory_bonus) {
            self.clock.time_scale = self.config.rules.slow_motion_scale;
            self.log_phase_change();
        }
    }

    fn regenerate_player(&mut self, amount: f32) {
        for (_entity, (tank, position)) in self.world.query_mut::<(&mut PlayerTank, &Position)>() {
            if !tank.is_alive() {
                continue;
            }
            if let Some(level) = tank.regenerate(amount) {
                debug!("player recovered to {level:?}");
                self.bus.emit_fx(FxEvent::Degraded {
                    position: position.0,
                    level,
                });
            }
        }
    }
}
