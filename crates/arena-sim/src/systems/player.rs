//! Player system: applies the tick's input to the player tank.

use glam::Vec2;
use hecs::World;
use log::debug;

use arena_core::bus::EventBus;
use arena_core::components::{Heading, Position, Velocity};
use arena_core::damage::Damageable;
use arena_core::events::{CombatEvent, FxEvent};
use arena_core::types::{heading_between, Cooldown};
use arena_core::units::PlayerTank;

use crate::input::TickInput;
use crate::pool::{Armament, Armory, PoolId};

/// Shots the player launched this tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlayerShots {
    pub primary: bool,
    pub heavy: bool,
}

/// Steer, aim and fire. Dead players stop and do nothing else.
pub fn run(
    world: &mut World,
    armory: &mut Armory,
    input: &TickInput,
    speed: f32,
    now_ms: f64,
    bus: &mut EventBus,
) -> PlayerShots {
    let mut shots = PlayerShots::default();

    for (_entity, (tank, pos, vel, heading, arms)) in world.query_mut::<(
        &mut PlayerTank,
        &Position,
        &mut Velocity,
        &mut Heading,
        &Armament,
    )>() {
        if !tank.is_alive() {
            vel.0 = Vec2::ZERO;
            continue;
        }

        let movement = if input.movement.is_finite() {
            input.movement.clamp_length_max(1.0)
        } else {
            Vec2::ZERO
        };
        vel.0 = movement * speed;

        let aim = input
            .aim_target
            .and_then(|target| heading_between(pos.0, target));
        if let Some(h) = aim {
            heading.0 = h;
        }
        let Some(aim) = aim else {
            continue;
        };

        if input.fire_primary {
            shots.primary = try_fire(armory, arms.primary, &mut tank.cannon, pos.0, aim, now_ms, bus);
        }
        if input.fire_heavy {
            if let Some(bomb_pool) = arms.heavy {
                shots.heavy = try_fire(armory, bomb_pool, &mut tank.bomb, pos.0, aim, now_ms, bus);
            }
        }
    }

    shots
}

/// Fire one weapon if its cooldown allows. A launched shot arms the
/// cooldown and publishes the weapon's score cost; an exhausted pool
/// leaves the cooldown untouched.
fn try_fire(
    armory: &mut Armory,
    pool: PoolId,
    cooldown: &mut Cooldown,
    origin: Vec2,
    heading: f32,
    now_ms: f64,
    bus: &mut EventBus,
) -> bool {
    if !cooldown.ready(now_ms) {
        return false;
    }
    let Some((weapon, delay_ms, cost)) = armory
        .pool(pool)
        .map(|p| (p.weapon(), p.spec().delay_ms, p.spec().score_cost))
    else {
        return false;
    };
    if armory.fire(pool, origin, heading).is_none() {
        debug!("{weapon:?} pool exhausted");
        return false;
    }
    cooldown.arm(now_ms, delay_ms);
    if cost != 0 {
        bus.publish(CombatEvent::ScoreDelta { amount: cost });
    }
    bus.emit_fx(FxEvent::ShotFired {
        weapon,
        position: origin,
    });
    true
}
