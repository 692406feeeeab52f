//! Unit AI system: aims and fires every living opposing unit.
//!
//! Calls the controller from arena-ai for each unit, then applies the
//! decision to the unit's components and pool.

use hecs::World;
use log::debug;

use arena_core::bus::EventBus;
use arena_core::components::{Heading, Position};
use arena_core::damage::Damageable;
use arena_core::enums::WeaponKind;
use arena_core::events::FxEvent;
use arena_core::types::EngagementRegion;
use arena_core::units::{EnemyTank, PlayerTank};

use arena_ai::controller::{evaluate, is_engaged, AiContext};

use crate::pool::{Armament, Armory};

/// Run the controller for every unit. Returns the number of shots launched.
pub fn run(
    world: &mut World,
    armory: &mut Armory,
    region: &EngagementRegion,
    now_ms: f64,
    bus: &mut EventBus,
) -> usize {
    let target = world
        .query::<(&PlayerTank, &Position)>()
        .iter()
        .find(|(_, (tank, _))| tank.is_alive())
        .map(|(_, (_, pos))| pos.0);

    let mut launched = 0;
    for (entity, (unit, pos, heading, arms)) in
        world.query_mut::<(&mut EnemyTank, &Position, &mut Heading, &Armament)>()
    {
        if !unit.is_alive() {
            continue;
        }

        let engaged = is_engaged(region, pos.0);
        unit.engaged = engaged;

        let decision = evaluate(&AiContext {
            mount: pos.0,
            target,
            engaged,
            alive: true,
            now_ms,
            next_fire_ms: unit.cooldown.next_allowed_ms,
        });

        if let Some(h) = decision.heading {
            heading.0 = h;
        }
        if !decision.fire {
            continue;
        }
        let Some(h) = decision.heading else {
            continue;
        };

        if armory.fire(arms.primary, pos.0, h).is_some() {
            unit.cooldown.arm(now_ms, unit.fire_delay_ms);
            bus.emit_fx(FxEvent::ShotFired {
                weapon: WeaponKind::EnemyCannon,
                position: pos.0,
            });
            launched += 1;
        } else {
            debug!("{entity:?} pool exhausted, retrying next tick");
        }
    }
    launched
}
