//! Snapshot system: queries the world and builds a complete `ArenaSnapshot`.
//!
//! This system is read-only; it never modifies the world.

use hecs::World;

use arena_core::components::{Heading, Pickup, Position};
use arena_core::damage::Damageable;
use arena_core::events::{CombatEvent, FxEvent};
use arena_core::state::*;
use arena_core::types::SimClock;
use arena_core::units::{EnemyTank, PlayerTank, Scenery};

use crate::match_state::MatchState;
use crate::pool::Armory;

pub fn build_snapshot(
    world: &World,
    armory: &Armory,
    clock: &SimClock,
    state: &MatchState,
    events: Vec<CombatEvent>,
    fx: Vec<FxEvent>,
) -> ArenaSnapshot {
    ArenaSnapshot {
        clock: *clock,
        phase: state.phase,
        score: state.score,
        paused: state.paused,
        sound_enabled: state.sound_enabled,
        active_units: state.active_units,
        outcome: state.outcome,
        player: build_player(world),
        units: build_units(world),
        scenery: build_scenery(world),
        pickups: build_pickups(world),
        projectiles: build_projectiles(armory),
        events,
        fx,
    }
}

fn build_player(world: &World) -> Option<PlayerView> {
    world
        .query::<(&PlayerTank, &Position, &Heading)>()
        .iter()
        .next()
        .map(|(entity, (tank, pos, heading))| PlayerView {
            id: entity.to_bits().get(),
            position: pos.0,
            heading: heading.0,
            health: tank.health.current(),
            max_health: tank.health.max(),
            degradation: tank.health.level(),
            alive: tank.is_alive(),
            shielded: tank.shielded,
        })
}

fn build_units(world: &World) -> Vec<UnitView> {
    let mut units: Vec<UnitView> = world
        .query::<(&EnemyTank, &Position, &Heading)>()
        .iter()
        .map(|(entity, (unit, pos, heading))| UnitView {
            id: entity.to_bits().get(),
            kind: unit.kind,
            position: pos.0,
            heading: heading.0,
            health: unit.health.current(),
            max_health: unit.health.max(),
            degradation: unit.health.level(),
            engaged: unit.engaged,
        })
        .collect();

    units.sort_by_key(|u| u.id);
    units
}

fn build_scenery(world: &World) -> Vec<SceneryView> {
    let mut scenery: Vec<SceneryView> = world
        .query::<(&Scenery, &Position)>()
        .iter()
        .map(|(entity, (s, pos))| SceneryView {
            id: entity.to_bits().get(),
            position: pos.0,
            health: s.health.current(),
        })
        .collect();

    scenery.sort_by_key(|s| s.id);
    scenery
}

fn build_pickups(world: &World) -> Vec<PickupView> {
    let mut pickups: Vec<PickupView> = world
        .query::<(&Pickup, &Position)>()
        .iter()
        .map(|(entity, (pickup, pos))| PickupView {
            id: entity.to_bits().get(),
            kind: pickup.kind,
            position: pos.0,
        })
        .collect();

    pickups.sort_by_key(|p| p.id);
    pickups
}

fn build_projectiles(armory: &Armory) -> Vec<ProjectileView> {
    armory
        .iter_active()
        .map(|(handle, pool, p)| ProjectileView {
            pool: handle.pool.0,
            slot: handle.slot,
            weapon: pool.weapon(),
            position: p.position,
            velocity: p.velocity,
        })
        .collect()
}
