//! Entity spawn factories for setting up the arena.
//!
//! Creates the player, opposing units, scenery, pickups and terrain with
//! their component bundles, and allocates each tank's projectile pools.

use glam::Vec2;
use hecs::{Entity, World};
use log::info;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use arena_core::components::{Collider, Heading, Pickup, Position, Terrain, Velocity};
use arena_core::config::{MatchConfig, WeaponsConfig};
use arena_core::constants::*;
use arena_core::enums::{PickupKind, UnitKind, WeaponKind};
use arena_core::types::Aabb;
use arena_core::units::{EnemyTank, PlayerTank, Scenery};

use crate::pool::{Armament, Armory, Owner};

/// What `setup_match` placed.
#[derive(Debug, Clone, Copy)]
pub struct MatchRoster {
    pub player: Entity,
    pub units: u32,
}

/// Populate the arena from `config`: terrain, player, placed and random
/// units, crates and pickups.
pub fn setup_match(
    world: &mut World,
    armory: &mut Armory,
    rng: &mut ChaCha8Rng,
    config: &MatchConfig,
) -> MatchRoster {
    for block in &config.terrain {
        spawn_terrain(world, *block);
    }

    let player = spawn_player(
        world,
        armory,
        &config.weapons,
        config.player_spawn,
        config.player_max_health,
        config.player_radius,
    );

    let arena = config.arena_bounds();
    let mut units = 0;
    for spawn in &config.enemy_spawns {
        let kind = spawn.kind.unwrap_or_else(|| random_kind(rng));
        spawn_enemy(world, armory, config, kind, spawn.position, Vec2::ZERO);
        units += 1;
    }
    for _ in 0..config.random_enemies {
        let kind = random_kind(rng);
        let position = random_point(rng, &arena.inset(ENEMY_SPAWN_MARGIN));
        let drift = Vec2::new(
            rng.gen_range(-ENEMY_DRIFT_SPEED_X..=ENEMY_DRIFT_SPEED_X),
            ENEMY_DRIFT_SPEED_Y,
        );
        spawn_enemy(world, armory, config, kind, position, drift);
        units += 1;
    }

    for position in &config.crate_spawns {
        spawn_scenery(world, *position, config.crate_health, config.crate_radius);
    }
    for _ in 0..config.random_crates {
        let position = random_point(rng, &arena.inset(CRATE_SPAWN_MARGIN));
        spawn_scenery(world, position, config.crate_health, config.crate_radius);
    }

    for position in &config.shield_pickups {
        spawn_pickup(world, *position, PickupKind::Shield, config.pickup_radius);
    }

    info!(
        "match set up: {units} units, {} terrain blocks, {} crates",
        config.terrain.len(),
        config.crate_spawns.len() + config.random_crates as usize
    );

    MatchRoster { player, units }
}

fn random_kind(rng: &mut ChaCha8Rng) -> UnitKind {
    UnitKind::ALL[rng.gen_range(0..UnitKind::ALL.len())]
}

fn random_point(rng: &mut ChaCha8Rng, area: &Aabb) -> Vec2 {
    Vec2::new(
        random_between(rng, area.min.x, area.max.x),
        random_between(rng, area.min.y, area.max.y),
    )
}

fn random_between(rng: &mut ChaCha8Rng, lo: f32, hi: f32) -> f32 {
    if lo < hi {
        rng.gen_range(lo..hi)
    } else {
        lo
    }
}

/// Spawn the player tank with its cannon and bomb pools.
pub fn spawn_player(
    world: &mut World,
    armory: &mut Armory,
    weapons: &WeaponsConfig,
    position: Vec2,
    max_health: f32,
    radius: f32,
) -> Entity {
    let cannon = armory.add_pool(
        WeaponKind::PlayerCannon,
        weapons.player_cannon,
        Owner::Player,
        weapons.player_cannon.damage,
    );
    let bomb = armory.add_pool(
        WeaponKind::PlayerBomb,
        weapons.player_bomb,
        Owner::Player,
        weapons.player_bomb.damage,
    );

    world.spawn((
        PlayerTank::new(max_health),
        Position(position),
        Velocity::default(),
        Heading::default(),
        Collider { radius },
        Armament {
            primary: cannon,
            heavy: Some(bomb),
        },
    ))
}

/// Spawn an opposing unit with its own cannon pool.
pub fn spawn_enemy(
    world: &mut World,
    armory: &mut Armory,
    config: &MatchConfig,
    kind: UnitKind,
    position: Vec2,
    velocity: Vec2,
) -> Entity {
    let profile = config.units.get(kind);
    let spec = config.weapons.enemy_cannon;

    let entity = world.reserve_entity();
    let pool = armory.add_pool(
        WeaponKind::EnemyCannon,
        spec,
        Owner::Unit(entity.to_bits().get()),
        spec.damage * profile.damage_factor,
    );
    world.spawn_at(
        entity,
        (
            EnemyTank::from_profile(kind, profile),
            Position(position),
            Velocity(velocity),
            Heading::default(),
            Collider {
                radius: profile.radius,
            },
            Armament {
                primary: pool,
                heavy: None,
            },
        ),
    );
    entity
}

pub fn spawn_scenery(world: &mut World, position: Vec2, health: f32, radius: f32) -> Entity {
    world.spawn((Scenery::new(health), Position(position), Collider { radius }))
}

pub fn spawn_pickup(world: &mut World, position: Vec2, kind: PickupKind, radius: f32) -> Entity {
    world.spawn((Pickup { kind }, Position(position), Collider { radius }))
}

pub fn spawn_terrain(world: &mut World, bounds: Aabb) -> Entity {
    world.spawn((Terrain { bounds }, Position(bounds.center())))
}
