//! Cleanup system: removes destroyed opposing units and scenery.
//!
//! The player is never removed; its wreck stays for the defeat sequence.

use hecs::{Entity, World};
use log::debug;

use arena_core::damage::Damageable;
use arena_core::units::{EnemyTank, Scenery};

/// Despawn dead units and scenery. Uses a pre-allocated buffer to avoid
/// per-tick allocation. Their projectile pools stay in the armory so shells
/// already in flight finish normally.
pub fn run(world: &mut World, despawn_buffer: &mut Vec<Entity>) {
    despawn_buffer.clear();

    for (entity, unit) in world.query_mut::<&EnemyTank>() {
        if !unit.is_alive() {
            despawn_buffer.push(entity);
        }
    }

    for (entity, scenery) in world.query_mut::<&Scenery>() {
        if !scenery.is_alive() {
            despawn_buffer.push(entity);
        }
    }

    for entity in despawn_buffer.drain(..) {
        if let Err(e) = world.despawn(entity) {
            debug!("cleanup: {entity:?} already gone: {e}");
        }
    }
}
