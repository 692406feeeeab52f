//! Movement integration for tanks and projectiles.

use glam::Vec2;
use hecs::World;

use arena_core::bus::EventBus;
use arena_core::components::{Collider, Position, Terrain, Velocity};
use arena_core::damage::Damageable;
use arena_core::enums::WeaponKind;
use arena_core::events::CombatEvent;
use arena_core::types::Aabb;
use arena_core::units::{EnemyTank, PlayerTank};

use crate::pool::{Armory, Retired};

/// Integrate tank positions. Units drift and bounce off the arena edge and
/// terrain; the player is pushed out of terrain and clamped to the arena.
/// Dead tanks stay where they died.
pub fn run(world: &mut World, arena: &Aabb, dt_ms: f64) {
    let dt = (dt_ms / 1000.0) as f32;
    let blocks: Vec<Aabb> = world
        .query::<&Terrain>()
        .iter()
        .map(|(_, t)| t.bounds)
        .collect();

    for (_entity, (unit, pos, vel, collider)) in
        world.query_mut::<(&EnemyTank, &mut Position, &mut Velocity, &Collider)>()
    {
        if !unit.is_alive() {
            continue;
        }
        pos.0 += vel.0 * dt;
        bounce_in_arena(&mut pos.0, &mut vel.0, collider.radius, arena);
        for block in &blocks {
            if let Some(normal) = push_out(&mut pos.0, collider.radius, block) {
                let along = vel.0.dot(normal);
                if along < 0.0 {
                    vel.0 -= 2.0 * along * normal;
                }
            }
        }
    }

    for (_entity, (tank, pos, vel, collider)) in
        world.query_mut::<(&PlayerTank, &mut Position, &Velocity, &Collider)>()
    {
        if !tank.is_alive() {
            continue;
        }
        pos.0 += vel.0 * dt;
        for block in &blocks {
            push_out(&mut pos.0, collider.radius, block);
        }
        pos.0 = arena.inset(collider.radius).closest_point(pos.0);
    }
}

/// Move projectiles and retire the ones that left the arena or expired.
///
/// Heavy ordnance whose lifetime ran out detonates in place while `live`;
/// after the match ends it simply disappears.
pub fn advance_projectiles(
    armory: &mut Armory,
    arena: &Aabb,
    dt_ms: f64,
    live: bool,
    bus: &mut EventBus,
) -> Vec<Retired> {
    let retired = armory.advance(dt_ms, arena);
    if live {
        for r in &retired {
            if r.weapon == WeaponKind::PlayerBomb && !r.out_of_bounds {
                if let Some(pool) = armory.pool(r.handle.pool) {
                    bus.publish(CombatEvent::Explosion {
                        position: r.position,
                        radius: pool.spec().blast_radius,
                        damage: pool.damage(),
                    });
                }
            }
        }
    }
    retired
}

fn bounce_in_arena(pos: &mut Vec2, vel: &mut Vec2, radius: f32, arena: &Aabb) {
    let inner = arena.inset(radius);
    if pos.x < inner.min.x {
        pos.x = inner.min.x;
        vel.x = vel.x.abs();
    } else if pos.x > inner.max.x {
        pos.x = inner.max.x;
        vel.x = -vel.x.abs();
    }
    if pos.y < inner.min.y {
        pos.y = inner.min.y;
        vel.y = vel.y.abs();
    } else if pos.y > inner.max.y {
        pos.y = inner.max.y;
        vel.y = -vel.y.abs();
    }
}

/// Move a circle out of `block` if they overlap. Returns the push normal.
fn push_out(pos: &mut Vec2, radius: f32, block: &Aabb) -> Option<Vec2> {
    let closest = block.closest_point(*pos);
    let delta = *pos - closest;
    let dist_sq = delta.length_squared();
    if dist_sq >= radius * radius {
        return None;
    }

    if dist_sq > f32::EPSILON {
        let normal = delta / dist_sq.sqrt();
        *pos = closest + normal * radius;
        return Some(normal);
    }

    // Centre inside the block: leave along the axis of least penetration.
    let offset = *pos - block.center();
    let half = (block.max - block.min) * 0.5;
    let pen = half - offset.abs();
    if pen.x < pen.y {
        let sign = offset.x.signum();
        pos.x = if sign > 0.0 { block.max.x + radius } else { block.min.x - radius };
        Some(Vec2::new(sign, 0.0))
    } else {
        let sign = offset.y.signum();
        pos.y = if sign > 0.0 { block.max.y + radius } else { block.min.y - radius };
        Some(Vec2::new(0.0, sign))
    }
}
