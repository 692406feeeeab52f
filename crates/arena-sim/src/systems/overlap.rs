//! Built-in overlap pass.
//!
//! Reports every overlap between an active projectile and a live collider,
//! and between the player and pickups. Whether a pair matters is left to
//! the dispatcher's rule table. This system is read-only.

use glam::Vec2;
use hecs::{Entity, World};

use arena_core::components::{Collider, Pickup, Position, Terrain};
use arena_core::damage::Damageable;
use arena_core::types::Aabb;
use arena_core::units::{EnemyTank, PlayerTank, Scenery};

use crate::input::{ColliderRef, Contact};
use crate::pool::Armory;

#[derive(Debug, Clone, Copy)]
enum Shape {
    Circle { center: Vec2, radius: f32 },
    Box(Aabb),
}

impl Shape {
    fn overlaps_circle(&self, center: Vec2, radius: f32) -> bool {
        match *self {
            Shape::Circle {
                center: c,
                radius: r,
            } => c.distance_squared(center) <= (r + radius) * (r + radius),
            Shape::Box(aabb) => aabb.overlaps_circle(center, radius),
        }
    }
}

fn live_circles<T: Damageable + hecs::Component>(world: &World, out: &mut Vec<(Entity, Shape)>) {
    for (entity, (target, pos, collider)) in world.query::<(&T, &Position, &Collider)>().iter() {
        if target.is_alive() {
            out.push((
                entity,
                Shape::Circle {
                    center: pos.0,
                    radius: collider.radius,
                },
            ));
        }
    }
}

/// Append this tick's overlaps to `contacts`.
pub fn detect(world: &World, armory: &Armory, contacts: &mut Vec<Contact>) {
    let mut targets: Vec<(Entity, Shape)> = Vec::new();
    live_circles::<PlayerTank>(world, &mut targets);
    live_circles::<EnemyTank>(world, &mut targets);
    live_circles::<Scenery>(world, &mut targets);
    for (entity, terrain) in world.query::<&Terrain>().iter() {
        targets.push((entity, Shape::Box(terrain.bounds)));
    }

    for (handle, pool, projectile) in armory.iter_active() {
        let radius = pool.spec().radius;
        for (entity, shape) in &targets {
            if shape.overlaps_circle(projectile.position, radius) {
                contacts.push(Contact::new(
                    ColliderRef::Projectile(handle),
                    ColliderRef::Entity(*entity),
                ));
            }
        }
    }

    let players: Vec<(Entity, Vec2, f32)> = world
        .query::<(&PlayerTank, &Position, &Collider)>()
        .iter()
        .filter(|(_, (tank, _, _))| tank.is_alive())
        .map(|(e, (_, pos, collider))| (e, pos.0, collider.radius))
        .collect();
    for (pickup, (_, pos, collider)) in world.query::<(&Pickup, &Position, &Collider)>().iter() {
        for (player, center, radius) in &players {
            let reach = radius + collider.radius;
            if center.distance_squared(pos.0) <= reach * reach {
                contacts.push(Contact::new(
                    ColliderRef::Entity(*player),
                    ColliderRef::Entity(pickup),
                ));
            }
        }
    }
}
