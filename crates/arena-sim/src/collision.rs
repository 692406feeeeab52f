//! Collision dispatcher.
//!
//! Turns the tick's overlap pairs into combat effects using a fixed
//! `(group, group) -> Resolution` table. Pairs without a rule are ignored.

use std::collections::HashSet;

use glam::Vec2;
use hecs::{Component, Entity, World};
use log::{debug, info};

use arena_core::bus::EventBus;
use arena_core::components::{Pickup, Position, Terrain};
use arena_core::damage::{DamageOutcome, Damageable, Hit};
use arena_core::enums::{CollisionGroup, PickupKind};
use arena_core::events::{CombatEvent, FxEvent};
use arena_core::units::{EnemyTank, PlayerTank, Scenery};

use crate::input::{ColliderRef, Contact};
use crate::pool::{Armory, ProjectileHandle};
use crate::scheduler::{ScheduledTask, Scheduler};

/// What happens when two groups touch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Projectile stops.
    Absorb,
    /// Heavy ordnance stops and explodes where it is.
    Detonate,
    DamageScenery,
    DamageUnit,
    DamagePlayer,
    CollectPickup,
}

/// Directed half of the table: `actor` is the projectile (or the player for
/// pickups).
fn directed_rule(actor: CollisionGroup, target: CollisionGroup) -> Option<Resolution> {
    use CollisionGroup::*;
    match (actor, target) {
        (PlayerProjectile | OpposingProjectile, Terrain) => Some(Resolution::Absorb),
        (HeavyOrdnance, Terrain) => Some(Resolution::Detonate),
        (PlayerProjectile | OpposingProjectile, Scenery) => Some(Resolution::DamageScenery),
        (PlayerProjectile, OpposingUnit) => Some(Resolution::DamageUnit),
        (OpposingProjectile, Player) => Some(Resolution::DamagePlayer),
        (Player, Pickup) => Some(Resolution::CollectPickup),
        _ => None,
    }
}

/// Symmetric pairing rule.
pub fn rule(a: CollisionGroup, b: CollisionGroup) -> Option<Resolution> {
    directed_rule(a, b).or_else(|| directed_rule(b, a))
}

/// Collision group of a live collider. Dead damageables and unknown
/// entities have none.
pub fn group_of(world: &World, armory: &Armory, collider: ColliderRef) -> Option<CollisionGroup> {
    match collider {
        ColliderRef::Projectile(handle) => armory.weapon_of(handle).map(CollisionGroup::from),
        ColliderRef::Entity(entity) => {
            let e = world.entity(entity).ok()?;
            if let Some(player) = e.get::<&PlayerTank>() {
                return player.is_alive().then_some(CollisionGroup::Player);
            }
            if let Some(unit) = e.get::<&EnemyTank>() {
                return unit.is_alive().then_some(CollisionGroup::OpposingUnit);
            }
            if let Some(scenery) = e.get::<&Scenery>() {
                return scenery.is_alive().then_some(CollisionGroup::Scenery);
            }
            if e.has::<Terrain>() {
                return Some(CollisionGroup::Terrain);
            }
            if e.has::<Pickup>() {
                return Some(CollisionGroup::Pickup);
            }
            None
        }
    }
}

/// A contact that matched a rule, oriented as `(actor, target)`.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Pairing {
    resolution: Resolution,
    actor: ColliderRef,
    target: ColliderRef,
}

fn classify(world: &World, armory: &Armory, contact: &Contact) -> Option<Pairing> {
    let ga = group_of(world, armory, contact.a)?;
    let gb = group_of(world, armory, contact.b)?;
    let (resolution, actor, target) = match directed_rule(ga, gb) {
        Some(r) => (r, contact.a, contact.b),
        None => (directed_rule(gb, ga)?, contact.b, contact.a),
    };
    if let ColliderRef::Projectile(handle) = actor {
        if !armory.is_active(handle) {
            return None;
        }
    }
    Some(Pairing {
        resolution,
        actor,
        target,
    })
}

/// Counters for one dispatch pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DispatchReport {
    pub resolved: usize,
    pub ignored: usize,
    pub duplicates: usize,
}

/// Mutable state the dispatcher touches.
pub struct DispatchContext<'a> {
    pub world: &'a mut World,
    pub armory: &'a mut Armory,
    pub bus: &'a mut EventBus,
    pub scheduler: &'a mut Scheduler,
    pub now_ms: f64,
    pub shield_duration_ms: f64,
}

/// Resolve every contact for this tick.
///
/// Classification runs against the state at the start of the pass, so a
/// projectile touching terrain and a unit in the same tick still damages the
/// unit, and contacts naming an already-inactive projectile are dropped.
/// Identical `(actor, target)` pairs apply once.
pub fn dispatch(ctx: &mut DispatchContext<'_>, contacts: &[Contact]) -> DispatchReport {
    let mut report = DispatchReport::default();
    let mut seen = HashSet::with_capacity(contacts.len());
    let mut pairings = Vec::with_capacity(contacts.len());

    for contact in contacts {
        match classify(ctx.world, ctx.armory, contact) {
            Some(p) if seen.insert((p.actor, p.target)) => pairings.push(p),
            Some(_) => report.duplicates += 1,
            None => report.ignored += 1,
        }
    }

    for pairing in pairings {
        resolve(ctx, pairing);
        report.resolved += 1;
    }
    report
}

fn resolve(ctx: &mut DispatchContext<'_>, pairing: Pairing) {
    match (pairing.resolution, pairing.actor, pairing.target) {
        (Resolution::Absorb, ColliderRef::Projectile(handle), _) => {
            if let Some(position) = projectile_position(ctx.armory, handle) {
                ctx.armory.resolve_hit(handle);
                ctx.bus.emit_fx(FxEvent::Hit { position });
            }
        }
        (Resolution::Detonate, ColliderRef::Projectile(handle), _) => {
            detonate(ctx.armory, handle, ctx.bus);
        }
        (Resolution::DamageScenery, ColliderRef::Projectile(handle), ColliderRef::Entity(target)) => {
            projectile_strike::<Scenery>(ctx, handle, target);
        }
        (Resolution::DamageUnit, ColliderRef::Projectile(handle), ColliderRef::Entity(target)) => {
            projectile_strike::<EnemyTank>(ctx, handle, target);
        }
        (Resolution::DamagePlayer, ColliderRef::Projectile(handle), ColliderRef::Entity(target)) => {
            projectile_strike::<PlayerTank>(ctx, handle, target);
        }
        (Resolution::CollectPickup, ColliderRef::Entity(player), ColliderRef::Entity(pickup)) => {
            collect_pickup(ctx, player, pickup);
        }
        (resolution, actor, target) => {
            debug!("unhandled pairing {resolution:?}: {actor:?} x {target:?}");
        }
    }
}

fn projectile_position(armory: &Armory, handle: ProjectileHandle) -> Option<Vec2> {
    armory.projectile(handle).map(|p| p.position)
}

/// Deactivate a heavy projectile and publish its explosion. Only the first
/// call for a given flight detonates.
pub fn detonate(armory: &mut Armory, handle: ProjectileHandle, bus: &mut EventBus) -> bool {
    let Some(pool) = armory.pool(handle.pool) else {
        return false;
    };
    let radius = pool.spec().blast_radius;
    let damage = pool.damage();
    let Some(position) = projectile_position(armory, handle) else {
        return false;
    };
    if !armory.resolve_hit(handle) {
        return false;
    }
    bus.publish(CombatEvent::Explosion {
        position,
        radius,
        damage,
    });
    true
}

fn projectile_strike<T: Damageable + Component>(
    ctx: &mut DispatchContext<'_>,
    handle: ProjectileHandle,
    target: Entity,
) {
    let Some(pool) = ctx.armory.pool(handle.pool) else {
        return;
    };
    let amount = pool.damage();
    let Some(source) = projectile_position(ctx.armory, handle) else {
        return;
    };
    ctx.armory.resolve_hit(handle);
    let outcome = damage_entity::<T>(ctx.world, target, Hit { amount, source }, ctx.bus);
    if outcome == DamageOutcome::Killed {
        debug!("{target:?} destroyed by {handle:?}");
    }
}

/// Apply a hit to one entity's `T` component.
pub fn damage_entity<T: Damageable + Component>(
    world: &mut World,
    entity: Entity,
    hit: Hit,
    bus: &mut EventBus,
) -> DamageOutcome {
    match world.query_one_mut::<(&Position, &mut T)>(entity) {
        Ok((position, target)) => target.apply_damage(hit, position.0, bus),
        Err(_) => DamageOutcome::Ignored,
    }
}

fn collect_pickup(ctx: &mut DispatchContext<'_>, player: Entity, pickup: Entity) {
    let kind = match ctx.world.get::<&Pickup>(pickup) {
        Ok(p) => p.kind,
        Err(_) => return,
    };
    if ctx.world.despawn(pickup).is_err() {
        return;
    }
    match kind {
        PickupKind::Shield => {
            let Ok((position, tank)) = ctx
                .world
                .query_one_mut::<(&Position, &mut PlayerTank)>(player)
            else {
                return;
            };
            let generation = tank.grant_shield();
            ctx.scheduler.schedule_in(
                ctx.now_ms,
                ctx.shield_duration_ms,
                ScheduledTask::ExpireShield { generation },
            );
            ctx.bus.emit_fx(FxEvent::ShieldGranted {
                position: position.0,
            });
            info!("shield granted (generation {generation})");
        }
    }
}

/// Damage every living damageable within `radius` of `center` (inclusive).
/// Returns how many were hit.
pub fn apply_explosion(world: &mut World, center: Vec2, radius: f32, damage: f32, bus: &mut EventBus) -> usize {
    bus.emit_fx(FxEvent::Detonation {
        position: center,
        radius,
    });
    let hit = Hit {
        amount: damage,
        source: center,
    };
    let radius_sq = radius * radius;
    blast::<PlayerTank>(world, center, radius_sq, hit, bus)
        + blast::<EnemyTank>(world, center, radius_sq, hit, bus)
        + blast::<Scenery>(world, center, radius_sq, hit, bus)
}

fn blast<T: Damageable + Component>(
    world: &mut World,
    center: Vec2,
    radius_sq: f32,
    hit: Hit,
    bus: &mut EventBus,
) -> usize {
    let mut count = 0;
    for (_entity, (position, target)) in world.query_mut::<(&Position, &mut T)>() {
        if !target.is_alive() || position.0.distance_squared(center) > radius_sq {
            continue;
        }
        if target.apply_damage(hit, position.0, bus) != DamageOutcome::Ignored {
            count += 1;
        }
    }
    count
}
