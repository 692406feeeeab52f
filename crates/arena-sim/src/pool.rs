//! Fixed-capacity projectile pools.
//!
//! Each weapon owns a pool whose slot array is allocated once at spawn and
//! never resized. Callers hold `ProjectileHandle`s (pool id + slot index),
//! never the projectile itself. Projectiles are not ECS entities.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use arena_core::config::WeaponSpec;
use arena_core::enums::WeaponKind;
use arena_core::types::{heading_vector, Aabb};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PoolId(pub u16);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProjectileHandle {
    pub pool: PoolId,
    pub slot: u16,
}

/// Who fired a projectile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Owner {
    Player,
    /// An opposing unit, by entity bits.
    Unit(u64),
}

/// ECS component linking a tank to its pools.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Armament {
    pub primary: PoolId,
    pub heavy: Option<PoolId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Projectile {
    pub active: bool,
    /// Set by `acquire`; `launch` starts the flight here.
    pub origin: Vec2,
    pub position: Vec2,
    pub velocity: Vec2,
    pub remaining_ms: Option<f64>,
}

/// A projectile taken out of flight by `ProjectilePool::advance`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Retired {
    pub handle: ProjectileHandle,
    pub position: Vec2,
    pub weapon: WeaponKind,
    /// True if it left the arena; false if its lifetime ran out.
    pub out_of_bounds: bool,
}

#[derive(Debug, Clone)]
pub struct ProjectilePool {
    id: PoolId,
    weapon: WeaponKind,
    spec: WeaponSpec,
    owner: Owner,
    /// Damage per hit (the weapon's damage scaled by the owner's profile).
    damage: f32,
    slots: Box<[Projectile]>,
}

impl ProjectilePool {
    pub fn new(id: PoolId, weapon: WeaponKind, spec: WeaponSpec, owner: Owner, damage: f32) -> Self {
        let capacity = spec.capacity.min(u16::MAX as usize);
        Self {
            id,
            weapon,
            spec,
            owner,
            damage,
            slots: vec![Projectile::default(); capacity].into_boxed_slice(),
        }
    }

    pub fn id(&self) -> PoolId {
        self.id
    }

    pub fn weapon(&self) -> WeaponKind {
        self.weapon
    }

    pub fn spec(&self) -> &WeaponSpec {
        &self.spec
    }

    pub fn owner(&self) -> Owner {
        self.owner
    }

    pub fn damage(&self) -> f32 {
        self.damage
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn active_count(&self) -> usize {
        self.slots.iter().filter(|p| p.active).count()
    }

    pub fn get(&self, handle: ProjectileHandle) -> Option<&Projectile> {
        if handle.pool != self.id {
            return None;
        }
        self.slots.get(handle.slot as usize)
    }

    /// Reserve an inactive slot and record `origin`. The slot stays inactive
    /// until `launch`. Returns `None` when every slot is in flight.
    pub fn acquire(&mut self, origin: Vec2) -> Option<ProjectileHandle> {
        let slot = self.slots.iter().position(|p| !p.active)?;
        self.slots[slot].origin = origin;
        Some(ProjectileHandle {
            pool: self.id,
            slot: slot as u16,
        })
    }

    /// Put an acquired slot in flight along `heading`. Declines (returns
    /// false) for foreign or already-active handles and non-finite headings.
    pub fn launch(&mut self, handle: ProjectileHandle, heading: f32) -> bool {
        if handle.pool != self.id || !heading.is_finite() {
            return false;
        }
        let speed = self.spec.speed;
        let lifetime = self.spec.lifetime_ms;
        let Some(p) = self.slots.get_mut(handle.slot as usize) else {
            return false;
        };
        if p.active {
            return false;
        }
        p.position = p.origin;
        p.velocity = heading_vector(heading) * speed;
        p.remaining_ms = lifetime;
        p.active = true;
        true
    }

    /// Take a projectile out of flight. Returns true only if it was active,
    /// so repeated calls are harmless.
    pub fn resolve_hit(&mut self, handle: ProjectileHandle) -> bool {
        if handle.pool != self.id {
            return false;
        }
        match self.slots.get_mut(handle.slot as usize) {
            Some(p) if p.active => {
                p.active = false;
                p.velocity = Vec2::ZERO;
                p.remaining_ms = None;
                true
            }
            _ => false,
        }
    }

    pub fn iter_active(&self) -> impl Iterator<Item = (ProjectileHandle, &Projectile)> + '_ {
        let id = self.id;
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, p)| p.active)
            .map(move |(slot, p)| {
                (
                    ProjectileHandle {
                        pool: id,
                        slot: slot as u16,
                    },
                    p,
                )
            })
    }

    /// Move every active projectile and retire the ones that left `bounds`
    /// or ran out of lifetime.
    pub fn advance(&mut self, dt_ms: f64, bounds: &Aabb, retired: &mut Vec<Retired>) {
        let dt_secs = (dt_ms / 1000.0) as f32;
        for (slot, p) in self.slots.iter_mut().enumerate() {
            if !p.active {
                continue;
            }
            p.position += p.velocity * dt_secs;

            let expired = match p.remaining_ms.as_mut() {
                Some(remaining) => {
                    *remaining -= dt_ms;
                    *remaining <= 0.0
                }
                None => false,
            };
            let out_of_bounds = !bounds.contains(p.position);
            if expired || out_of_bounds {
                p.active = false;
                p.velocity = Vec2::ZERO;
                p.remaining_ms = None;
                retired.push(Retired {
                    handle: ProjectileHandle {
                        pool: self.id,
                        slot: slot as u16,
                    },
                    position: p.position,
                    weapon: self.weapon,
                    out_of_bounds: !expired,
                });
            }
        }
    }
}

/// All projectile pools in the match, addressed by `PoolId`.
#[derive(Debug, Clone, Default)]
pub struct Armory {
    pools: Vec<ProjectilePool>,
}

impl Armory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a new pool and return its id.
    pub fn add_pool(&mut self, weapon: WeaponKind, spec: WeaponSpec, owner: Owner, damage: f32) -> PoolId {
        let id = PoolId(self.pools.len() as u16);
        self.pools
            .push(ProjectilePool::new(id, weapon, spec, owner, damage));
        id
    }

    pub fn pool(&self, id: PoolId) -> Option<&ProjectilePool> {
        self.pools.get(id.0 as usize)
    }

    pub fn pool_mut(&mut self, id: PoolId) -> Option<&mut ProjectilePool> {
        self.pools.get_mut(id.0 as usize)
    }

    pub fn pools(&self) -> &[ProjectilePool] {
        &self.pools
    }

    pub fn projectile(&self, handle: ProjectileHandle) -> Option<&Projectile> {
        self.pool(handle.pool)?.get(handle)
    }

    pub fn is_active(&self, handle: ProjectileHandle) -> bool {
        self.projectile(handle).is_some_and(|p| p.active)
    }

    pub fn weapon_of(&self, handle: ProjectileHandle) -> Option<WeaponKind> {
        self.pool(handle.pool).map(ProjectilePool::weapon)
    }

    pub fn acquire(&mut self, pool: PoolId, origin: Vec2) -> Option<ProjectileHandle> {
        self.pool_mut(pool)?.acquire(origin)
    }

    pub fn launch(&mut self, handle: ProjectileHandle, heading: f32) -> bool {
        self.pool_mut(handle.pool)
            .is_some_and(|p| p.launch(handle, heading))
    }

    pub fn resolve_hit(&mut self, handle: ProjectileHandle) -> bool {
        self.pool_mut(handle.pool)
            .is_some_and(|p| p.resolve_hit(handle))
    }

    /// Acquire and launch in one step. `None` if the pool is exhausted.
    pub fn fire(&mut self, pool: PoolId, origin: Vec2, heading: f32) -> Option<ProjectileHandle> {
        let handle = self.acquire(pool, origin)?;
        self.launch(handle, heading).then_some(handle)
    }

    pub fn iter_active(&self) -> impl Iterator<Item = (ProjectileHandle, &ProjectilePool, &Projectile)> + '_ {
        self.pools
            .iter()
            .flat_map(|pool| pool.iter_active().map(move |(h, p)| (h, pool, p)))
    }

    pub fn active_count(&self) -> usize {
        self.pools.iter().map(ProjectilePool::active_count).sum()
    }

    pub fn advance(&mut self, dt_ms: f64, bounds: &Aabb) -> Vec<Retired> {
        let mut retired = Vec::new();
        for pool in &mut self.pools {
            pool.advance(dt_ms, bounds, &mut retired);
        }
        retired
    }
}
