use glam::Vec2;
use hecs::Entity;

use arena_core::types::EngagementRegion;

use crate::pool::ProjectileHandle;

/// Something that can appear on either side of a contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColliderRef {
    Entity(Entity),
    Projectile(ProjectileHandle),
}

/// An overlap reported for this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Contact {
    pub a: ColliderRef,
    pub b: ColliderRef,
}

impl Contact {
    pub fn new(a: ColliderRef, b: ColliderRef) -> Self {
        Self { a, b }
    }
}

/// Continuous input for one tick.
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Desired movement direction. Longer than 1 is normalised.
    pub movement: Vec2,
    /// Point the player's barrel tracks.
    pub aim_target: Option<Vec2>,
    pub fire_primary: bool,
    pub fire_heavy: bool,
    /// Where opposing units may engage (usually the camera view).
    pub engaged_region: EngagementRegion,
    /// Overlaps detected by an external physics step, merged with the
    /// built-in overlap pass.
    pub contacts: Vec<Contact>,
}
