//! ECS components stored on arena entities.
//!
//! Combat state (health, weapons) lives on the unit structs in `units`;
//! these are the spatial pieces shared by every entity kind.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::enums::PickupKind;
use crate::types::Aabb;

/// Position in arena coordinates (pixels, +y down).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position(pub Vec2);

/// Velocity in pixels per second.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Velocity(pub Vec2);

/// Facing angle in radians. For tanks this is the barrel direction.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Heading(pub f32);

/// Circular collision shape centred on `Position`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Collider {
    pub radius: f32,
}

/// Static blocking geometry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Terrain {
    pub bounds: Aabb,
}

/// Collectible granting a timed effect on contact with the player.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pickup {
    pub kind: PickupKind,
}
