//! Scripted player input for headless runs.
//!
//! Reads the previous snapshot and decides the next tick's input: close in
//! on the nearest unit, keep the cannon on it, and lob a bomb when it sits
//! inside bomb range. The engagement region follows the player like a
//! camera viewport.

use glam::Vec2;

use arena_core::state::{ArenaSnapshot, UnitView};
use arena_core::types::{Aabb, EngagementRegion};
use arena_sim::TickInput;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Autopilot {
    /// Half extents of the engagement region centred on the player.
    pub view_half_extents: Vec2,
    /// Distance the player tries to keep from its target.
    pub standoff: f32,
    /// Bombs are only thrown at targets between these two distances.
    pub bomb_min_range: f32,
    pub bomb_max_range: f32,
}

impl Default for Autopilot {
    fn default() -> Self {
        Self {
            view_half_extents: Vec2::new(960.0, 540.0),
            standoff: 450.0,
            // Outside the blast radius, within flight distance plus blast.
            bomb_min_range: 200.0,
            bomb_max_range: 450.0,
        }
    }
}

impl Autopilot {
    pub fn next_input(&self, snapshot: &ArenaSnapshot) -> TickInput {
        let Some(player) = snapshot.player.as_ref().filter(|p| p.alive) else {
            return TickInput {
                engaged_region: EngagementRegion::Nowhere,
                ..Default::default()
            };
        };

        let engaged_region = EngagementRegion::Area {
            bounds: Aabb::from_center(player.position, self.view_half_extents),
        };

        let Some(target) = nearest_unit(player.position, &snapshot.units) else {
            return TickInput {
                engaged_region,
                ..Default::default()
            };
        };

        let offset = target.position - player.position;
        let distance = offset.length();
        let movement = if distance > self.standoff {
            offset.normalize_or_zero()
        } else if distance < self.standoff * 0.5 {
            -offset.normalize_or_zero()
        } else {
            // Strafe around the target.
            offset.perp().normalize_or_zero()
        };

        TickInput {
            movement,
            aim_target: Some(target.position),
            fire_primary: true,
            fire_heavy: (self.bomb_min_range..=self.bomb_max_range).contains(&distance),
            engaged_region,
            contacts: Vec::new(),
        }
    }
}

fn nearest_unit(from: Vec2, units: &[UnitView]) -> Option<&UnitView> {
    units
        .iter()
        .filter(|u| u.health > 0.0)
        .min_by(|a, b| {
            a.position
                .distance_squared(from)
                .total_cmp(&b.position.distance_squared(from))
        })
}
