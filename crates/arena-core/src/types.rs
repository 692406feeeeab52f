use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::constants::DT_MS;

/// Monotonic simulation clock.
///
/// Every tick advances it by the real frame time multiplied by the current
/// time scale, so slow motion stretches every cooldown, lifetime and
/// scheduled task uniformly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimClock {
    /// Number of ticks advanced since the match started.
    pub tick: u64,
    /// Simulation time in milliseconds.
    pub now_ms: f64,
    /// Multiplier applied to real frame time.
    pub time_scale: f64,
}

impl Default for SimClock {
    fn default() -> Self {
        Self {
            tick: 0,
            now_ms: 0.0,
            time_scale: 1.0,
        }
    }
}

impl SimClock {
    pub fn new(time_scale: f64) -> Self {
        Self {
            time_scale,
            ..Self::default()
        }
    }

    /// Advance by one frame of `real_dt_ms`. Returns the scaled delta in ms.
    pub fn advance(&mut self, real_dt_ms: f64) -> f64 {
        let dt = real_dt_ms * self.time_scale.max(0.0);
        self.tick += 1;
        self.now_ms += dt;
        dt
    }

    /// Advance by one frame at the default tick rate.
    pub fn advance_tick(&mut self) -> f64 {
        self.advance(DT_MS)
    }

    pub fn elapsed_secs(&self) -> f64 {
        self.now_ms / 1000.0
    }
}

/// Axis-aligned box in arena coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self {
            min: min.min(max),
            max: min.max(max),
        }
    }

    pub fn from_size(width: f32, height: f32) -> Self {
        Self::new(Vec2::ZERO, Vec2::new(width, height))
    }

    pub fn from_center(center: Vec2, half_extents: Vec2) -> Self {
        Self::new(center - half_extents, center + half_extents)
    }

    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// Inclusive containment test.
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }

    pub fn closest_point(&self, point: Vec2) -> Vec2 {
        point.clamp(self.min, self.max)
    }

    /// True if a circle at `center` with `radius` touches or overlaps the box.
    pub fn overlaps_circle(&self, center: Vec2, radius: f32) -> bool {
        self.closest_point(center).distance_squared(center) <= radius * radius
    }

    /// Shrink the box by `margin` on every side. Collapses to the center
    /// rather than inverting when the margin is larger than half the extent.
    pub fn inset(&self, margin: f32) -> Aabb {
        let half = (self.max - self.min) * 0.5;
        let m = Vec2::splat(margin).min(half);
        Aabb::new(self.min + m, self.max - m)
    }
}

/// Region of the arena in which opposing units are allowed to engage.
///
/// Supplied by the host every tick (typically the camera's visible area).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum EngagementRegion {
    #[default]
    Everywhere,
    Nowhere,
    Area { bounds: Aabb },
}

impl EngagementRegion {
    pub fn contains(&self, point: Vec2) -> bool {
        match self {
            EngagementRegion::Everywhere => true,
            EngagementRegion::Nowhere => false,
            EngagementRegion::Area { bounds } => bounds.contains(point),
        }
    }
}

/// Angle in radians from `from` towards `to`, measured from +x towards +y.
///
/// Returns `None` when the points coincide or either is non-finite.
pub fn heading_between(from: Vec2, to: Vec2) -> Option<f32> {
    let delta = to - from;
    if !delta.is_finite() || delta.length_squared() <= f32::EPSILON {
        return None;
    }
    Some(delta.y.atan2(delta.x))
}

/// Unit vector pointing along `heading`.
pub fn heading_vector(heading: f32) -> Vec2 {
    Vec2::from_angle(heading)
}

/// Per-weapon readiness timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Cooldown {
    pub next_allowed_ms: f64,
}

impl Cooldown {
    pub fn ready(&self, now_ms: f64) -> bool {
        now_ms >= self.next_allowed_ms
    }

    pub fn arm(&mut self, now_ms: f64, delay_ms: f64) {
        self.next_allowed_ms = now_ms + delay_ms;
    }
}
