use serde::{Deserialize, Serialize};

use crate::constants::{CRITICAL_RATIO, DAMAGED_RATIO};

/// Match phase. Both `Victory` and `Defeat` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MatchPhase {
    #[default]
    Playing,
    Victory,
    Defeat,
}

impl MatchPhase {
    pub fn is_terminal(self) -> bool {
        !matches!(self, MatchPhase::Playing)
    }
}

/// Visual damage band derived from the health ratio.
///
/// Ordered from best to worst so `level > previous` means the entity got worse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum DegradationLevel {
    #[default]
    Healthy,
    Damaged,
    Critical,
}

impl DegradationLevel {
    /// Band for `ratio = current / max`. A ratio sitting exactly on a
    /// threshold belongs to the better band.
    pub fn from_ratio(ratio: f32) -> Self {
        if ratio >= DAMAGED_RATIO {
            DegradationLevel::Healthy
        } else if ratio >= CRITICAL_RATIO {
            DegradationLevel::Damaged
        } else {
            DegradationLevel::Critical
        }
    }
}

/// Opposing unit variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum UnitKind {
    #[default]
    Standard,
    /// Tougher, hits softer, worth more.
    Huge,
    /// Glass cannon.
    BigDamage,
}

impl UnitKind {
    pub const ALL: [UnitKind; 3] = [UnitKind::Standard, UnitKind::Huge, UnitKind::BigDamage];
}

/// Weapon categories. Each owns its own projectile pool(s).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeaponKind {
    PlayerCannon,
    /// Heavy ordnance: detonates instead of hitting directly.
    PlayerBomb,
    EnemyCannon,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PickupKind {
    #[default]
    Shield,
}

/// Collision category used by the dispatcher's pairing rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CollisionGroup {
    Player,
    OpposingUnit,
    PlayerProjectile,
    OpposingProjectile,
    HeavyOrdnance,
    Terrain,
    Scenery,
    Pickup,
}

impl From<WeaponKind> for CollisionGroup {
    fn from(weapon: WeaponKind) -> Self {
        match weapon {
            WeaponKind::PlayerCannon => CollisionGroup::PlayerProjectile,
            WeaponKind::PlayerBomb => CollisionGroup::HeavyOrdnance,
            WeaponKind::EnemyCannon => CollisionGroup::OpposingProjectile,
        }
    }
}
