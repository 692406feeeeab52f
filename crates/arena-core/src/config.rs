//! Match configuration.
//!
//! Every field has a default matching `constants`, so a JSON file only needs
//! to mention what it overrides.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::*;
use crate::enums::UnitKind;
use crate::types::Aabb;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("{weapon}: pool capacity must be between 1 and {max}, got {capacity}")]
    InvalidCapacity {
        weapon: &'static str,
        capacity: usize,
        max: usize,
    },

    #[error("{what}: health must be positive and finite, got {value}")]
    InvalidHealth { what: &'static str, value: f32 },

    #[error("{what} must be positive and finite, got {value}")]
    InvalidValue { what: &'static str, value: f64 },

    #[error("arena must have a positive size, got {width}x{height}")]
    InvalidArena { width: f32, height: f32 },
}

/// Largest pool the handle type can address.
pub const MAX_POOL_CAPACITY: usize = u16::MAX as usize;

/// Projectile weapon tuning. An override in JSON must list every field
/// except `lifetime_ms`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeaponSpec {
    pub capacity: usize,
    pub speed: f32,
    pub damage: f32,
    pub delay_ms: f64,
    /// Projectiles expire after this long; `None` flies until it hits something.
    pub lifetime_ms: Option<f64>,
    /// Collision radius of the projectile itself.
    pub radius: f32,
    /// Explosion radius (heavy ordnance only).
    pub blast_radius: f32,
    /// Score delta per shot.
    pub score_cost: i64,
}

impl Default for WeaponSpec {
    fn default() -> Self {
        Self::player_cannon()
    }
}

impl WeaponSpec {
    pub fn player_cannon() -> Self {
        Self {
            capacity: PLAYER_CANNON_CAPACITY,
            speed: BULLET_SPEED,
            damage: PLAYER_CANNON_DAMAGE,
            delay_ms: PLAYER_CANNON_DELAY_MS,
            lifetime_ms: None,
            radius: BULLET_RADIUS,
            blast_radius: 0.0,
            score_cost: PLAYER_CANNON_COST,
        }
    }

    pub fn player_bomb() -> Self {
        Self {
            capacity: BOMB_CAPACITY,
            speed: BOMB_SPEED,
            damage: BOMB_DAMAGE,
            delay_ms: BOMB_DELAY_MS,
            lifetime_ms: Some(BOMB_LIFETIME_MS),
            radius: BOMB_RADIUS,
            blast_radius: BOMB_BLAST_RADIUS,
            score_cost: BOMB_COST,
        }
    }

    pub fn enemy_cannon() -> Self {
        Self {
            capacity: ENEMY_CANNON_CAPACITY,
            speed: BULLET_SPEED,
            damage: ENEMY_CANNON_DAMAGE,
            delay_ms: ENEMY_CANNON_DELAY_MS,
            lifetime_ms: None,
            radius: BULLET_RADIUS,
            blast_radius: 0.0,
            score_cost: 0,
        }
    }

    fn validate(&self, weapon: &'static str) -> Result<(), ConfigError> {
        if self.capacity == 0 || self.capacity > MAX_POOL_CAPACITY {
            return Err(ConfigError::InvalidCapacity {
                weapon,
                capacity: self.capacity,
                max: MAX_POOL_CAPACITY,
            });
        }
        positive(weapon, self.speed as f64)?;
        if !self.damage.is_finite() || self.damage < 0.0 {
            return Err(ConfigError::InvalidValue {
                what: weapon,
                value: self.damage as f64,
            });
        }
        if let Some(lifetime) = self.lifetime_ms {
            positive(weapon, lifetime)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeaponsConfig {
    pub player_cannon: WeaponSpec,
    pub player_bomb: WeaponSpec,
    pub enemy_cannon: WeaponSpec,
}

impl Default for WeaponsConfig {
    fn default() -> Self {
        Self {
            player_cannon: WeaponSpec::player_cannon(),
            player_bomb: WeaponSpec::player_bomb(),
            enemy_cannon: WeaponSpec::enemy_cannon(),
        }
    }
}

/// Stats for one opposing unit kind.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UnitProfile {
    pub max_health: f32,
    /// Multiplier on the enemy cannon's damage.
    pub damage_factor: f32,
    pub reward: i64,
    pub radius: f32,
    pub fire_delay_ms: f64,
}

impl Default for UnitProfile {
    fn default() -> Self {
        Self::for_kind(UnitKind::Standard)
    }
}

impl UnitProfile {
    pub fn for_kind(kind: UnitKind) -> Self {
        let standard = Self {
            max_health: 1.0,
            damage_factor: 1.0,
            reward: 100,
            radius: ENEMY_RADIUS,
            fire_delay_ms: ENEMY_CANNON_DELAY_MS,
        };
        match kind {
            UnitKind::Standard => standard,
            UnitKind::Huge => Self {
                max_health: 2.0,
                damage_factor: 0.5,
                reward: 200,
                radius: ENEMY_RADIUS * 1.5,
                ..standard
            },
            UnitKind::BigDamage => Self {
                damage_factor: 2.0,
                reward: 150,
                ..standard
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UnitProfiles {
    pub standard: UnitProfile,
    pub huge: UnitProfile,
    pub big_damage: UnitProfile,
}

impl Default for UnitProfiles {
    fn default() -> Self {
        Self {
            standard: UnitProfile::for_kind(UnitKind::Standard),
            huge: UnitProfile::for_kind(UnitKind::Huge),
            big_damage: UnitProfile::for_kind(UnitKind::BigDamage),
        }
    }
}

impl UnitProfiles {
    pub fn get(&self, kind: UnitKind) -> &UnitProfile {
        match kind {
            UnitKind::Standard => &self.standard,
            UnitKind::Huge => &self.huge,
            UnitKind::BigDamage => &self.big_damage,
        }
    }
}

/// Orchestrator tuning: score, delays and terminal transitions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    pub reward_delay_ms: f64,
    pub defeat_delay_ms: f64,
    pub victory_remaining_units: u32,
    pub slow_motion_scale: f64,
    pub victory_bonus: i64,
    pub shield_duration_ms: f64,
    pub regen_amount: f32,
    /// Treat each opposing unit's destruction as an ally notification.
    pub regen_on_unit_destroyed: bool,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            reward_delay_ms: REWARD_DELAY_MS,
            defeat_delay_ms: DEFEAT_DELAY_MS,
            victory_remaining_units: VICTORY_REMAINING_UNITS,
            slow_motion_scale: SLOW_MOTION_SCALE,
            victory_bonus: VICTORY_BONUS,
            shield_duration_ms: SHIELD_DURATION_MS,
            regen_amount: PLAYER_REGEN_AMOUNT,
            regen_on_unit_destroyed: true,
        }
    }
}

/// A placed opposing unit. `kind: None` picks one at random.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnemySpawn {
    pub position: Vec2,
    #[serde(default)]
    pub kind: Option<UnitKind>,
}

/// Arena layout and tuning for one match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    pub arena_width: f32,
    pub arena_height: f32,
    pub terrain: Vec<Aabb>,
    pub player_spawn: Vec2,
    pub player_max_health: f32,
    pub player_speed: f32,
    pub player_radius: f32,
    pub enemy_spawns: Vec<EnemySpawn>,
    pub random_enemies: u32,
    pub crate_spawns: Vec<Vec2>,
    pub random_crates: u32,
    pub crate_health: f32,
    pub crate_radius: f32,
    pub shield_pickups: Vec<Vec2>,
    pub pickup_radius: f32,
    pub weapons: WeaponsConfig,
    pub units: UnitProfiles,
    pub rules: RulesConfig,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            arena_width: ARENA_WIDTH,
            arena_height: ARENA_HEIGHT,
            terrain: vec![
                Aabb::new(Vec2::new(1000.0, 900.0), Vec2::new(1200.0, 1500.0)),
                Aabb::new(Vec2::new(2000.0, 400.0), Vec2::new(2600.0, 560.0)),
            ],
            player_spawn: Vec2::new(400.0, 1200.0),
            player_max_health: PLAYER_MAX_HEALTH,
            player_speed: PLAYER_SPEED,
            player_radius: PLAYER_RADIUS,
            enemy_spawns: vec![
                EnemySpawn {
                    position: Vec2::new(1800.0, 1200.0),
                    kind: Some(UnitKind::Standard),
                },
                EnemySpawn {
                    position: Vec2::new(2700.0, 1800.0),
                    kind: Some(UnitKind::Huge),
                },
            ],
            random_enemies: RANDOM_ENEMY_COUNT,
            crate_spawns: vec![Vec2::new(700.0, 900.0), Vec2::new(700.0, 1500.0)],
            random_crates: RANDOM_CRATE_COUNT,
            crate_health: CRATE_HEALTH,
            crate_radius: CRATE_RADIUS,
            shield_pickups: vec![Vec2::new(800.0, 1200.0)],
            pickup_radius: PICKUP_RADIUS,
            weapons: WeaponsConfig::default(),
            units: UnitProfiles::default(),
            rules: RulesConfig::default(),
        }
    }
}

impl MatchConfig {
    /// An empty arena: no terrain, units, scenery or pickups.
    pub fn empty() -> Self {
        Self {
            terrain: Vec::new(),
            enemy_spawns: Vec::new(),
            random_enemies: 0,
            crate_spawns: Vec::new(),
            random_crates: 0,
            shield_pickups: Vec::new(),
            ..Self::default()
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: MatchConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn arena_bounds(&self) -> Aabb {
        Aabb::from_size(self.arena_width, self.arena_height)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.arena_width.is_finite()
            && self.arena_height.is_finite()
            && self.arena_width > 0.0
            && self.arena_height > 0.0)
        {
            return Err(ConfigError::InvalidArena {
                width: self.arena_width,
                height: self.arena_height,
            });
        }
        health("player", self.player_max_health)?;
        health("crate", self.crate_health)?;
        for kind in UnitKind::ALL {
            health("unit", self.units.get(kind).max_health)?;
        }
        positive("player_speed", self.player_speed as f64)?;
        self.weapons.player_cannon.validate("player_cannon")?;
        self.weapons.player_bomb.validate("player_bomb")?;
        self.weapons.enemy_cannon.validate("enemy_cannon")?;

        let rules = &self.rules;
        positive("slow_motion_scale", rules.slow_motion_scale)?;
        if rules.slow_motion_scale > 1.0 {
            return Err(ConfigError::InvalidValue {
                what: "slow_motion_scale",
                value: rules.slow_motion_scale,
            });
        }
        positive("shield_duration_ms", rules.shield_duration_ms)?;
        // A threshold at or above the starting roster would end the match on
        // the first kill. Rosters spawned at runtime are not counted.
        let roster = self.enemy_spawns.len() as u64 + self.random_enemies as u64;
        if roster > 0 && rules.victory_remaining_units as u64 >= roster {
            return Err(ConfigError::InvalidValue {
                what: "victory_remaining_units",
                value: rules.victory_remaining_units as f64,
            });
        }
        if !rules.regen_amount.is_finite() || rules.regen_amount < 0.0 {
            return Err(ConfigError::InvalidValue {
                what: "regen_amount",
                value: rules.regen_amount as f64,
            });
        }
        if rules.reward_delay_ms < 0.0 || rules.defeat_delay_ms < 0.0 {
            return Err(ConfigError::InvalidValue {
                what: "reaction delay",
                value: rules.reward_delay_ms.min(rules.defeat_delay_ms),
            });
        }
        if self.weapons.player_bomb.lifetime_ms.is_none() {
            log::warn!("player_bomb has no lifetime; bombs will only detonate on terrain");
        }
        Ok(())
    }
}

fn health(what: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidHealth { what, value })
    }
}

fn positive(what: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue { what, value })
    }
}
