//! Simulation constants and tuning parameters.
//!
//! These are the defaults behind `MatchConfig`; a JSON config may override
//! most of them per match.

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 60;

/// Real milliseconds per tick at 1x time scale.
pub const DT_MS: f64 = 1000.0 / TICK_RATE as f64;

// --- Arena ---

/// Default arena width in pixels.
pub const ARENA_WIDTH: f32 = 3200.0;

/// Default arena height in pixels.
pub const ARENA_HEIGHT: f32 = 2400.0;

// --- Degradation bands ---

/// Health ratio below which an entity is `Damaged`.
pub const DAMAGED_RATIO: f32 = 0.7;

/// Health ratio below which an entity is `Critical`.
pub const CRITICAL_RATIO: f32 = 0.4;

// --- Player ---

pub const PLAYER_MAX_HEALTH: f32 = 2.0;

/// Movement speed (pixels per second).
pub const PLAYER_SPEED: f32 = 300.0;

pub const PLAYER_RADIUS: f32 = 30.0;

/// Health restored by an ally-destroyed notification.
pub const PLAYER_REGEN_AMOUNT: f32 = 0.2;

/// Duration of the shield granted by a pickup.
pub const SHIELD_DURATION_MS: f64 = 5000.0;

// --- Weapons ---

/// Cannon shell speed (pixels per second).
pub const BULLET_SPEED: f32 = 1000.0;

pub const BULLET_RADIUS: f32 = 8.0;

pub const PLAYER_CANNON_CAPACITY: usize = 10;
pub const PLAYER_CANNON_DAMAGE: f32 = 0.05;
pub const PLAYER_CANNON_DELAY_MS: f64 = 80.0;
/// Score cost of one cannon shot.
pub const PLAYER_CANNON_COST: i64 = -1;

pub const ENEMY_CANNON_CAPACITY: usize = 5;
pub const ENEMY_CANNON_DAMAGE: f32 = 0.05;
pub const ENEMY_CANNON_DELAY_MS: f64 = 400.0;

pub const BOMB_CAPACITY: usize = 3;
pub const BOMB_DAMAGE: f32 = 100.0;
pub const BOMB_SPEED: f32 = 400.0;
pub const BOMB_RADIUS: f32 = 16.0;
pub const BOMB_LIFETIME_MS: f64 = 800.0;
pub const BOMB_BLAST_RADIUS: f32 = 150.0;
pub const BOMB_DELAY_MS: f64 = 1000.0;
/// Score cost of one bomb.
pub const BOMB_COST: i64 = -10;

// --- Opposing units ---

pub const ENEMY_RADIUS: f32 = 40.0;

/// Horizontal drift speed range for randomly placed units (±).
pub const ENEMY_DRIFT_SPEED_X: f32 = 200.0;

/// Vertical drift speed for randomly placed units.
pub const ENEMY_DRIFT_SPEED_Y: f32 = 300.0;

/// Distance kept from the arena edge when placing random units.
pub const ENEMY_SPAWN_MARGIN: f32 = 500.0;

pub const RANDOM_ENEMY_COUNT: u32 = 2;

// --- Scenery and pickups ---

pub const CRATE_HEALTH: f32 = 0.2;
pub const CRATE_RADIUS: f32 = 25.0;
pub const CRATE_SPAWN_MARGIN: f32 = 100.0;
pub const RANDOM_CRATE_COUNT: u32 = 50;

pub const PICKUP_RADIUS: f32 = 40.0;

// --- Orchestration ---

/// Delay between a unit's destruction and its reward reaching the score.
pub const REWARD_DELAY_MS: f64 = 1000.0;

/// Delay between the player's destruction and the defeat transition.
pub const DEFEAT_DELAY_MS: f64 = 10_000.0;

/// Victory triggers once the remaining unit count drops to this value.
pub const VICTORY_REMAINING_UNITS: u32 = 1;

/// Time scale applied on victory and on the player's destruction.
pub const SLOW_MOTION_SCALE: f64 = 0.1;

/// Bonus added to the reported final score on victory.
pub const VICTORY_BONUS: i64 = 100;

/// Upper bound on bus drain passes per tick (reactions may publish more events).
pub const MAX_REACTION_PASSES: usize = 8;
