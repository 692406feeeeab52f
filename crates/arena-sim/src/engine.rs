//! Arena engine: the core of the game.
//!
//! `ArenaEngine` owns the hecs world, the projectile pools, the event bus and
//! the scheduler. It applies host commands, runs every system once per tick
//! and produces `ArenaSnapshot`s. Completely headless, so the whole match can
//! be driven deterministically from tests.

use std::collections::VecDeque;

use glam::Vec2;
use hecs::{Entity, World};
use log::{debug, info};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use arena_core::bus::{EventBus, SubscriberId, TopicSet};
use arena_core::commands::PlayerCommand;
use arena_core::config::{ConfigError, MatchConfig};
use arena_core::constants::TICK_RATE;
use arena_core::enums::{MatchPhase, PickupKind, UnitKind};
use arena_core::events::CombatEvent;
use arena_core::state::ArenaSnapshot;
use arena_core::types::{Aabb, SimClock};

use crate::collision::{self, DispatchContext};
use crate::input::{Contact, TickInput};
use crate::match_state::MatchState;
use crate::pool::Armory;
use crate::scheduler::Scheduler;
use crate::systems;
use crate::world_setup;

/// Configuration for starting a new match.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same match.
    pub seed: u64,
    /// Initial time scale (1.0 = normal).
    pub time_scale: f64,
    /// Ticks per real second.
    pub tick_rate: u32,
    pub match_config: MatchConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            time_scale: 1.0,
            tick_rate: TICK_RATE,
            match_config: MatchConfig::default(),
        }
    }
}

impl SimConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_rate == 0 {
            return Err(ConfigError::InvalidValue {
                what: "tick_rate",
                value: 0.0,
            });
        }
        if !self.time_scale.is_finite() || self.time_scale <= 0.0 {
            return Err(ConfigError::InvalidValue {
                what: "time_scale",
                value: self.time_scale,
            });
        }
        self.match_config.validate()
    }
}

/// The arena engine. Owns the ECS world and all match state.
pub struct ArenaEngine {
    pub(crate) world: World,
    pub(crate) clock: SimClock,
    pub(crate) state: MatchState,
    pub(crate) armory: Armory,
    pub(crate) scheduler: Scheduler,
    pub(crate) bus: EventBus,
    /// The engine's own bus subscription.
    pub(crate) orchestrator: SubscriberId,
    pub(crate) config: MatchConfig,
    rng: ChaCha8Rng,
    arena: Aabb,
    real_dt_ms: f64,
    command_queue: VecDeque<PlayerCommand>,
    despawn_buffer: Vec<Entity>,
    contact_buffer: Vec<Contact>,
}

impl ArenaEngine {
    /// Create an engine and populate the arena from the match config.
    pub fn new(config: SimConfig) -> Result<Self, ConfigError> {
        let mut engine = Self::blank(config)?;
        let roster = world_setup::setup_match(
            &mut engine.world,
            &mut engine.armory,
            &mut engine.rng,
            &engine.config,
        );
        engine.state.active_units = roster.units;
        Ok(engine)
    }

    /// Create an engine with an empty world. Entities are added with the
    /// `spawn_*` methods (for example by a host-side map loader).
    pub fn blank(config: SimConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut bus = EventBus::new();
        let orchestrator = bus.subscribe(TopicSet::all());
        let arena = config.match_config.arena_bounds();

        Ok(Self {
            world: World::new(),
            clock: SimClock::new(config.time_scale),
            state: MatchState::default(),
            armory: Armory::new(),
            scheduler: Scheduler::new(),
            bus,
            orchestrator,
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            arena,
            real_dt_ms: 1000.0 / config.tick_rate as f64,
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            contact_buffer: Vec::new(),
            config: config.match_config,
        })
    }

    // --- Spawning ---

    pub fn spawn_player(&mut self, position: Vec2) -> Entity {
        world_setup::spawn_player(
            &mut self.world,
            &mut self.armory,
            &self.config.weapons,
            position,
            self.config.player_max_health,
            self.config.player_radius,
        )
    }

    /// Spawn an opposing unit. It counts towards the victory threshold.
    pub fn spawn_enemy(&mut self, kind: UnitKind, position: Vec2, velocity: Vec2) -> Entity {
        self.state.active_units += 1;
        world_setup::spawn_enemy(
            &mut self.world,
            &mut self.armory,
            &self.config,
            kind,
            position,
            velocity,
        )
    }

    pub fn spawn_scenery(&mut self, position: Vec2) -> Entity {
        world_setup::spawn_scenery(
            &mut self.world,
            position,
            self.config.crate_health,
            self.config.crate_radius,
        )
    }

    pub fn spawn_pickup(&mut self, position: Vec2, kind: PickupKind) -> Entity {
        world_setup::spawn_pickup(&mut self.world, position, kind, self.config.pickup_radius)
    }

    pub fn spawn_terrain(&mut self, bounds: Aabb) -> Entity {
        world_setup::spawn_terrain(&mut self.world, bounds)
    }

    // --- Commands and events ---

    /// Queue a command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Register an additional bus subscriber (presentation, audio, tests).
    pub fn subscribe(&mut self, topics: TopicSet) -> SubscriberId {
        self.bus.subscribe(topics)
    }

    pub fn unsubscribe(&mut self, id: SubscriberId) -> bool {
        self.bus.unsubscribe(id)
    }

    pub fn drain_events(&mut self, id: SubscriberId) -> Vec<CombatEvent> {
        self.bus.drain(id)
    }

    /// Publish an event from outside the simulation. It is handled on the
    /// next tick like any other.
    pub fn publish(&mut self, event: CombatEvent) {
        self.bus.publish(event);
    }

    // --- Accessors ---

    pub fn phase(&self) -> MatchPhase {
        self.state.phase
    }

    pub fn score(&self) -> i64 {
        self.state.score
    }

    pub fn clock(&self) -> SimClock {
        self.clock
    }

    pub fn time_scale(&self) -> f64 {
        self.clock.time_scale
    }

    pub fn active_units(&self) -> u32 {
        self.state.active_units
    }

    pub fn match_state(&self) -> &MatchState {
        &self.state
    }

    /// Read-only view of the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn armory(&self) -> &Armory {
        &self.armory
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn arena(&self) -> Aabb {
        self.arena
    }

    // --- Tick ---

    /// Advance the match by one tick and return the resulting snapshot.
    pub fn tick(&mut self, input: &TickInput) -> ArenaSnapshot {
        self.process_commands();
        self.react();

        if !self.state.paused {
            let dt_ms = self.clock.advance(self.real_dt_ms);
            self.run_scheduled();

            if self.state.phase == MatchPhase::Playing {
                self.run_systems(input, dt_ms);
            } else {
                // Wind-down: things keep moving but nothing new resolves.
                systems::movement::run(&mut self.world, &self.arena, dt_ms);
                systems::movement::advance_projectiles(
                    &mut self.armory,
                    &self.arena,
                    dt_ms,
                    false,
                    &mut self.bus,
                );
            }

            self.react();
            systems::cleanup::run(&mut self.world, &mut self.despawn_buffer);
        }

        let events = self.bus.take_published();
        let fx = self.bus.take_fx();
        systems::snapshot::build_snapshot(
            &self.world,
            &self.armory,
            &self.clock,
            &self.state,
            events,
            fx,
        )
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    fn handle_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::Pause => {
                self.bus.publish(CombatEvent::PauseRequested);
            }
            PlayerCommand::Resume => {
                self.state.paused = false;
            }
            PlayerCommand::SetSound { enabled } => {
                self.bus.publish(CombatEvent::SoundSettingChanged { enabled });
            }
            PlayerCommand::NotifyAllyDestroyed => {
                self.bus.publish(CombatEvent::AllyDestroyed);
            }
            PlayerCommand::SetTimeScale { scale } => {
                if scale.is_finite() {
                    self.clock.time_scale = scale.clamp(0.0, 4.0);
                }
            }
        }
    }

    /// Run all combat systems in order.
    fn run_systems(&mut self, input: &TickInput, dt_ms: f64) {
        let now_ms = self.clock.now_ms;

        // 1. Player steering, aim and fire
        let shots = systems::player::run(
            &mut self.world,
            &mut self.armory,
            input,
            self.config.player_speed,
            now_ms,
            &mut self.bus,
        );
        self.state.shots_fired += shots.primary as u32 + shots.heavy as u32;
        // 2. Unit AI
        systems::unit_ai::run(
            &mut self.world,
            &mut self.armory,
            &input.engaged_region,
            now_ms,
            &mut self.bus,
        );
        // 3. Movement integration (bombs may expire here)
        systems::movement::run(&mut self.world, &self.arena, dt_ms);
        systems::movement::advance_projectiles(
            &mut self.armory,
            &self.arena,
            dt_ms,
            true,
            &mut self.bus,
        );
        // 4. Overlap detection, plus host-reported contacts
        let mut contacts = std::mem::take(&mut self.contact_buffer);
        contacts.clear();
        systems::overlap::detect(&self.world, &self.armory, &mut contacts);
        contacts.extend_from_slice(&input.contacts);
        // 5. Collision dispatch
        let report = collision::dispatch(
            &mut DispatchContext {
                world: &mut self.world,
                armory: &mut self.armory,
                bus: &mut self.bus,
                scheduler: &mut self.scheduler,
                now_ms,
                shield_duration_ms: self.config.rules.shield_duration_ms,
            },
            &contacts,
        );
        if report.duplicates > 0 {
            debug!("dropped {} duplicate contacts", report.duplicates);
        }
        self.contact_buffer = contacts;
    }

    pub(crate) fn log_phase_change(&self) {
        info!(
            "match {:?} at {:.0} ms, score {}",
            self.state.phase, self.clock.now_ms, self.state.score
        );
    }
}
