//! Game loop thread.
//!
//! The engine runs on its own thread. Hosts talk to it through a
//! `GameLoop` handle: commands go in over one channel, snapshots come out
//! on another.

use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use log::{debug, info, warn};

use arena_core::commands::PlayerCommand;
use arena_core::config::ConfigError;
use arena_core::state::{ArenaSnapshot, MatchOutcome};
use arena_sim::{ArenaEngine, SimConfig, TickInput};

/// Messages accepted by the loop thread.
#[derive(Debug)]
pub enum LoopCommand {
    /// Replace the input applied on subsequent ticks. In lockstep mode this
    /// also advances the match by exactly one tick.
    Input(TickInput),
    Player(PlayerCommand),
    Shutdown,
}

/// How the loop advances the clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pacing {
    /// One tick per received `Input`, as fast as the host sends them.
    Lockstep,
    /// One tick per wall-clock tick period, reusing the latest input.
    Realtime,
}

/// Summary handed back when the loop thread exits.
#[derive(Debug, Clone, PartialEq)]
pub struct LoopReport {
    pub ticks: u64,
    pub score: i64,
    pub outcome: Option<MatchOutcome>,
}

/// Handle to a running game loop.
pub struct GameLoop {
    command_tx: Sender<LoopCommand>,
    snapshot_rx: Receiver<ArenaSnapshot>,
    /// Latest snapshot for hosts that poll instead of draining the channel.
    latest_snapshot: Arc<Mutex<Option<ArenaSnapshot>>>,
    thread: Option<JoinHandle<LoopReport>>,
}

impl GameLoop {
    /// Build the engine and start the loop thread. Config errors surface
    /// here, before any thread is spawned.
    pub fn start(config: SimConfig, pacing: Pacing) -> Result<Self, ConfigError> {
        let tick_rate = config.tick_rate;
        let engine = ArenaEngine::new(config)?;
        let tick_duration = Duration::from_secs_f64(1.0 / tick_rate as f64);
        let (command_tx, command_rx) = mpsc::channel();
        let (snapshot_tx, snapshot_rx) = mpsc::channel();
        let latest_snapshot = Arc::new(Mutex::new(None));
        let shared = Arc::clone(&latest_snapshot);

        let thread = thread::Builder::new()
            .name("arena-loop".into())
            .spawn(move || {
                run_loop(
                    engine,
                    pacing,
                    tick_duration,
                    command_rx,
                    snapshot_tx,
                    &shared,
                )
            })?;

        Ok(Self {
            command_tx,
            snapshot_rx,
            latest_snapshot,
            thread: Some(thread),
        })
    }

    /// Send a command. Returns false once the loop has exited.
    pub fn send(&self, command: LoopCommand) -> bool {
        self.command_tx.send(command).is_ok()
    }

    /// Block until the next snapshot, or `None` once the loop has exited.
    pub fn recv_snapshot(&self) -> Option<ArenaSnapshot> {
        self.snapshot_rx.recv().ok()
    }

    pub fn recv_snapshot_timeout(&self, timeout: Duration) -> Option<ArenaSnapshot> {
        match self.snapshot_rx.recv_timeout(timeout) {
            Ok(snapshot) => Some(snapshot),
            Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => None,
        }
    }

    pub fn latest_snapshot(&self) -> Option<ArenaSnapshot> {
        self.latest_snapshot.lock().ok().and_then(|s| s.clone())
    }

    /// Stop the loop and wait for its report.
    pub fn shutdown(mut self) -> Option<LoopReport> {
        self.command_tx.send(LoopCommand::Shutdown).ok();
        self.thread.take().and_then(|t| t.join().ok())
    }
}

impl Drop for GameLoop {
    fn drop(&mut self) {
        if let Some(thread) = self.thread.take() {
            self.command_tx.send(LoopCommand::Shutdown).ok();
            thread.join().ok();
        }
    }
}

fn run_loop(
    mut engine: ArenaEngine,
    pacing: Pacing,
    tick_duration: Duration,
    rx: Receiver<LoopCommand>,
    tx: Sender<ArenaSnapshot>,
    latest_snapshot: &Mutex<Option<ArenaSnapshot>>,
) -> LoopReport {
    info!("game loop started ({pacing:?})");
    let mut input = TickInput::default();
    let mut ticks = 0u64;
    let mut next_tick_time = Instant::now();

    'outer: loop {
        match pacing {
            Pacing::Lockstep => {
                // Block until the host hands over the next tick's input.
                loop {
                    match rx.recv() {
                        Ok(LoopCommand::Input(next)) => {
                            input = next;
                            break;
                        }
                        Ok(LoopCommand::Player(command)) => engine.queue_command(command),
                        Ok(LoopCommand::Shutdown) | Err(_) => break 'outer,
                    }
                }
            }
            Pacing::Realtime => loop {
                match rx.try_recv() {
                    Ok(LoopCommand::Input(next)) => input = next,
                    Ok(LoopCommand::Player(command)) => engine.queue_command(command),
                    Ok(LoopCommand::Shutdown) | Err(TryRecvError::Disconnected) => break 'outer,
                    Err(TryRecvError::Empty) => break,
                }
            },
        }

        let snapshot = engine.tick(&input);
        ticks += 1;
        // Host-reported contacts apply to one tick only.
        input.contacts.clear();

        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(snapshot.clone());
        }
        if tx.send(snapshot).is_err() {
            debug!("snapshot receiver dropped");
            break;
        }

        if pacing == Pacing::Realtime {
            next_tick_time += tick_duration;
            let now = Instant::now();
            if next_tick_time > now {
                thread::sleep(next_tick_time - now);
            } else if now - next_tick_time > tick_duration * 2 {
                // Too far behind: resync instead of bursting to catch up.
                warn!("tick {ticks} fell behind by {:?}", now - next_tick_time);
                next_tick_time = now;
            }
        }
    }

    let state = engine.match_state();
    info!("game loop stopped after {ticks} ticks, score {}", state.score);
    LoopReport {
        ticks,
        score: state.score,
        outcome: state.outcome,
    }
}
