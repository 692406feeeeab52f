//! arena: run a tank arena match headlessly.
//!
//! Usage:
//!   arena [config.json] [--seed N] [--ticks N] [--realtime]

use std::error::Error;
use std::path::PathBuf;
use std::process;

use log::info;

use arena_app::autopilot::Autopilot;
use arena_app::game_loop::{GameLoop, LoopCommand, Pacing};
use arena_core::config::MatchConfig;
use arena_sim::{SimConfig, TickInput};

struct Args {
    config: Option<PathBuf>,
    seed: u64,
    ticks: u64,
    realtime: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = match parse_args(std::env::args().skip(1).collect()) {
        Ok(args) => args,
        Err(msg) => {
            eprintln!("{msg}");
            print_usage();
            process::exit(2);
        }
    };

    if let Err(e) = run(args) {
        eprintln!("arena: {e}");
        process::exit(1);
    }
}

fn print_usage() {
    eprintln!(
        "arena: headless tank arena runner\n\
         \n\
         arena [config.json] [options]\n\
         \n\
           --seed <N>     RNG seed (default: 42)\n\
           --ticks <N>    Maximum ticks to run (default: 36000)\n\
           --realtime     Pace ticks to wall-clock time\n"
    );
}

fn parse_args(args: Vec<String>) -> Result<Args, String> {
    let mut parsed = Args {
        config: None,
        seed: 42,
        ticks: 36_000,
        realtime: false,
    };
    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--seed" => parsed.seed = parse_value(&arg, iter.next())?,
            "--ticks" => parsed.ticks = parse_value(&arg, iter.next())?,
            "--realtime" => parsed.realtime = true,
            "help" | "--help" | "-h" => {
                print_usage();
                process::exit(0);
            }
            other if other.starts_with("--") => return Err(format!("Unknown option: {other}")),
            path => parsed.config = Some(PathBuf::from(path)),
        }
    }
    Ok(parsed)
}

fn parse_value(flag: &str, value: Option<String>) -> Result<u64, String> {
    let value = value.ok_or_else(|| format!("{flag} needs a value"))?;
    value
        .parse()
        .map_err(|_| format!("{flag}: not a number: {value}"))
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let match_config = match &args.config {
        Some(path) => {
            info!("loading match config from {}", path.display());
            MatchConfig::from_path(path)?
        }
        None => MatchConfig::default(),
    };
    let config = SimConfig {
        seed: args.seed,
        match_config,
        ..Default::default()
    };

    let pacing = if args.realtime {
        Pacing::Realtime
    } else {
        Pacing::Lockstep
    };
    let game = GameLoop::start(config, pacing)?;
    let pilot = Autopilot::default();
    let mut input = TickInput::default();

    for _ in 0..args.ticks {
        if pacing == Pacing::Lockstep && !game.send(LoopCommand::Input(input.clone())) {
            break;
        }
        let Some(snapshot) = game.recv_snapshot() else {
            break;
        };
        if snapshot.phase.is_terminal() {
            break;
        }
        input = pilot.next_input(&snapshot);
        if pacing == Pacing::Realtime {
            game.send(LoopCommand::Input(input.clone()));
        }
    }

    let report = game.shutdown().ok_or("game loop thread panicked")?;
    info!("ran {} ticks", report.ticks);
    println!("{}", serde_json::to_string_pretty(&report.outcome)?);
    Ok(())
}
