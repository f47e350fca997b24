//! Boss Dodge entry point
//!
//! Headless runner: the autopilot plays one fight and the result is printed
//! as JSON. Pass `--realtime` to pace frames at the tick rate.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

use boss_dodge::Tuning;
use boss_dodge::audio::AudioManager;
use boss_dodge::platform::{FixedClock, FramePacer, SimClock, WallClock};
use boss_dodge::renderer::{HeadlessSurface, Surface, build_draw_list};
use boss_dodge::sim::{GamePhase, GameState, TickInput, autopilot_input, tick};

/// Five minutes at the default tick rate
const DEFAULT_MAX_TICKS: u64 = 60 * 60 * 5;

#[derive(Parser, Debug)]
#[command(name = "boss-dodge")]
#[command(about = "Run one autopiloted boss fight and print the result as JSON")]
struct Args {
    /// RNG seed for the run
    #[arg(long, short, default_value_t = 0x5eed)]
    seed: u64,

    /// Quit after this many ticks if the fight is still going
    #[arg(long, default_value_t = DEFAULT_MAX_TICKS)]
    max_ticks: u64,

    /// Pace frames against wall time instead of running flat out
    #[arg(long, short)]
    realtime: bool,

    /// JSON tuning file; falls back to defaults if unreadable
    #[arg(long)]
    tuning: Option<PathBuf>,

    /// Master volume (0.0 - 1.0)
    #[arg(long, default_value_t = 0.8)]
    volume: f32,

    /// Silence all audio
    #[arg(long)]
    mute: bool,
}

/// Final report printed on stdout
#[derive(Debug, Serialize)]
struct RunSummary {
    seed: u64,
    outcome: GamePhase,
    ticks: u64,
    score: u64,
    player_health: u32,
    target_health: u32,
}

/// Input for the next frame; the tick cap stands in for the window close
fn frame_input(state: &GameState, max_ticks: u64) -> TickInput {
    let mut input = autopilot_input(state);
    input.quit = state.time_ticks >= max_ticks;
    input
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let tuning = match &args.tuning {
        Some(path) => Tuning::load(path),
        None => Tuning::default(),
    };
    let tick_hz = tuning.tick_hz;

    log::info!("Boss Dodge starting with seed {}", args.seed);
    let mut state = GameState::with_tuning(args.seed, tuning);
    let mut audio = AudioManager::default();
    audio.set_master_volume(args.volume);
    audio.set_muted(args.mute);
    let mut surface = HeadlessSurface::default();

    let mut clock: Box<dyn SimClock> = if args.realtime {
        Box::new(WallClock::default())
    } else {
        Box::new(FixedClock::new(tick_hz))
    };
    let mut pacer = args.realtime.then(|| FramePacer::new(tick_hz));

    audio.start_music();

    while !state.phase.is_terminal() {
        let input = frame_input(&state, args.max_ticks);
        if input.quit {
            log::info!("Quit after {} ticks", state.time_ticks);
            break;
        }
        tick(&mut state, &input, clock.next_frame_ms());

        let events = state.drain_events();
        for event in &events {
            log::debug!("tick {}: {:?}", state.time_ticks, event);
        }
        audio.handle_events(&events);
        surface.present(&build_draw_list(&state));

        if let Some(pacer) = pacer.as_mut() {
            pacer.wait();
        }
    }

    match state.phase {
        GamePhase::TargetDefeated => log::info!("Target defeated at tick {}", state.time_ticks),
        GamePhase::PlayerDefeated => log::info!("Player defeated at tick {}", state.time_ticks),
        GamePhase::Running => {}
    }

    let summary = RunSummary {
        seed: args.seed,
        outcome: state.phase,
        ticks: state.time_ticks,
        score: state.score,
        player_health: state.player.health,
        target_health: state.target_health(),
    };
    let json = serde_json::to_string_pretty(&summary).context("failed to serialize run summary")?;
    println!("{json}");
    Ok(())
}
