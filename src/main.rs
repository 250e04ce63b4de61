//! Bounce entry point
//!
//! Headless runner: drives the simulation with the autopilot and logs what
//! happens. A graphical frontend would replace the autopilot with keyboard
//! intents and draw `GameState` after every tick.
//!
//! Usage: `bounce-game [CONFIG_JSON]` (set `RUST_LOG=info` or `debug` for output)

use std::time::{SystemTime, UNIX_EPOCH};

use bounce_game::consts::TICKS_PER_SECOND;
use bounce_game::sim::{GameEvent, GameState, TickInput, autopilot, tick};
use bounce_game::{ConfigResult, GameConfig, LevelTable};

/// Five simulated minutes
const MAX_TICKS: u64 = 5 * 60 * TICKS_PER_SECOND as u64;

fn main() {
    env_logger::init();
    log::info!("Bounce (headless) starting...");

    let state = match setup() {
        Ok(state) => state,
        Err(err) => {
            log::error!("{err}");
            std::process::exit(1);
        }
    };
    run(state);
}

fn setup() -> ConfigResult<GameState> {
    let config = match std::env::args().nth(1) {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    log::info!("Seed: {seed}");
    GameState::new(config, LevelTable::standard(), seed)
}

fn run(mut state: GameState) {
    let mut games = 1u32;
    let mut best_score = 0u64;

    for _ in 0..MAX_TICKS {
        let input = TickInput::new(autopilot(&state));
        tick(&mut state, &input);

        for event in &state.events {
            match event {
                GameEvent::GameOver { score } => {
                    best_score = best_score.max(*score);
                }
                GameEvent::Restarted => games += 1,
                GameEvent::LevelStarted { level } => {
                    log::info!("Level {} | score {} | lives {}", level + 1, state.score, state.lives);
                }
                _ => log::trace!("{event:?}"),
            }
        }

        if state.quit_requested {
            break;
        }
    }
    best_score = best_score.max(state.score);

    let summary = serde_json::json!({
        "seed": state.seed,
        "ticks": state.time_ticks,
        "games": games,
        "best_score": best_score,
        "level": state.level + 1,
        "lives": state.lives,
        "blocks_left": state.blocks.len(),
    });
    match serde_json::to_string_pretty(&summary) {
        Ok(json) => println!("{json}"),
        Err(err) => log::error!("Failed to encode summary: {err}"),
    }
}
