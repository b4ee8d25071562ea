//! Headless STARFALL runner.
//!
//! Usage: `starfall [config.json] [seconds]`
//!
//! Plays a scripted session (weave, fire, restart once the game is over) for
//! the given number of seconds, then prints the final snapshot as JSON.
//! Set `RUST_LOG=info` (or `debug`) to watch the sink notifications.

use std::time::{Duration, Instant};

use starfall_app::control;
use starfall_app::error::AppError;
use starfall_app::state::AppState;
use starfall_core::config::SimConfig;
use starfall_core::enums::GamePhase;
use starfall_core::input::InputSnapshot;

const DEFAULT_RUN_SECS: u64 = 20;
const INPUT_PERIOD: Duration = Duration::from_millis(50);

fn main() -> Result<(), AppError> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => SimConfig::from_json_str(&std::fs::read_to_string(path)?)?,
        None => SimConfig::default(),
    };
    let run_for = Duration::from_secs(
        args.next()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_RUN_SECS),
    );

    let state = AppState::new();
    control::start_simulation(&state, config)?;

    let started = Instant::now();
    let mut step: u64 = 0;
    while started.elapsed() < run_for && control::is_running(&state)? {
        let game_over = control::get_snapshot(&state)?
            .map_or(false, |s| s.phase == GamePhase::GameOver);
        control::send_input(&state, scripted_input(step, game_over))?;
        step += 1;
        std::thread::sleep(INPUT_PERIOD);
    }

    let last = control::get_snapshot(&state)?;
    control::stop_simulation(&state)?;
    if let Some(snapshot) = last {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    }
    Ok(())
}

/// Sweep left and right while firing; press restart after a game over.
fn scripted_input(step: u64, game_over: bool) -> InputSnapshot {
    if game_over {
        return InputSnapshot::restart();
    }
    let horizontal = if (step / 40) % 2 == 0 { 1.0 } else { -1.0 };
    InputSnapshot {
        horizontal,
        fire_pressed: step % 3 == 0,
        ..Default::default()
    }
}
