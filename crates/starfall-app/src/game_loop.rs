//! Game loop thread: runs the simulation engine at its tick rate and
//! publishes snapshots.
//!
//! The engine is created inside this thread because its sinks are not `Send`.
//! Input arrives via `mpsc` channel. The latest snapshot is stored in shared
//! state for synchronous polling.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use starfall_core::config::SimConfig;
use starfall_core::input::InputSnapshot;
use starfall_core::state::GameStateSnapshot;
use starfall_sim::SimulationEngine;

use crate::error::AppError;
use crate::sinks;
use crate::state::GameLoopCommand;

/// Spawns the game loop in a new thread.
///
/// The config is validated up front so a bad config fails here rather than
/// inside the thread. Returns the command sender and the thread handle.
pub fn spawn_game_loop(
    config: SimConfig,
    latest_snapshot: Arc<Mutex<Option<GameStateSnapshot>>>,
) -> Result<(mpsc::Sender<GameLoopCommand>, JoinHandle<()>), AppError> {
    config.validate()?;
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();

    let handle = std::thread::Builder::new()
        .name("starfall-game-loop".into())
        .spawn(move || {
            run_game_loop(config, cmd_rx, &latest_snapshot);
        })?;

    Ok((cmd_tx, handle))
}

/// The game loop. Runs until Shutdown, channel disconnect, or an exit request.
fn run_game_loop(
    config: SimConfig,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    latest_snapshot: &Mutex<Option<GameStateSnapshot>>,
) {
    let tick_duration = Duration::from_secs_f64(config.dt());
    let mut engine = match SimulationEngine::with_sinks(config, sinks::log_sinks()) {
        Ok(engine) => engine,
        Err(err) => {
            log::error!("failed to start simulation: {err}");
            return;
        }
    };
    let mut held = InputSnapshot::default();
    let mut next_tick_time = Instant::now();
    log::info!("game loop started at {tick_duration:?} per tick");

    loop {
        // 1. Drain all pending commands; the last input wins
        loop {
            match cmd_rx.try_recv() {
                Ok(GameLoopCommand::Input(input)) => held = merge_input(held, input),
                Ok(GameLoopCommand::Shutdown) => {
                    log::info!("game loop shutting down");
                    return;
                }
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => return,
            }
        }

        // 2. Advance one tick
        let snapshot = engine.tick(&held);
        held.restart_pressed = false;
        held.exit_pressed = false;

        // 3. Store latest snapshot for synchronous polling
        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(snapshot);
        }

        if engine.exit_requested() {
            log::info!("game loop exiting on player request");
            return;
        }

        // 4. Sleep until next tick
        next_tick_time += tick_duration;
        let now = Instant::now();
        if next_tick_time > now {
            std::thread::sleep(next_tick_time - now);
        } else if now - next_tick_time > tick_duration * 2 {
            // Too far behind, reset instead of catching up
            next_tick_time = now;
        }
    }
}

/// Replace the held input, keeping one-tick presses that have not been
/// consumed yet.
fn merge_input(held: InputSnapshot, incoming: InputSnapshot) -> InputSnapshot {
    InputSnapshot {
        restart_pressed: held.restart_pressed || incoming.restart_pressed,
        exit_pressed: held.exit_pressed || incoming.exit_pressed,
        ..incoming
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use starfall_core::enums::GamePhase;

    #[test]
    fn test_command_channel_round_trip() {
        let (tx, rx) = mpsc::channel::<GameLoopCommand>();

        tx.send(GameLoopCommand::Input(InputSnapshot::fire())).unwrap();
        tx.send(GameLoopCommand::Input(InputSnapshot::restart()))
            .unwrap();
        tx.send(GameLoopCommand::Shutdown).unwrap();

        let commands: Vec<GameLoopCommand> = rx.try_iter().collect();
        assert_eq!(commands.len(), 3);
        assert!(matches!(
            commands[0],
            GameLoopCommand::Input(InputSnapshot {
                fire_pressed: true,
                ..
            })
        ));
        assert!(matches!(
            commands[1],
            GameLoopCommand::Input(InputSnapshot {
                restart_pressed: true,
                ..
            })
        ));
        assert!(matches!(commands[2], GameLoopCommand::Shutdown));
    }

    #[test]
    fn test_merge_keeps_pending_presses() {
        let held = merge_input(InputSnapshot::default(), InputSnapshot::restart());
        let held = merge_input(held, InputSnapshot::steer(1.0, 0.0));
        assert!(held.restart_pressed);
        assert_eq!(held.horizontal, 1.0);
        assert!(!held.fire_pressed);
    }

    #[test]
    fn test_snapshot_serialization_under_3ms() {
        let mut engine = SimulationEngine::new(SimConfig::default()).unwrap();
        for _ in 0..300 {
            engine.tick(&InputSnapshot::fire());
        }

        let snapshot = engine.tick(&InputSnapshot::default());
        let start = Instant::now();
        let json = serde_json::to_string(&snapshot).unwrap();
        let elapsed = start.elapsed();

        assert!(
            elapsed < Duration::from_millis(3),
            "Snapshot serialization took {:?}, should be <3ms",
            elapsed
        );
        assert!(!json.is_empty());
    }

    #[test]
    fn test_loop_publishes_snapshots_and_shuts_down() {
        let latest = Arc::new(Mutex::new(None));
        let (tx, handle) = spawn_game_loop(SimConfig::default(), latest.clone()).unwrap();

        std::thread::sleep(Duration::from_millis(100));
        tx.send(GameLoopCommand::Shutdown).unwrap();
        handle.join().unwrap();

        let snapshot = latest.lock().unwrap().clone().expect("snapshot published");
        assert_eq!(snapshot.phase, GamePhase::Playing);
        assert!(snapshot.time.tick > 0);
        assert!(snapshot.player.is_some());
    }

    #[test]
    fn test_exit_input_stops_loop() {
        let latest = Arc::new(Mutex::new(None));
        let (tx, handle) = spawn_game_loop(SimConfig::default(), latest).unwrap();

        tx.send(GameLoopCommand::Input(InputSnapshot {
            exit_pressed: true,
            ..Default::default()
        }))
        .unwrap();
        handle.join().unwrap();
    }

    #[test]
    fn test_invalid_config_fails_before_spawn() {
        let mut config = SimConfig::default();
        config.tick_rate = 0;
        let result = spawn_game_loop(config, Arc::new(Mutex::new(None)));
        assert!(matches!(result, Err(AppError::Config(_))));
    }
}
