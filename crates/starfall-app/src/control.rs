//! Host-facing controls for the game loop.
//!
//! These bridge the host (a window, a script, a test) to the game loop
//! thread via channels, the same way for every caller.

use starfall_core::config::SimConfig;
use starfall_core::input::InputSnapshot;
use starfall_core::state::GameStateSnapshot;

use crate::error::AppError;
use crate::game_loop;
use crate::state::{AppState, GameLoopCommand};

/// Start the simulation. Spawns the game loop thread if not already running.
pub fn start_simulation(state: &AppState, config: SimConfig) -> Result<(), AppError> {
    let mut running = state.running.lock().map_err(|_| AppError::LockPoisoned)?;

    if *running {
        return Err(AppError::AlreadyRunning);
    }

    let (cmd_tx, handle) = game_loop::spawn_game_loop(config, state.latest_snapshot.clone())?;

    let mut tx_lock = state.command_tx.lock().map_err(|_| AppError::LockPoisoned)?;
    *tx_lock = Some(cmd_tx);
    let mut handle_lock = state.loop_handle.lock().map_err(|_| AppError::LockPoisoned)?;
    *handle_lock = Some(handle);
    *running = true;

    Ok(())
}

/// Send this tick's sampled input to the simulation.
pub fn send_input(state: &AppState, input: InputSnapshot) -> Result<(), AppError> {
    let tx_lock = state.command_tx.lock().map_err(|_| AppError::LockPoisoned)?;

    match tx_lock.as_ref() {
        Some(tx) => tx
            .send(GameLoopCommand::Input(input))
            .map_err(|_| AppError::ChannelClosed),
        None => Err(AppError::NotStarted),
    }
}

/// Get the latest snapshot synchronously (for polling / initial state).
pub fn get_snapshot(state: &AppState) -> Result<Option<GameStateSnapshot>, AppError> {
    let lock = state.latest_snapshot.lock().map_err(|_| AppError::LockPoisoned)?;
    Ok(lock.clone())
}

/// Whether the game loop thread is still ticking.
pub fn is_running(state: &AppState) -> Result<bool, AppError> {
    let handle = state.loop_handle.lock().map_err(|_| AppError::LockPoisoned)?;
    Ok(handle.as_ref().map_or(false, |h| !h.is_finished()))
}

/// Stop the game loop and wait for its thread to finish.
///
/// A loop that already exited on its own (exit request) is fine.
pub fn stop_simulation(state: &AppState) -> Result<(), AppError> {
    let mut running = state.running.lock().map_err(|_| AppError::LockPoisoned)?;
    if !*running {
        return Err(AppError::NotStarted);
    }

    if let Some(tx) = state
        .command_tx
        .lock()
        .map_err(|_| AppError::LockPoisoned)?
        .take()
    {
        let _ = tx.send(GameLoopCommand::Shutdown);
    }
    let handle = state
        .loop_handle
        .lock()
        .map_err(|_| AppError::LockPoisoned)?
        .take();
    if let Some(handle) = handle {
        if handle.join().is_err() {
            log::error!("game loop thread panicked");
        }
    }
    *running = false;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_input_before_start_is_rejected() {
        let state = AppState::new();
        assert!(matches!(
            send_input(&state, InputSnapshot::fire()),
            Err(AppError::NotStarted)
        ));
        assert!(matches!(stop_simulation(&state), Err(AppError::NotStarted)));
    }

    #[test]
    fn test_start_twice_is_rejected() {
        let state = AppState::new();
        start_simulation(&state, SimConfig::default()).unwrap();
        assert!(matches!(
            start_simulation(&state, SimConfig::default()),
            Err(AppError::AlreadyRunning)
        ));
        stop_simulation(&state).unwrap();
        assert!(!*state.running.lock().unwrap());
    }

    #[test]
    fn test_session_lifecycle() {
        let state = AppState::new();
        start_simulation(&state, SimConfig::default()).unwrap();
        send_input(&state, InputSnapshot::steer(1.0, 0.0)).unwrap();
        std::thread::sleep(Duration::from_millis(100));

        assert!(is_running(&state).unwrap());
        let snapshot = get_snapshot(&state).unwrap().expect("snapshot");
        assert!(snapshot.player.unwrap().position.x > 0.0);

        stop_simulation(&state).unwrap();
        assert!(!is_running(&state).unwrap());
        assert!(state.command_tx.lock().unwrap().is_none());
    }

    #[test]
    fn test_invalid_config_does_not_start() {
        let state = AppState::new();
        let mut config = SimConfig::default();
        config.spawn.x_min = 5.0;
        config.spawn.x_max = -5.0;
        assert!(matches!(
            start_simulation(&state, config),
            Err(AppError::Config(_))
        ));
        assert!(!*state.running.lock().unwrap());
    }
}
