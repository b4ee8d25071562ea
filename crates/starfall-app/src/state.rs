//! Handles the host keeps on a running session: the command channel into
//! the game loop, the snapshot it publishes, and its thread.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use starfall_core::input::InputSnapshot;
use starfall_core::state::GameStateSnapshot;

/// What the host can tell the game loop.
#[derive(Debug)]
pub enum GameLoopCommand {
    /// Replace the held input. Restart and exit presses apply to one tick only.
    Input(InputSnapshot),
    /// Shut down the game loop thread gracefully.
    Shutdown,
}

/// One session slot, driven through the functions in `control`.
///
/// Every field is lock-guarded so a single `AppState` can be shared between
/// an input thread and a polling thread.
pub struct AppState {
    /// Present from `start_simulation` until `stop_simulation` takes it.
    pub command_tx: Mutex<Option<mpsc::Sender<GameLoopCommand>>>,
    /// Written by the loop after every tick; read by `get_snapshot`.
    pub latest_snapshot: Arc<Mutex<Option<GameStateSnapshot>>>,
    /// Joined by `stop_simulation`. `is_running` checks whether it finished.
    pub loop_handle: Mutex<Option<JoinHandle<()>>>,
    /// Guards against starting a second loop into the same slot.
    pub running: Mutex<bool>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            command_tx: Mutex::new(None),
            latest_snapshot: Arc::new(Mutex::new(None)),
            loop_handle: Mutex::new(None),
            running: Mutex::new(false),
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }
}
