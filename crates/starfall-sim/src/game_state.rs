//! Top-level game state machine and score keeping.
//!
//! Playing -> GameOver happens exactly once per session. Only a restart
//! (which rebuilds a fresh machine) returns to Playing.

use starfall_core::enums::GamePhase;
use starfall_core::state::GameState;

use crate::registry::EntityRegistry;
use crate::sinks::Sinks;
use crate::systems::spawn_scheduler::SpawnScheduler;

/// Owns `GameState`. Score changes only go through `add_score`.
#[derive(Debug, Clone, Default)]
pub struct GameStateMachine {
    state: GameState,
    game_over_fired: bool,
}

impl GameStateMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn score(&self) -> u32 {
        self.state.score
    }

    pub fn is_playing(&self) -> bool {
        self.state.phase == GamePhase::Playing
    }

    /// Push the initial UI state of a session.
    pub fn begin_session(&self, sinks: &mut Sinks) {
        sinks.show_score(self.state.score);
        sinks.show_game_over(false);
    }

    /// Add `amount` to the score and show the new total, even for zero.
    ///
    /// Ignored once the game is over. Returns whether the score was applied.
    pub fn add_score(&mut self, amount: u32, sinks: &mut Sinks) -> bool {
        if self.state.phase == GamePhase::GameOver {
            log::debug!("ignoring +{amount} score after game over");
            return false;
        }
        self.state.score = self.state.score.saturating_add(amount);
        log::debug!("score is now {}", self.state.score);
        sinks.show_score(self.state.score);
        true
    }

    /// The player died: go to GameOver, stop spawning, show the end-of-game UI.
    ///
    /// Only the first call does anything. Returns whether this call fired
    /// the transition.
    pub fn on_player_died(
        &mut self,
        spawner: &mut SpawnScheduler,
        registry: &mut EntityRegistry,
        sinks: &mut Sinks,
    ) -> bool {
        if self.game_over_fired {
            log::debug!("player death reported again; already game over");
            return false;
        }
        self.game_over_fired = true;
        self.state.phase = GamePhase::GameOver;
        spawner.stop(registry);
        sinks.show_game_over(true);
        log::info!("game over, final score {}", self.state.score);
        true
    }
}

/// Turns kills into score through the state machine.
#[derive(Debug, Clone)]
pub struct ScoreKeeper {
    reward: u32,
    kills: u32,
}

impl ScoreKeeper {
    pub fn new(reward: u32) -> Self {
        Self { reward, kills: 0 }
    }

    /// Kills that were actually scored.
    pub fn kills(&self) -> u32 {
        self.kills
    }

    /// Award the kill reward. Returns whether it was scored.
    pub fn award_kill(&mut self, state: &mut GameStateMachine, sinks: &mut Sinks) -> bool {
        let scored = state.add_score(self.reward, sinks);
        if scored {
            self.kills += 1;
        }
        scored
    }
}
