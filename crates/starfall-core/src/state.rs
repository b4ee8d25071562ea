//! Game state and the per-tick snapshot returned to the outside world.

use serde::{Deserialize, Serialize};

use crate::enums::{EntityKind, GamePhase};
use crate::types::{Position, SimTime};

/// Score and phase of the current session.
///
/// Owned by the state machine; everything else reads it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub score: u32,
    pub phase: GamePhase,
}

/// Complete visible state produced after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    pub score: u32,
    pub kills: u32,
    pub spawner_active: bool,
    pub player: Option<PlayerView>,
    pub entities: Vec<EntityView>,
}

/// One live entity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EntityView {
    pub id: u64,
    pub kind: EntityKind,
    pub position: Position,
    /// A destruction sequence is running (collider already disabled).
    pub dying: bool,
}

/// Player-specific details.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerView {
    pub id: u64,
    pub position: Position,
    pub dying: bool,
    pub engine_fire: bool,
}
