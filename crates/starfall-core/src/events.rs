//! Records of the one-way notifications the simulation sends to its sinks.
//!
//! Sinks are free to ignore these; recording sinks and the headless runner
//! use them to observe what the core asked for.

use serde::{Deserialize, Serialize};

/// A single fire-and-forget notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SinkEvent {
    /// Presentation: play an entity's destruction animation.
    DestructionEffect { entity: u64 },
    /// Presentation: play an entity's damage animation.
    DamageEffect { entity: u64 },
    /// Audio: explosion one-shot.
    Explosion,
    /// Audio: laser one-shot.
    Laser,
    /// UI: show the current score total.
    Score { total: u32 },
    /// UI: show or hide the end-of-game affordances.
    GameOver { visible: bool },
    /// Session: the player asked for a restart.
    RestartRequested,
    /// Session: the player asked to quit.
    ExitRequested,
}
