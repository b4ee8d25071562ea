//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// The closed set of entity kinds the rules know about.
///
/// Also used directly as an ECS component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Player,
    Enemy,
    PlayerLaser,
    EnemyLaser,
}

/// Top-level game phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Normal play. Spawning and input are live.
    #[default]
    Playing,
    /// The player died. Terminal until a restart rebuilds the session.
    GameOver,
}

/// Unordered pair of entity kinds, normalized so that `first <= second`.
///
/// `KindPair::new(a, b) == KindPair::new(b, a)` for every `a`, `b`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KindPair {
    first: EntityKind,
    second: EntityKind,
}

impl EntityKind {
    pub const ALL: [EntityKind; 4] = [
        EntityKind::Player,
        EntityKind::Enemy,
        EntityKind::PlayerLaser,
        EntityKind::EnemyLaser,
    ];

    /// Whether this kind is a projectile.
    pub fn is_laser(self) -> bool {
        matches!(self, EntityKind::PlayerLaser | EntityKind::EnemyLaser)
    }
}

impl KindPair {
    pub fn new(a: EntityKind, b: EntityKind) -> Self {
        if a <= b {
            Self {
                first: a,
                second: b,
            }
        } else {
            Self {
                first: b,
                second: a,
            }
        }
    }

    /// The lower-ordered kind.
    pub fn first(&self) -> EntityKind {
        self.first
    }

    /// The higher-ordered kind.
    pub fn second(&self) -> EntityKind {
        self.second
    }

    /// True when `(a, b)` had to be swapped to normalize.
    pub fn is_swapped(a: EntityKind, b: EntityKind) -> bool {
        a > b
    }
}
