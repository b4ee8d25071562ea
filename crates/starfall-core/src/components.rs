//! ECS components for hecs entities.
//!
//! Components are plain data structs with few methods.
//! Game logic lives in systems, not components.
//! `EntityKind` and `Position` are components as well.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::types::{Aabb, Position};

/// Scalar movement speed along the entity's fixed direction (units/sec).
///
/// The enemy destruction sequence lowers this to the shudder value; movement
/// simply reads whatever is here.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Speed {
    pub units_per_sec: f32,
}

/// Axis-aligned trigger collider.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Collider {
    pub half_extents: Vec2,
    /// Disabled colliders never take part in overlap tests. Disabling is the
    /// first effect of every destruction sequence.
    pub enabled: bool,
}

/// Player weapon state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FireControl {
    /// Game-clock time after which the next shot is allowed.
    pub ready_at_secs: f64,
}

/// The player's engine flame cosmetic.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EngineFire {
    pub lit: bool,
}

/// Marks an enemy emitted by the spawn scheduler. `stop()` may clear these.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SpawnedEnemy;

impl Collider {
    pub fn new(half_extents: Vec2) -> Self {
        Self {
            half_extents,
            enabled: true,
        }
    }

    /// World-space box for a collider at `position`.
    pub fn aabb_at(&self, position: &Position) -> Aabb {
        Aabb::new(position.as_vec2(), self.half_extents)
    }
}
