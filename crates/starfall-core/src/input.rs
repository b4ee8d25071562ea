//! Per-tick input snapshot handed to the simulation.
//!
//! Raw device polling happens outside the core; the engine only ever sees
//! this already-sampled view.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Everything the player did during one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct InputSnapshot {
    /// Horizontal axis in [-1, 1].
    pub horizontal: f32,
    /// Vertical axis in [-1, 1].
    pub vertical: f32,
    pub fire_pressed: bool,
    pub restart_pressed: bool,
    #[serde(default)]
    pub exit_pressed: bool,
}

impl InputSnapshot {
    /// Movement vector with each axis clamped to [-1, 1].
    /// Non-finite readings count as centered.
    pub fn axis(&self) -> Vec2 {
        Vec2::new(sanitize_axis(self.horizontal), sanitize_axis(self.vertical))
    }

    /// Convenience constructor for a pure movement input.
    pub fn steer(horizontal: f32, vertical: f32) -> Self {
        Self {
            horizontal,
            vertical,
            ..Default::default()
        }
    }

    pub fn fire() -> Self {
        Self {
            fire_pressed: true,
            ..Default::default()
        }
    }

    pub fn restart() -> Self {
        Self {
            restart_pressed: true,
            ..Default::default()
        }
    }
}

fn sanitize_axis(value: f32) -> f32 {
    if value.is_finite() {
        value.clamp(-1.0, 1.0)
    } else {
        0.0
    }
}
