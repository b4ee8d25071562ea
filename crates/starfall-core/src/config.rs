//! Simulation configuration.
//!
//! `SimConfig::default()` reproduces the stock game. Every config that enters
//! the simulation goes through `validate()` first, so systems can trust it.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::ConfigError;
use crate::types::Position;

/// Configuration for starting a new simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    /// Ticks per second of game clock.
    pub tick_rate: u32,
    pub bounds: Bounds,
    pub spawn: SpawnConfig,
    pub tuning: Tuning,
}

/// Static playfield limits.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Bounds {
    /// Enemies at or below this line wrap to the top.
    pub enemy_floor_y: f32,
    /// Height a wrapped enemy re-enters at.
    pub enemy_ceiling_y: f32,
    /// Player x at or above this wraps to `player_reentry_low_x`.
    pub player_wrap_high_x: f32,
    /// Player x at or below this wraps to `player_reentry_high_x`.
    pub player_wrap_low_x: f32,
    pub player_reentry_low_x: f32,
    pub player_reentry_high_x: f32,
    pub player_y_min: f32,
    pub player_y_max: f32,
    /// Player lasers at or above this line are removed.
    pub laser_top_y: f32,
}

/// Enemy spawn schedule.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnConfig {
    pub interval_secs: f64,
    /// Delay between `start()` and the first spawn.
    pub initial_delay_secs: f64,
    pub x_min: f32,
    pub x_max: f32,
    /// Spawn line height.
    pub spawn_y: f32,
    /// Whether `stop()` also removes every scheduler-spawned enemy.
    pub clear_on_stop: bool,
    pub active: bool,
}

/// Gameplay tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub player_speed: f32,
    pub enemy_speed: f32,
    pub enemy_shudder_speed: f32,
    pub laser_speed: f32,
    pub fire_cooldown_secs: f64,
    pub muzzle_offset: f32,
    /// Horizontal offsets of the lasers fired by one shot. More than one
    /// entry groups the lasers under a shared container entity.
    pub volley_offsets: Vec<f32>,
    pub kill_reward: u32,
    pub enemy_ram_grace_secs: f64,
    pub enemy_shot_grace_secs: f64,
    pub player_death_grace_secs: f64,
    pub player_start: Position,
    pub player_half_extents: Vec2,
    pub enemy_half_extents: Vec2,
    pub laser_half_extents: Vec2,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            tick_rate: TICK_RATE,
            bounds: Bounds::default(),
            spawn: SpawnConfig::default(),
            tuning: Tuning::default(),
        }
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self {
            enemy_floor_y: ENEMY_FLOOR_Y,
            enemy_ceiling_y: ENEMY_CEILING_Y,
            player_wrap_high_x: PLAYER_WRAP_X,
            player_wrap_low_x: -PLAYER_WRAP_X,
            player_reentry_low_x: -PLAYER_WRAP_ENTRY_X,
            player_reentry_high_x: PLAYER_WRAP_ENTRY_X,
            player_y_min: PLAYER_Y_MIN,
            player_y_max: PLAYER_Y_MAX,
            laser_top_y: LASER_TOP_Y,
        }
    }
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            interval_secs: SPAWN_INTERVAL_SECS,
            initial_delay_secs: SPAWN_INITIAL_DELAY_SECS,
            x_min: ENEMY_SPAWN_X_MIN,
            x_max: ENEMY_SPAWN_X_MAX,
            spawn_y: SPAWN_LINE_Y,
            clear_on_stop: true,
            active: true,
        }
    }
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            player_speed: PLAYER_SPEED,
            enemy_speed: ENEMY_SPEED,
            enemy_shudder_speed: ENEMY_SHUDDER_SPEED,
            laser_speed: LASER_SPEED,
            fire_cooldown_secs: FIRE_COOLDOWN_SECS,
            muzzle_offset: LASER_MUZZLE_OFFSET,
            volley_offsets: vec![0.0],
            kill_reward: KILL_REWARD,
            enemy_ram_grace_secs: ENEMY_RAM_GRACE_SECS,
            enemy_shot_grace_secs: ENEMY_SHOT_GRACE_SECS,
            player_death_grace_secs: PLAYER_DEATH_GRACE_SECS,
            player_start: Position::new(PLAYER_START_X, PLAYER_START_Y),
            player_half_extents: Vec2::from(PLAYER_HALF_EXTENTS),
            enemy_half_extents: Vec2::from(ENEMY_HALF_EXTENTS),
            laser_half_extents: Vec2::from(LASER_HALF_EXTENTS),
        }
    }
}

impl SimConfig {
    /// Parse a JSON config (missing fields fall back to defaults) and validate it.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Seconds per tick.
    pub fn dt(&self) -> f64 {
        1.0 / self.tick_rate.max(1) as f64
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_rate == 0 {
            return Err(ConfigError::ZeroTickRate);
        }
        self.bounds.validate()?;
        self.spawn.validate()?;
        self.tuning.validate()
    }
}

/// Reject NaN and infinities, which would otherwise reach range sampling.
fn require_finite(fields: &[(&'static str, f32)]) -> Result<(), ConfigError> {
    match fields.iter().find(|(_, value)| !value.is_finite()) {
        Some(&(name, value)) => Err(ConfigError::NonFinite {
            name,
            value: value as f64,
        }),
        None => Ok(()),
    }
}

impl Bounds {
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_finite(&[
            ("enemy_floor_y", self.enemy_floor_y),
            ("enemy_ceiling_y", self.enemy_ceiling_y),
            ("player_wrap_high_x", self.player_wrap_high_x),
            ("player_wrap_low_x", self.player_wrap_low_x),
            ("player_reentry_low_x", self.player_reentry_low_x),
            ("player_reentry_high_x", self.player_reentry_high_x),
            ("player_y_min", self.player_y_min),
            ("player_y_max", self.player_y_max),
            ("laser_top_y", self.laser_top_y),
        ])?;
        if self.player_y_min > self.player_y_max {
            return Err(ConfigError::InvertedClampRange {
                min: self.player_y_min,
                max: self.player_y_max,
            });
        }
        if self.enemy_floor_y >= self.enemy_ceiling_y {
            return Err(ConfigError::InvertedEnemyBounds {
                floor: self.enemy_floor_y,
                ceiling: self.enemy_ceiling_y,
            });
        }
        // A re-entry point on or past the opposite limit would wrap again next tick.
        if !(self.player_reentry_low_x > self.player_wrap_low_x
            && self.player_reentry_low_x < self.player_wrap_high_x)
        {
            return Err(ConfigError::WrapEntryOutsideLimit {
                entry: self.player_reentry_low_x,
                limit: self.player_wrap_low_x,
            });
        }
        if !(self.player_reentry_high_x < self.player_wrap_high_x
            && self.player_reentry_high_x > self.player_wrap_low_x)
        {
            return Err(ConfigError::WrapEntryOutsideLimit {
                entry: self.player_reentry_high_x,
                limit: self.player_wrap_high_x,
            });
        }
        Ok(())
    }
}

impl SpawnConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.interval_secs.is_finite() && self.interval_secs > 0.0) {
            return Err(ConfigError::InvalidSpawnInterval(self.interval_secs));
        }
        if !(self.initial_delay_secs.is_finite() && self.initial_delay_secs >= 0.0) {
            return Err(ConfigError::InvalidInitialDelay(self.initial_delay_secs));
        }
        require_finite(&[
            ("x_min", self.x_min),
            ("x_max", self.x_max),
            ("spawn_y", self.spawn_y),
        ])?;
        if self.x_min > self.x_max {
            return Err(ConfigError::InvertedSpawnRange {
                min: self.x_min,
                max: self.x_max,
            });
        }
        Ok(())
    }
}

impl Tuning {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let checks: [(&'static str, f64); 7] = [
            ("player_speed", self.player_speed as f64),
            ("enemy_speed", self.enemy_speed as f64),
            ("laser_speed", self.laser_speed as f64),
            ("fire_cooldown_secs", self.fire_cooldown_secs),
            ("enemy_ram_grace_secs", self.enemy_ram_grace_secs),
            ("enemy_shot_grace_secs", self.enemy_shot_grace_secs),
            ("player_death_grace_secs", self.player_death_grace_secs),
        ];
        for (name, value) in checks {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::NonPositive { name, value });
            }
        }
        let half_extents = [
            ("player_half_extents", self.player_half_extents),
            ("enemy_half_extents", self.enemy_half_extents),
            ("laser_half_extents", self.laser_half_extents),
        ];
        for (name, extents) in half_extents {
            let smallest = extents.min_element();
            if !(extents.is_finite() && smallest > 0.0) {
                return Err(ConfigError::NonPositive {
                    name,
                    value: smallest as f64,
                });
            }
        }
        if !(self.enemy_shudder_speed.is_finite() && self.enemy_shudder_speed >= 0.0) {
            return Err(ConfigError::Negative {
                name: "enemy_shudder_speed",
                value: self.enemy_shudder_speed as f64,
            });
        }
        require_finite(&[
            ("muzzle_offset", self.muzzle_offset),
            ("player_start.x", self.player_start.x),
            ("player_start.y", self.player_start.y),
        ])?;
        if let Some(&dx) = self.volley_offsets.iter().find(|dx| !dx.is_finite()) {
            return Err(ConfigError::NonFinite {
                name: "volley_offsets",
                value: dx as f64,
            });
        }
        if self.volley_offsets.is_empty() {
            return Err(ConfigError::Malformed(
                "volley_offsets needs at least one entry".into(),
            ));
        }
        Ok(())
    }
}
