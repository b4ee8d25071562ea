//! Configuration errors.
//!
//! Nothing at runtime is fatal; only a bad config is rejected, and it is
//! rejected up front.

use thiserror::Error;

/// Why a `SimConfig` was refused.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("spawn interval must be positive and finite, got {0}")]
    InvalidSpawnInterval(f64),

    #[error("spawn initial delay must be non-negative and finite, got {0}")]
    InvalidInitialDelay(f64),

    #[error("spawn range is inverted: min {min} > max {max}")]
    InvertedSpawnRange { min: f32, max: f32 },

    #[error("tick rate must be positive")]
    ZeroTickRate,

    #[error("player clamp range is inverted: min {min} > max {max}")]
    InvertedClampRange { min: f32, max: f32 },

    #[error("enemy floor {floor} must lie below enemy ceiling {ceiling}")]
    InvertedEnemyBounds { floor: f32, ceiling: f32 },

    #[error("wrap entry {entry} must lie strictly inside wrap limit {limit}")]
    WrapEntryOutsideLimit { entry: f32, limit: f32 },

    #[error("{name} must be finite, got {value}")]
    NonFinite { name: &'static str, value: f64 },

    #[error("{name} must be non-negative and finite, got {value}")]
    Negative { name: &'static str, value: f64 },

    #[error("{name} must be positive and finite, got {value}")]
    NonPositive { name: &'static str, value: f64 },

    #[error("malformed config: {0}")]
    Malformed(String),
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Malformed(err.to_string())
    }
}
