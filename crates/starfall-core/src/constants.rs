//! Simulation constants and tuning defaults.
//!
//! These are the values `SimConfig::default()` is built from. Systems read
//! the config, not these constants, so tests can tighten or loosen them.

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 60;

/// Seconds per tick.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

/// Tolerance applied when comparing game-clock timestamps.
pub const TIME_EPSILON: f64 = 1e-6;

// --- Playfield bounds ---

/// Enemies at or below this line wrap back to the top.
pub const ENEMY_FLOOR_Y: f32 = -6.5;

/// Height enemies re-enter at after wrapping.
pub const ENEMY_CEILING_Y: f32 = 6.5;

/// Player crossing x >= +11.3 (or x <= -11.3) wraps horizontally.
pub const PLAYER_WRAP_X: f32 = 11.3;

/// Where a wrapped player reappears, mirrored to the opposite side.
pub const PLAYER_WRAP_ENTRY_X: f32 = 9.2;

/// Player vertical clamp range.
pub const PLAYER_Y_MIN: f32 = -4.65;
pub const PLAYER_Y_MAX: f32 = 4.68;

/// Player lasers at or above this line are removed.
pub const LASER_TOP_Y: f32 = 7.0;

// --- Spawning ---

/// Seconds between enemy spawns.
pub const SPAWN_INTERVAL_SECS: f64 = 1.5;

/// Delay before the first spawn of a session.
pub const SPAWN_INITIAL_DELAY_SECS: f64 = 1.0;

/// Horizontal spawn range (also used when enemies wrap).
pub const ENEMY_SPAWN_X_MIN: f32 = -9.1;
pub const ENEMY_SPAWN_X_MAX: f32 = 9.1;

/// Vertical spawn line.
pub const SPAWN_LINE_Y: f32 = 6.5;

// --- Speeds (units/sec) ---

pub const PLAYER_SPEED: f32 = 5.2;
pub const ENEMY_SPEED: f32 = 3.0;

/// Speed of an enemy whose destruction sequence has started.
pub const ENEMY_SHUDDER_SPEED: f32 = 0.2;

pub const LASER_SPEED: f32 = 5.0;

// --- Player weapon ---

/// Minimum time between two shots.
pub const FIRE_COOLDOWN_SECS: f64 = 0.25;

/// Lasers appear this far above the player.
pub const LASER_MUZZLE_OFFSET: f32 = 1.0;

/// Starting position of the player.
pub const PLAYER_START_X: f32 = 0.0;
pub const PLAYER_START_Y: f32 = -3.0;

// --- Scoring and teardown ---

/// Points awarded for shooting down an enemy.
pub const KILL_REWARD: u32 = 10;

/// Grace delay before an enemy that rammed the player is removed.
pub const ENEMY_RAM_GRACE_SECS: f64 = 2.5;

/// Grace delay before a shot-down enemy is removed.
pub const ENEMY_SHOT_GRACE_SECS: f64 = 2.0;

/// Grace delay before a dead player is removed.
pub const PLAYER_DEATH_GRACE_SECS: f64 = 1.5;

// --- Collider half extents ---

pub const PLAYER_HALF_EXTENTS: [f32; 2] = [0.5, 0.4];
pub const ENEMY_HALF_EXTENTS: [f32; 2] = [0.5, 0.45];
pub const LASER_HALF_EXTENTS: [f32; 2] = [0.06, 0.3];
