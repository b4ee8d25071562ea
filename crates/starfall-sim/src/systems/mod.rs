//! Systems that operate on the simulation each tick.
//!
//! Systems are plain functions over the registry plus whatever session state
//! they touch. They hold no state of their own, except the spawn scheduler,
//! which owns its cadence.

pub mod cleanup;
pub mod collision;
pub mod movement;
pub mod player;
pub mod snapshot;
pub mod spawn_scheduler;

use starfall_core::config::Tuning;

use crate::deferred::DeferredQueue;
use crate::game_state::{GameStateMachine, ScoreKeeper};
use crate::registry::EntityRegistry;
use crate::sinks::Sinks;
use spawn_scheduler::SpawnScheduler;

/// Everything a collision outcome or destruction sequence may touch.
pub struct EffectContext<'a> {
    pub registry: &'a mut EntityRegistry,
    pub state: &'a mut GameStateMachine,
    pub score: &'a mut ScoreKeeper,
    pub spawner: &'a mut SpawnScheduler,
    pub deferred: &'a mut DeferredQueue,
    pub sinks: &'a mut Sinks,
    pub tuning: &'a Tuning,
    /// Game-clock time of the current tick.
    pub now: f64,
}
