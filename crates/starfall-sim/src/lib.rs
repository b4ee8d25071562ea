//! Simulation engine for STARFALL.
//!
//! Owns the hecs-backed entity registry, runs systems in a fixed order each
//! tick, and produces `GameStateSnapshot`s. Rendering, audio, UI and session
//! handling are reached only through the sink traits in [`sinks`].

pub mod deferred;
pub mod engine;
pub mod game_state;
pub mod registry;
pub mod sinks;
pub mod systems;
pub mod world_setup;

pub use engine::SimulationEngine;
pub use hecs::Entity;
pub use starfall_core as core;

#[cfg(test)]
mod tests;
