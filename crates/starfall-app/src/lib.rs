//! STARFALL host application.
//!
//! Runs the simulation on its own thread at the configured tick rate, feeds
//! it sampled input over a channel, and reports sink notifications through
//! the `log` facade.

pub mod control;
pub mod error;
pub mod game_loop;
pub mod sinks;
pub mod state;

pub use starfall_core as core;
