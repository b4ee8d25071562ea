//! Core types and definitions for the STARFALL simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! components, input snapshots, sink events, state snapshots, configuration,
//! and constants. It has no dependency on the ECS or any runtime framework.

pub mod components;
pub mod config;
pub mod constants;
pub mod enums;
pub mod error;
pub mod events;
pub mod input;
pub mod state;
pub mod types;
