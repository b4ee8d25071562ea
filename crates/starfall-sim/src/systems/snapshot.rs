//! Snapshot builder. Produces the `GameStateSnapshot` returned each tick.

use hecs::Entity;

use starfall_core::components::EngineFire;
use starfall_core::state::{EntityView, GameStateSnapshot, PlayerView};
use starfall_core::types::SimTime;

use crate::game_state::{GameStateMachine, ScoreKeeper};
use crate::registry::EntityRegistry;
use crate::systems::spawn_scheduler::SpawnScheduler;

/// Build a snapshot of the current simulation state.
pub fn build_snapshot(
    registry: &EntityRegistry,
    time: &SimTime,
    state: &GameStateMachine,
    score: &ScoreKeeper,
    spawner: &SpawnScheduler,
    player: Option<Entity>,
) -> GameStateSnapshot {
    let entities = registry
        .alive(None)
        .into_iter()
        .filter_map(|e| registry.get(e))
        .map(|record| EntityView {
            id: record.id.to_bits().get(),
            kind: record.kind,
            position: record.position,
            dying: record.is_dying(),
        })
        .collect();

    let player = player.and_then(|p| registry.get(p)).map(|record| PlayerView {
        id: record.id.to_bits().get(),
        position: record.position,
        dying: record.is_dying(),
        engine_fire: registry
            .component::<EngineFire>(record.id)
            .map_or(false, |f| f.lit),
    });

    GameStateSnapshot {
        time: *time,
        phase: state.phase(),
        score: state.score(),
        kills: score.kills(),
        spawner_active: spawner.is_active(),
        player,
        entities,
    }
}
