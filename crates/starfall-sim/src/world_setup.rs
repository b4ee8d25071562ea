//! Entity spawn factories.
//!
//! Creates player, enemy and laser entities with the component bundles the
//! systems expect.

use hecs::Entity;

use starfall_core::components::*;
use starfall_core::config::Tuning;
use starfall_core::enums::EntityKind;
use starfall_core::types::Position;

use crate::registry::EntityRegistry;

/// Spawn the player at its start position with weapon and engine flame.
pub fn spawn_player(registry: &mut EntityRegistry, tuning: &Tuning) -> Entity {
    let player = registry.create(EntityKind::Player, tuning.player_start);
    registry.insert(
        player,
        (
            Speed {
                units_per_sec: tuning.player_speed,
            },
            Collider::new(tuning.player_half_extents),
            FireControl::default(),
            EngineFire { lit: true },
        ),
    );
    player
}

/// Spawn an enemy heading down the screen.
pub fn spawn_enemy(registry: &mut EntityRegistry, position: Position, tuning: &Tuning) -> Entity {
    let enemy = registry.create(EntityKind::Enemy, position);
    registry.insert(
        enemy,
        (
            Speed {
                units_per_sec: tuning.enemy_speed,
            },
            Collider::new(tuning.enemy_half_extents),
        ),
    );
    enemy
}

/// Spawn a laser of `kind` (player- or enemy-fired).
pub fn spawn_laser(
    registry: &mut EntityRegistry,
    kind: EntityKind,
    position: Position,
    tuning: &Tuning,
) -> Entity {
    debug_assert!(kind.is_laser());
    let laser = registry.create(kind, position);
    registry.insert(
        laser,
        (
            Speed {
                units_per_sec: tuning.laser_speed,
            },
            Collider::new(tuning.laser_half_extents),
        ),
    );
    laser
}

/// Spawn any kind with its default bundle.
pub fn spawn_kind(
    registry: &mut EntityRegistry,
    kind: EntityKind,
    position: Position,
    tuning: &Tuning,
) -> Entity {
    match kind {
        EntityKind::Player => {
            let player = spawn_player(registry, tuning);
            registry.set_position(player, position);
            player
        }
        EntityKind::Enemy => spawn_enemy(registry, position, tuning),
        EntityKind::PlayerLaser | EntityKind::EnemyLaser => {
            spawn_laser(registry, kind, position, tuning)
        }
    }
}
