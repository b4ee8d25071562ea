//! Movement system.
//!
//! Advances every live entity once per tick by its per-kind rule:
//! - Player: steered by input, y clamped, x wrapped to the opposite side.
//! - Enemy: falls; past the floor it re-enters at the top at a random x.
//! - PlayerLaser: rises; past the top line it is destroyed.
//! - EnemyLaser: falls; past the floor it is destroyed.
//!
//! Speeds are read fresh from `Speed` each tick, so a dying enemy with its
//! shudder speed simply crawls.

use glam::Vec2;
use hecs::Entity;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use starfall_core::components::Speed;
use starfall_core::config::{Bounds, SpawnConfig};
use starfall_core::enums::EntityKind;
use starfall_core::types::Position;

use crate::registry::{Doomed, EntityRegistry};

/// Run movement for all live entities with a `Speed`.
///
/// `axis` is the already-gated player input; pass `Vec2::ZERO` to freeze it.
pub fn run(
    registry: &mut EntityRegistry,
    rng: &mut ChaCha8Rng,
    axis: Vec2,
    bounds: &Bounds,
    spawn: &SpawnConfig,
    dt: f32,
) {
    let mut expired: Vec<Entity> = Vec::new();

    for (entity, (kind, pos, speed, doomed)) in registry
        .world_mut()
        .query_mut::<(&EntityKind, &mut Position, &Speed, Option<&Doomed>)>()
    {
        if doomed.is_some() {
            continue;
        }
        let distance = speed.units_per_sec * dt;
        match *kind {
            EntityKind::Player => *pos = step_player(*pos, axis, distance, bounds),
            EntityKind::Enemy => *pos = step_enemy(*pos, distance, bounds, spawn, rng),
            EntityKind::PlayerLaser => {
                pos.y += distance;
                if pos.y >= bounds.laser_top_y {
                    expired.push(entity);
                }
            }
            EntityKind::EnemyLaser => {
                pos.y -= distance;
                if pos.y <= bounds.enemy_floor_y {
                    expired.push(entity);
                }
            }
        }
    }

    for laser in expired {
        registry.destroy_with_parent(laser);
    }
}

/// One player step: move by `axis * distance`, clamp y, then wrap x.
pub fn step_player(pos: Position, axis: Vec2, distance: f32, bounds: &Bounds) -> Position {
    let mut next = pos.as_vec2() + axis * distance;
    next.y = next.y.clamp(bounds.player_y_min, bounds.player_y_max);
    if next.x >= bounds.player_wrap_high_x {
        next.x = bounds.player_reentry_low_x;
    } else if next.x <= bounds.player_wrap_low_x {
        next.x = bounds.player_reentry_high_x;
    }
    Position::from(next)
}

/// One enemy step: fall by `distance`; at or below the floor, re-enter at the
/// ceiling with a fresh random x. The enemy keeps its identity.
pub fn step_enemy<R: Rng>(
    pos: Position,
    distance: f32,
    bounds: &Bounds,
    spawn: &SpawnConfig,
    rng: &mut R,
) -> Position {
    let y = pos.y - distance;
    if y <= bounds.enemy_floor_y {
        Position::new(
            rng.gen_range(spawn.x_min..=spawn.x_max),
            bounds.enemy_ceiling_y,
        )
    } else {
        Position::new(pos.x, y)
    }
}
