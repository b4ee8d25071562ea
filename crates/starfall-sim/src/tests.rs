//! Tests for the simulation engine: collisions, scoring, spawning, restart.

use starfall_core::config::SimConfig;
use starfall_core::enums::*;
use starfall_core::error::ConfigError;
use starfall_core::events::SinkEvent;
use starfall_core::input::InputSnapshot;
use starfall_core::types::Position;

use crate::engine::SimulationEngine;
use crate::sinks::{RecordingSink, Sinks};
use crate::systems::collision::{CollisionRule, CollisionRules};

fn quiet_config() -> SimConfig {
    let mut config = SimConfig::default();
    config.spawn.active = false;
    config
}

fn recorded(config: SimConfig) -> (SimulationEngine, RecordingSink) {
    let (sinks, recorder) = Sinks::recording();
    let engine = SimulationEngine::with_sinks(config, sinks).unwrap();
    (engine, recorder)
}

fn idle(engine: &mut SimulationEngine, ticks: usize) {
    for _ in 0..ticks {
        engine.tick(&InputSnapshot::default());
    }
}

// ---- Determinism ----

#[test]
fn test_determinism_same_seed() {
    let config = SimConfig {
        seed: 12345,
        ..Default::default()
    };
    let mut engine_a = SimulationEngine::new(config.clone()).unwrap();
    let mut engine_b = SimulationEngine::new(config).unwrap();

    for i in 0..600 {
        let input = InputSnapshot {
            horizontal: if i % 120 < 60 { 1.0 } else { -1.0 },
            fire_pressed: i % 10 == 0,
            ..Default::default()
        };
        let json_a = serde_json::to_string(&engine_a.tick(&input)).unwrap();
        let json_b = serde_json::to_string(&engine_b.tick(&input)).unwrap();
        assert_eq!(json_a, json_b, "Snapshots diverged with same seed");
    }
}

#[test]
fn test_determinism_different_seeds() {
    let mut engine_a = SimulationEngine::new(SimConfig {
        seed: 111,
        ..Default::default()
    })
    .unwrap();
    let mut engine_b = SimulationEngine::new(SimConfig {
        seed: 222,
        ..Default::default()
    })
    .unwrap();

    // Nothing random happens before the first spawn at t = 1.0.
    let mut diverged = false;
    for _ in 0..300 {
        let json_a = serde_json::to_string(&engine_a.tick(&InputSnapshot::default())).unwrap();
        let json_b = serde_json::to_string(&engine_b.tick(&InputSnapshot::default())).unwrap();
        if json_a != json_b {
            diverged = true;
            break;
        }
    }
    assert!(diverged, "Different seeds should produce divergent output");
}

// ---- Session setup ----

#[test]
fn test_first_tick_spawns_player_and_shows_ui() {
    let (mut engine, recorder) = recorded(SimConfig::default());
    let snap = engine.tick(&InputSnapshot::default());

    let player = snap.player.expect("player spawned on first tick");
    assert_eq!(player.position, Position::new(0.0, -3.0));
    assert!(player.engine_fire);
    assert!(!player.dying);
    assert_eq!(snap.phase, GamePhase::Playing);
    assert!(snap.spawner_active);
    assert_eq!(
        recorder.events(),
        vec![
            SinkEvent::Score { total: 0 },
            SinkEvent::GameOver { visible: false }
        ]
    );
}

#[test]
fn test_invalid_config_rejected() {
    let mut config = SimConfig::default();
    config.spawn.interval_secs = 0.0;
    assert!(matches!(
        SimulationEngine::new(config),
        Err(ConfigError::InvalidSpawnInterval(_))
    ));
}

#[test]
fn test_non_finite_spawn_range_rejected_before_ticking() {
    let mut config = SimConfig::default();
    config.spawn.x_min = f32::NAN;
    assert!(matches!(
        SimulationEngine::new(config),
        Err(ConfigError::NonFinite { name: "x_min", .. })
    ));
}

// ---- Player movement ----

#[test]
fn test_player_steers_and_clamps() {
    let mut engine = SimulationEngine::new(quiet_config()).unwrap();
    engine.tick(&InputSnapshot::default());

    for _ in 0..600 {
        engine.tick(&InputSnapshot::steer(0.0, 1.0));
    }
    let player = engine.snapshot().player.unwrap();
    assert!((player.position.y - 4.68).abs() < 1e-4);
    assert!(player.position.x.abs() < 1e-4);
}

#[test]
fn test_player_wraps_horizontally() {
    let mut engine = SimulationEngine::new(quiet_config()).unwrap();
    engine.tick(&InputSnapshot::default());

    // 11.3 units at 5.2 u/s is ~130 ticks; stop right after the wrap.
    let mut wrapped = false;
    for _ in 0..200 {
        let snap = engine.tick(&InputSnapshot::steer(1.0, 0.0));
        if snap.player.unwrap().position.x < 0.0 {
            wrapped = true;
            assert!((snap.player.unwrap().position.x + 9.2).abs() < 1e-4);
            break;
        }
    }
    assert!(wrapped, "player never wrapped");
}

// ---- Weapon ----

#[test]
fn test_fire_cooldown_and_laser_expiry() {
    let (mut engine, recorder) = recorded(quiet_config());
    engine.tick(&InputSnapshot::default());

    // Holding fire for half a second fits exactly two shots.
    for _ in 0..30 {
        engine.tick(&InputSnapshot::fire());
    }
    let shots = recorder.count(|e| *e == SinkEvent::Laser);
    assert_eq!(shots, 2);
    assert_eq!(engine.registry().count(EntityKind::PlayerLaser), 2);

    // From y = -2 to the top line at 7 takes 1.8 s.
    idle(&mut engine, 120);
    assert_eq!(engine.registry().count(EntityKind::PlayerLaser), 0);
}

// ---- Laser vs enemy ----

#[test]
fn test_laser_kill_scores_once() {
    let (mut engine, recorder) = recorded(quiet_config());
    engine.tick(&InputSnapshot::default());
    let enemy = engine.spawn_entity(EntityKind::Enemy, Position::new(0.0, -1.0));

    engine.tick(&InputSnapshot::fire());
    idle(&mut engine, 10);

    assert_eq!(engine.score(), 10);
    assert_eq!(engine.kills(), 1);
    let record = engine.registry().get(enemy).expect("still dying, not removed");
    assert!(record.is_dying());
    assert_eq!(record.speed, Some(0.2));
    assert_eq!(recorder.count(|e| *e == SinkEvent::Score { total: 10 }), 1);
    assert_eq!(
        recorder.count(|e| matches!(e, SinkEvent::DestructionEffect { .. })),
        1
    );
    assert_eq!(recorder.count(|e| *e == SinkEvent::Explosion), 1);

    // A second laser passes through the dying enemy without scoring.
    idle(&mut engine, 10);
    engine.tick(&InputSnapshot::fire());
    assert_eq!(recorder.count(|e| *e == SinkEvent::Laser), 2);
    idle(&mut engine, 30);
    assert_eq!(engine.score(), 10);
    assert_eq!(engine.kills(), 1);
    assert_eq!(recorder.count(|e| *e == SinkEvent::Explosion), 1);
}

#[test]
fn test_shot_enemy_removed_after_grace() {
    let (mut engine, _recorder) = recorded(quiet_config());
    engine.tick(&InputSnapshot::default());
    let enemy = engine.spawn_entity(EntityKind::Enemy, Position::new(0.0, -1.0));

    engine.tick(&InputSnapshot::fire());
    idle(&mut engine, 5);
    assert!(engine.registry().is_alive(enemy));

    // Shot grace is 2.0 s.
    idle(&mut engine, 110);
    assert!(engine.registry().is_alive(enemy));
    idle(&mut engine, 20);
    assert!(!engine.registry().is_alive(enemy));
    assert!(engine.deferred().is_empty());
}

#[test]
fn test_shot_enemy_removed_immediately_without_presentation() {
    let mut engine = SimulationEngine::new(quiet_config()).unwrap();
    engine.tick(&InputSnapshot::default());
    let enemy = engine.spawn_entity(EntityKind::Enemy, Position::new(0.0, -1.0));

    engine.tick(&InputSnapshot::fire());
    idle(&mut engine, 10);

    assert_eq!(engine.score(), 10);
    assert!(!engine.registry().is_alive(enemy));
    assert_eq!(engine.registry().count(EntityKind::PlayerLaser), 0);
    assert!(engine.deferred().is_empty());
}

#[test]
fn test_laser_over_two_enemies_kills_one() {
    let (mut engine, recorder) = recorded(quiet_config());
    engine.tick(&InputSnapshot::default());
    let laser = engine.spawn_entity(EntityKind::PlayerLaser, Position::new(0.0, 0.5));
    engine.spawn_entity(EntityKind::Enemy, Position::new(-0.1, 0.5));
    engine.spawn_entity(EntityKind::Enemy, Position::new(0.1, 0.5));

    let snap = engine.tick(&InputSnapshot::default());

    assert_eq!(snap.score, 10);
    assert_eq!(engine.kills(), 1);
    assert!(!engine.registry().is_alive(laser));
    let enemies: Vec<_> = snap
        .entities
        .iter()
        .filter(|e| e.kind == EntityKind::Enemy)
        .collect();
    assert_eq!(enemies.len(), 2);
    assert_eq!(enemies.iter().filter(|e| e.dying).count(), 1);
    assert_eq!(recorder.count(|e| *e == SinkEvent::Explosion), 1);
}

#[test]
fn test_volley_hit_removes_container_and_siblings() {
    let mut config = quiet_config();
    config.tuning.volley_offsets = vec![-0.4, 0.0, 0.4];
    let (mut engine, _recorder) = recorded(config);
    engine.tick(&InputSnapshot::default());
    // Only the right-hand laser (x = 0.4) lines up with this enemy.
    let enemy = engine.spawn_entity(EntityKind::Enemy, Position::new(0.9, -1.0));

    engine.tick(&InputSnapshot::fire());
    assert_eq!(engine.registry().count(EntityKind::PlayerLaser), 3);
    // Player, enemy, three lasers and their container.
    assert_eq!(engine.registry().len(), 6);

    idle(&mut engine, 10);
    assert_eq!(engine.score(), 10);
    assert!(engine.registry().get(enemy).unwrap().is_dying());
    assert_eq!(engine.registry().count(EntityKind::PlayerLaser), 0);
    assert_eq!(engine.registry().len(), 2);
}

#[test]
fn test_collision_rules_can_be_replaced() {
    let mut engine = SimulationEngine::new(quiet_config()).unwrap();
    engine.set_collision_rules(CollisionRules::empty().with(
        EntityKind::PlayerLaser,
        EntityKind::Enemy,
        CollisionRule::LaserHitsEnemy,
    ));
    engine.tick(&InputSnapshot::default());

    // Ramming is no longer a rule: the enemy passes through the player.
    engine.spawn_entity(EntityKind::Enemy, Position::new(0.0, -3.0));
    idle(&mut engine, 5);
    assert_eq!(engine.phase(), GamePhase::Playing);

    let target = engine.spawn_entity(EntityKind::Enemy, Position::new(3.0, 1.0));
    engine.spawn_entity(EntityKind::PlayerLaser, Position::new(3.0, 0.5));
    engine.tick(&InputSnapshot::default());
    assert_eq!(engine.score(), 10);
    assert!(!engine.registry().is_alive(target));
}

// ---- Player death ----

#[test]
fn test_player_overlapping_several_enemies_dies_once() {
    let (mut engine, recorder) = recorded(SimConfig::default());
    engine.tick(&InputSnapshot::default());
    for dx in [-0.2, 0.0, 0.2] {
        engine.spawn_entity(EntityKind::Enemy, Position::new(dx, -2.8));
    }

    let snap = engine.tick(&InputSnapshot::default());

    assert_eq!(snap.phase, GamePhase::GameOver);
    assert!(snap.player.unwrap().dying);
    assert!(!snap.player.unwrap().engine_fire);
    assert!(!snap.spawner_active);
    assert_eq!(engine.spawner().stop_calls(), 1);
    assert_eq!(
        recorder.count(|e| matches!(e, SinkEvent::DamageEffect { .. })),
        1
    );
    assert_eq!(
        recorder.count(|e| *e == SinkEvent::GameOver { visible: true }),
        1
    );
    // One rammed enemy, one player.
    assert_eq!(recorder.count(|e| *e == SinkEvent::Explosion), 2);
    let dying_enemies = snap
        .entities
        .iter()
        .filter(|e| e.kind == EntityKind::Enemy && e.dying)
        .count();
    assert_eq!(dying_enemies, 1);

    idle(&mut engine, 30);
    assert_eq!(engine.spawner().stop_calls(), 1);
    assert_eq!(
        recorder.count(|e| *e == SinkEvent::GameOver { visible: true }),
        1
    );
}

#[test]
fn test_player_removed_after_death_grace() {
    let mut engine = SimulationEngine::new(quiet_config()).unwrap();
    engine.tick(&InputSnapshot::default());
    engine.spawn_entity(EntityKind::Enemy, Position::new(0.0, -3.0));
    engine.tick(&InputSnapshot::default());
    assert_eq!(engine.phase(), GamePhase::GameOver);
    assert!(engine.player().is_some());

    // Death grace is 1.5 s.
    idle(&mut engine, 95);
    assert!(engine.player().is_none());
    assert!(engine.snapshot().player.is_none());
}

#[test]
fn test_enemy_laser_kills_player() {
    let (mut engine, recorder) = recorded(quiet_config());
    engine.tick(&InputSnapshot::default());
    engine.spawn_entity(EntityKind::EnemyLaser, Position::new(0.0, -2.0));

    idle(&mut engine, 10);
    assert_eq!(engine.phase(), GamePhase::GameOver);
    assert_eq!(engine.registry().count(EntityKind::EnemyLaser), 0);
    assert_eq!(
        recorder.count(|e| *e == SinkEvent::GameOver { visible: true }),
        1
    );
}

#[test]
fn test_input_ignored_after_game_over() {
    let (mut engine, recorder) = recorded(quiet_config());
    engine.tick(&InputSnapshot::default());
    engine.spawn_entity(EntityKind::Enemy, Position::new(0.0, -3.0));
    engine.tick(&InputSnapshot::default());
    let before = engine.snapshot().player.unwrap().position;
    let lasers_before = recorder.count(|e| *e == SinkEvent::Laser);

    engine.tick(&InputSnapshot {
        horizontal: 1.0,
        fire_pressed: true,
        ..Default::default()
    });

    assert_eq!(engine.snapshot().player.unwrap().position, before);
    assert_eq!(recorder.count(|e| *e == SinkEvent::Laser), lasers_before);
}

#[test]
fn test_game_over_clears_spawned_enemies() {
    let mut config = SimConfig::default();
    config.spawn.x_min = 5.0;
    config.spawn.x_max = 9.0;
    let mut engine = SimulationEngine::new(config).unwrap();
    idle(&mut engine, 200);
    assert!(engine.registry().count(EntityKind::Enemy) >= 2);

    let rammer = engine.spawn_entity(EntityKind::Enemy, Position::new(0.0, -3.0));
    engine.tick(&InputSnapshot::default());

    let enemies = engine.registry().alive(Some(EntityKind::Enemy));
    assert_eq!(enemies, vec![rammer]);
}

// ---- Spawning ----

#[test]
fn test_seven_spawns_in_ten_seconds() {
    let mut config = SimConfig::default();
    config.spawn.x_min = 5.0;
    config.spawn.x_max = 9.0;
    let mut engine = SimulationEngine::new(config).unwrap();

    idle(&mut engine, 600);
    assert_eq!(engine.spawner().spawned_total(), 7);
    assert_eq!(engine.phase(), GamePhase::Playing);
    for enemy in engine.registry().alive(Some(EntityKind::Enemy)) {
        let x = engine.registry().position(enemy).unwrap().x;
        assert!((5.0..=9.0).contains(&x));
    }
}

#[test]
fn test_long_step_spawns_once() {
    let mut engine = SimulationEngine::new(SimConfig::default()).unwrap();
    engine.step(5.0, &InputSnapshot::default());
    assert_eq!(engine.spawner().spawned_total(), 1);
    assert!((engine.spawner().next_spawn_at() - 6.5).abs() < 1e-9);
}

// ---- Restart & exit ----

#[test]
fn test_restart_resets_session() {
    let (mut engine, recorder) = recorded(SimConfig::default());
    engine.tick(&InputSnapshot::default());
    let enemy = engine.spawn_entity(EntityKind::Enemy, Position::new(0.0, -1.0));
    engine.tick(&InputSnapshot::fire());
    idle(&mut engine, 10);
    assert_eq!(engine.score(), 10);
    assert!(engine.registry().get(enemy).is_some());

    engine.spawn_entity(EntityKind::Enemy, Position::new(0.0, -3.0));
    idle(&mut engine, 2);
    assert_eq!(engine.phase(), GamePhase::GameOver);

    engine.restart();
    assert_eq!(engine.score(), 0);
    assert_eq!(engine.kills(), 0);
    assert_eq!(engine.phase(), GamePhase::Playing);
    assert!(engine.spawner().is_active());
    assert!(engine.registry().is_empty());
    assert!(engine.deferred().is_empty());
    assert_eq!(engine.time().tick, 0);

    recorder.drain();
    let snap = engine.tick(&InputSnapshot::default());
    assert!(snap.player.is_some());
    assert_eq!(snap.entities.len(), 1);
    assert_eq!(
        recorder.events(),
        vec![
            SinkEvent::Score { total: 0 },
            SinkEvent::GameOver { visible: false }
        ]
    );
}

#[test]
fn test_restart_input_requests_restart() {
    let (mut engine, recorder) = recorded(SimConfig::default());
    engine.tick(&InputSnapshot::default());
    engine.spawn_entity(EntityKind::Enemy, Position::new(0.0, -3.0));
    engine.tick(&InputSnapshot::default());
    assert_eq!(engine.phase(), GamePhase::GameOver);

    let snap = engine.tick(&InputSnapshot::restart());
    assert_eq!(snap.phase, GamePhase::Playing);
    assert_eq!(snap.score, 0);
    assert!(snap.spawner_active);
    assert!(!snap.player.unwrap().dying);
    assert_eq!(recorder.count(|e| *e == SinkEvent::RestartRequested), 1);
}

#[test]
fn test_exit_input_requests_exit_once() {
    let (mut engine, recorder) = recorded(quiet_config());
    engine.tick(&InputSnapshot::default());
    let exit = InputSnapshot {
        exit_pressed: true,
        ..Default::default()
    };
    engine.tick(&exit);
    engine.tick(&exit);

    assert!(engine.exit_requested());
    assert_eq!(recorder.count(|e| *e == SinkEvent::ExitRequested), 1);
    assert_eq!(engine.time().tick, 3);
}

#[test]
fn test_destroy_is_deferred_to_end_of_tick() {
    let mut engine = SimulationEngine::new(quiet_config()).unwrap();
    engine.tick(&InputSnapshot::default());
    let enemy = engine.spawn_entity(EntityKind::Enemy, Position::new(4.0, 2.0));

    let registry = engine.registry_mut();
    assert!(registry.destroy(enemy));
    assert!(!registry.is_alive(enemy));
    assert_eq!(registry.pending_removals(), 1);

    engine.tick(&InputSnapshot::default());
    assert_eq!(engine.registry().pending_removals(), 0);
    assert_eq!(engine.registry().count(EntityKind::Enemy), 0);
}
