//! Player weapon and player death sequence.

use glam::Vec2;
use hecs::Entity;

use starfall_core::components::{Collider, EngineFire, FireControl};
use starfall_core::config::Tuning;
use starfall_core::enums::EntityKind;

use crate::registry::EntityRegistry;
use crate::sinks::Sinks;
use crate::systems::EffectContext;
use crate::world_setup;

/// Fire one volley if the weapon is ready. Returns the lasers spawned.
///
/// A dying or removed player never fires. With more than one volley offset
/// the lasers share a container, so losing one loses the whole volley.
pub fn fire(
    registry: &mut EntityRegistry,
    player: Entity,
    now: f64,
    tuning: &Tuning,
    sinks: &mut Sinks,
) -> Vec<Entity> {
    let Some(record) = registry.get(player) else {
        return Vec::new();
    };
    if record.is_dying() {
        return Vec::new();
    }
    let Some(weapon) = registry.component::<FireControl>(player) else {
        return Vec::new();
    };
    if now <= weapon.ready_at_secs {
        return Vec::new();
    }

    let muzzle = record.position.offset(Vec2::new(0.0, tuning.muzzle_offset));
    let container = if tuning.volley_offsets.len() > 1 {
        Some(registry.create_container(muzzle))
    } else {
        None
    };

    let lasers: Vec<Entity> = tuning
        .volley_offsets
        .iter()
        .map(|&dx| {
            let laser = world_setup::spawn_laser(
                registry,
                EntityKind::PlayerLaser,
                muzzle.offset(Vec2::new(dx, 0.0)),
                tuning,
            );
            if let Some(group) = container {
                registry.attach(laser, group);
            }
            laser
        })
        .collect();

    registry.update::<FireControl, _>(player, |w| {
        w.ready_at_secs = now + tuning.fire_cooldown_secs;
    });
    sinks.laser();
    lasers
}

/// Start the player's death sequence. Runs at most once per player.
///
/// The collider goes off first, so no later overlap can re-enter. Then the
/// damage effect and explosion play, the engine flame goes out, the state
/// machine hears about the death, and removal is scheduled after the grace
/// delay. Returns false if the player was already dying or is gone.
pub fn begin_death(player: Entity, ctx: &mut EffectContext<'_>) -> bool {
    let claimed = ctx
        .registry
        .update::<Collider, _>(player, |c| std::mem::replace(&mut c.enabled, false))
        .unwrap_or(false);
    if !claimed {
        log::debug!("player {player:?} already dying or gone");
        return false;
    }

    ctx.sinks.damage_effect(player);
    ctx.sinks.explosion();
    ctx.registry.update::<EngineFire, _>(player, |f| f.lit = false);
    ctx.state.on_player_died(ctx.spawner, ctx.registry, ctx.sinks);
    ctx.deferred
        .schedule_despawn(player, ctx.now, ctx.tuning.player_death_grace_secs);
    log::info!("player {player:?} destroyed");
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use starfall_core::config::SpawnConfig;
    use starfall_core::events::SinkEvent;
    use starfall_core::types::Position;

    use crate::deferred::{DeferredAction, DeferredQueue};
    use crate::game_state::{GameStateMachine, ScoreKeeper};
    use crate::systems::spawn_scheduler::SpawnScheduler;

    #[test]
    fn test_fire_respects_cooldown() {
        let (mut sinks, recorder) = Sinks::recording();
        let mut registry = EntityRegistry::new();
        let tuning = Tuning::default();
        let player = world_setup::spawn_player(&mut registry, &tuning);

        let shot = fire(&mut registry, player, 0.1, &tuning, &mut sinks);
        assert_eq!(shot.len(), 1);
        let pos = registry.position(shot[0]).unwrap();
        assert_eq!(pos, Position::new(0.0, -2.0));

        assert!(fire(&mut registry, player, 0.3, &tuning, &mut sinks).is_empty());
        assert_eq!(fire(&mut registry, player, 0.36, &tuning, &mut sinks).len(), 1);
        assert_eq!(recorder.count(|e| *e == SinkEvent::Laser), 2);
    }

    #[test]
    fn test_volley_shares_container() {
        let mut sinks = Sinks::none();
        let mut registry = EntityRegistry::new();
        let tuning = Tuning {
            volley_offsets: vec![-0.4, 0.0, 0.4],
            ..Default::default()
        };
        let player = world_setup::spawn_player(&mut registry, &tuning);

        let shot = fire(&mut registry, player, 1.0, &tuning, &mut sinks);
        assert_eq!(shot.len(), 3);
        let group = registry.parent_of(shot[0]).unwrap();
        assert!(shot.iter().all(|&l| registry.parent_of(l) == Some(group)));
    }

    #[test]
    fn test_death_sequence_runs_once() {
        let (mut sinks, recorder) = Sinks::recording();
        let mut registry = EntityRegistry::new();
        let tuning = Tuning::default();
        let mut state = GameStateMachine::new();
        let mut score = ScoreKeeper::new(tuning.kill_reward);
        let mut spawner = SpawnScheduler::new(SpawnConfig::default(), 0.0).unwrap();
        let mut deferred = DeferredQueue::new();
        let player = world_setup::spawn_player(&mut registry, &tuning);

        let mut ctx = EffectContext {
            registry: &mut registry,
            state: &mut state,
            score: &mut score,
            spawner: &mut spawner,
            deferred: &mut deferred,
            sinks: &mut sinks,
            tuning: &tuning,
            now: 3.0,
        };
        assert!(begin_death(player, &mut ctx));
        assert!(!begin_death(player, &mut ctx));

        assert!(!state.is_playing());
        assert_eq!(spawner.stop_calls(), 1);
        assert!(deferred.is_scheduled(DeferredAction::Despawn(player)));
        assert_eq!(registry.component::<EngineFire>(player), Some(EngineFire { lit: false }));
        assert!(registry.get(player).unwrap().is_dying());
        assert_eq!(
            recorder.count(|e| matches!(e, SinkEvent::DamageEffect { .. })),
            1
        );

        // A dying player cannot shoot.
        assert!(fire(&mut registry, player, 10.0, &tuning, &mut Sinks::none()).is_empty());
    }
}
