//! Enemy spawn scheduler: one enemy per interval while active.
//!
//! Cadence is measured on the game clock, not in ticks, so frame-rate changes
//! do not change how often enemies appear.

use hecs::Entity;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use starfall_core::components::SpawnedEnemy;
use starfall_core::config::{SpawnConfig, Tuning};
use starfall_core::constants::TIME_EPSILON;
use starfall_core::enums::EntityKind;
use starfall_core::error::ConfigError;
use starfall_core::types::Position;

use crate::registry::EntityRegistry;
use crate::world_setup;

#[derive(Debug, Clone)]
pub struct SpawnScheduler {
    config: SpawnConfig,
    /// Game-clock time of the next spawn.
    next_spawn_at: f64,
    last_spawn_at: Option<f64>,
    spawned_total: u32,
    stop_calls: u32,
}

impl SpawnScheduler {
    /// Build a scheduler whose first spawn lands `initial_delay_secs` after `now`.
    pub fn new(config: SpawnConfig, now: f64) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::armed(config, now))
    }

    /// Same as `new` for a config that was already validated.
    pub(crate) fn armed(config: SpawnConfig, now: f64) -> Self {
        Self {
            next_spawn_at: now + config.initial_delay_secs,
            config,
            last_spawn_at: None,
            spawned_total: 0,
            stop_calls: 0,
        }
    }

    pub fn is_active(&self) -> bool {
        self.config.active
    }

    pub fn config(&self) -> &SpawnConfig {
        &self.config
    }

    pub fn next_spawn_at(&self) -> f64 {
        self.next_spawn_at
    }

    pub fn last_spawn_at(&self) -> Option<f64> {
        self.last_spawn_at
    }

    pub fn spawned_total(&self) -> u32 {
        self.spawned_total
    }

    /// How many times `stop` has been called, effective or not.
    pub fn stop_calls(&self) -> u32 {
        self.stop_calls
    }

    /// Spawn one enemy if active and the interval has elapsed.
    pub fn tick(
        &mut self,
        now: f64,
        registry: &mut EntityRegistry,
        rng: &mut ChaCha8Rng,
        tuning: &Tuning,
    ) -> Option<Entity> {
        if !self.config.active || now + TIME_EPSILON < self.next_spawn_at {
            return None;
        }

        let x = rng.gen_range(self.config.x_min..=self.config.x_max);
        let enemy = world_setup::spawn_enemy(registry, Position::new(x, self.config.spawn_y), tuning);
        registry.insert(enemy, (SpawnedEnemy,));

        self.last_spawn_at = Some(now);
        self.spawned_total += 1;
        self.next_spawn_at += self.config.interval_secs;
        if now - self.next_spawn_at >= self.config.interval_secs {
            // A full interval behind after a huge dt: re-arm, do not burst.
            self.next_spawn_at = now + self.config.interval_secs;
        }
        log::trace!("spawned enemy {enemy:?} at x={x:.2}, t={now:.3}");
        Some(enemy)
    }

    /// Stop spawning. With `clear_on_stop`, also destroys every enemy this
    /// scheduler spawned. Safe to call repeatedly. Returns how many enemies
    /// were cleared.
    pub fn stop(&mut self, registry: &mut EntityRegistry) -> usize {
        self.stop_calls += 1;
        if !self.config.active {
            log::debug!("spawn scheduler already stopped");
            return 0;
        }
        self.config.active = false;

        if !self.config.clear_on_stop {
            return 0;
        }
        let mut cleared = 0;
        for enemy in registry.alive(Some(EntityKind::Enemy)) {
            if registry.component::<SpawnedEnemy>(enemy).is_some() && registry.destroy(enemy) {
                cleared += 1;
            }
        }
        log::debug!("spawn scheduler stopped, cleared {cleared} enemies");
        cleared
    }

    /// Re-arm: the next spawn is one interval after `now`.
    pub fn start(&mut self, now: f64) {
        self.config.active = true;
        self.next_spawn_at = now + self.config.interval_secs;
    }
}
