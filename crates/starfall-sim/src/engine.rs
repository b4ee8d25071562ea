//! Simulation engine, the core of the game.
//!
//! `SimulationEngine` owns the registry, the state machine, the spawn
//! scheduler and the deferred queue, applies each tick's input, runs all
//! systems in a fixed order, and produces `GameStateSnapshot`s. Completely
//! headless, enabling deterministic testing.

use glam::Vec2;
use hecs::Entity;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use starfall_core::config::SimConfig;
use starfall_core::enums::{EntityKind, GamePhase};
use starfall_core::error::ConfigError;
use starfall_core::input::InputSnapshot;
use starfall_core::state::GameStateSnapshot;
use starfall_core::types::{Position, SimTime};

use crate::deferred::DeferredQueue;
use crate::game_state::{GameStateMachine, ScoreKeeper};
use crate::registry::EntityRegistry;
use crate::sinks::Sinks;
use crate::systems;
use crate::systems::collision::CollisionRules;
use crate::systems::spawn_scheduler::SpawnScheduler;
use crate::systems::EffectContext;
use crate::world_setup;

/// The simulation engine. Owns all session state.
pub struct SimulationEngine {
    config: SimConfig,
    registry: EntityRegistry,
    time: SimTime,
    rng: ChaCha8Rng,
    state: GameStateMachine,
    score: ScoreKeeper,
    spawner: SpawnScheduler,
    deferred: DeferredQueue,
    rules: CollisionRules,
    sinks: Sinks,
    player: Option<Entity>,
    session_started: bool,
    exit_requested: bool,
}

impl SimulationEngine {
    /// Create an engine with no sinks attached.
    pub fn new(config: SimConfig) -> Result<Self, ConfigError> {
        Self::with_sinks(config, Sinks::none())
    }

    /// Create an engine that reports to `sinks`. Rejects invalid configs.
    pub fn with_sinks(config: SimConfig, sinks: Sinks) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            registry: EntityRegistry::new(),
            time: SimTime::default(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            state: GameStateMachine::new(),
            score: ScoreKeeper::new(config.tuning.kill_reward),
            spawner: SpawnScheduler::armed(config.spawn, 0.0),
            deferred: DeferredQueue::new(),
            rules: CollisionRules::default(),
            sinks,
            player: None,
            session_started: false,
            exit_requested: false,
            config,
        })
    }

    /// Replace the collision rule table.
    pub fn set_collision_rules(&mut self, rules: CollisionRules) {
        self.rules = rules;
    }

    /// Advance the simulation by one tick of `1 / tick_rate` seconds.
    pub fn tick(&mut self, input: &InputSnapshot) -> GameStateSnapshot {
        let dt = self.config.dt();
        self.step(dt, input)
    }

    /// Advance the simulation by a measured `dt` seconds.
    pub fn step(&mut self, dt: f64, input: &InputSnapshot) -> GameStateSnapshot {
        self.handle_session_input(input);
        if !self.session_started {
            self.begin_session();
        }

        self.time.advance(dt);
        let now = self.time.elapsed_secs;
        self.run_systems(now, dt as f32, input);
        self.snapshot()
    }

    /// Throw the session away and build a fresh one: empty registry, score 0,
    /// Playing, spawner active, clock at zero. The player is spawned by the
    /// next tick.
    pub fn restart(&mut self) {
        let mut spawn = self.config.spawn;
        spawn.active = true;

        self.registry = EntityRegistry::new();
        self.time = SimTime::default();
        self.state = GameStateMachine::new();
        self.score = ScoreKeeper::new(self.config.tuning.kill_reward);
        self.spawner = SpawnScheduler::armed(spawn, 0.0);
        self.deferred.clear();
        self.player = None;
        self.session_started = false;
        log::info!("session restarted");
    }

    /// Spawn an entity of `kind` with its default components.
    pub fn spawn_entity(&mut self, kind: EntityKind, position: Position) -> Entity {
        world_setup::spawn_kind(&mut self.registry, kind, position, &self.config.tuning)
    }

    /// Build a snapshot of the current state without ticking.
    pub fn snapshot(&self) -> GameStateSnapshot {
        systems::snapshot::build_snapshot(
            &self.registry,
            &self.time,
            &self.state,
            &self.score,
            &self.spawner,
            self.player,
        )
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase()
    }

    pub fn score(&self) -> u32 {
        self.state.score()
    }

    pub fn kills(&self) -> u32 {
        self.score.kills()
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn registry(&self) -> &EntityRegistry {
        &self.registry
    }

    pub fn spawner(&self) -> &SpawnScheduler {
        &self.spawner
    }

    pub fn deferred(&self) -> &DeferredQueue {
        &self.deferred
    }

    /// The current session's player, while it is still registered.
    pub fn player(&self) -> Option<Entity> {
        self.player.filter(|&p| self.registry.is_alive(p))
    }

    /// Whether the player asked to quit. The host decides what to do with it.
    pub fn exit_requested(&self) -> bool {
        self.exit_requested
    }

    #[cfg(test)]
    pub(crate) fn registry_mut(&mut self) -> &mut EntityRegistry {
        &mut self.registry
    }

    fn handle_session_input(&mut self, input: &InputSnapshot) {
        if input.exit_pressed && !self.exit_requested {
            self.exit_requested = true;
            self.sinks.request_exit();
        }
        if input.restart_pressed {
            self.sinks.request_restart();
            self.restart();
        }
    }

    /// Session setup: player on the field, fresh UI.
    fn begin_session(&mut self) {
        self.player = Some(world_setup::spawn_player(
            &mut self.registry,
            &self.config.tuning,
        ));
        self.state.begin_session(&mut self.sinks);
        self.session_started = true;
    }

    /// Run all systems in order.
    fn run_systems(&mut self, now: f64, dt: f32, input: &InputSnapshot) {
        let playing = self.state.is_playing();
        let axis = if playing { input.axis() } else { Vec2::ZERO };

        // 1. Movement
        systems::movement::run(
            &mut self.registry,
            &mut self.rng,
            axis,
            &self.config.bounds,
            &self.config.spawn,
            dt,
        );
        // 2. Player weapon
        if playing && input.fire_pressed {
            if let Some(player) = self.player {
                systems::player::fire(
                    &mut self.registry,
                    player,
                    now,
                    &self.config.tuning,
                    &mut self.sinks,
                );
            }
        }
        // 3. Collision resolution
        let mut ctx = EffectContext {
            registry: &mut self.registry,
            state: &mut self.state,
            score: &mut self.score,
            spawner: &mut self.spawner,
            deferred: &mut self.deferred,
            sinks: &mut self.sinks,
            tuning: &self.config.tuning,
            now,
        };
        systems::collision::run(&self.rules, &mut ctx);
        // 4. Deferred teardown + sweep
        systems::cleanup::run(&mut self.registry, &mut self.deferred, now);
        // 5. Spawning
        if self.state.is_playing() {
            self.spawner.tick(
                now,
                &mut self.registry,
                &mut self.rng,
                &self.config.tuning,
            );
        }
    }
}
