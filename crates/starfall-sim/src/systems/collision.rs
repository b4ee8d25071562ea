//! Collision resolution.
//!
//! Every tick, after movement, all live entity pairs whose kinds have a rule
//! are overlap-tested (AABB) and the rule's outcome applied. Kind pairs
//! without a rule are ignored.
//!
//! A pair only counts while both colliders are enabled. Each destruction
//! sequence disables the collider before any other effect, so the same
//! entity can never start two sequences, even within one tick.

use std::collections::{BTreeSet, HashMap};

use hecs::Entity;

use starfall_core::components::{Collider, Speed};
use starfall_core::enums::{EntityKind, KindPair};
use starfall_core::types::Aabb;

use crate::registry::EntityRegistry;
use crate::systems::{player, EffectContext};

/// Outcome applied when a kind pair overlaps.
///
/// Handlers receive the two entities in `KindPair` order
/// (Player < Enemy < PlayerLaser < EnemyLaser).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionRule {
    /// (Player, Enemy): the enemy blows up and the player dies.
    EnemyRamsPlayer,
    /// (Enemy, PlayerLaser): the laser is spent, the enemy is shot down, score.
    LaserHitsEnemy,
    /// (Player, EnemyLaser): the laser is spent and the player dies.
    EnemyLaserHitsPlayer,
}

/// Declarative rule table keyed by unordered kind pair.
#[derive(Debug, Clone)]
pub struct CollisionRules {
    table: HashMap<KindPair, CollisionRule>,
}

impl Default for CollisionRules {
    fn default() -> Self {
        Self::empty()
            .with(EntityKind::Enemy, EntityKind::Player, CollisionRule::EnemyRamsPlayer)
            .with(EntityKind::Enemy, EntityKind::PlayerLaser, CollisionRule::LaserHitsEnemy)
            .with(
                EntityKind::Player,
                EntityKind::EnemyLaser,
                CollisionRule::EnemyLaserHitsPlayer,
            )
    }
}

impl CollisionRules {
    pub fn empty() -> Self {
        Self {
            table: HashMap::new(),
        }
    }

    /// Add or replace the rule for `(a, b)` (order does not matter).
    pub fn with(mut self, a: EntityKind, b: EntityKind, rule: CollisionRule) -> Self {
        self.table.insert(KindPair::new(a, b), rule);
        self
    }

    pub fn lookup(&self, a: EntityKind, b: EntityKind) -> Option<CollisionRule> {
        self.table.get(&KindPair::new(a, b)).copied()
    }

    /// Kinds that take part in at least one rule.
    pub fn participants(&self) -> BTreeSet<EntityKind> {
        self.table
            .keys()
            .flat_map(|pair| [pair.first(), pair.second()])
            .collect()
    }
}

/// Run collision resolution. Returns how many rule outcomes were applied.
pub fn run(rules: &CollisionRules, ctx: &mut EffectContext<'_>) -> u32 {
    let participants = rules.participants();
    let candidates: Vec<(Entity, EntityKind)> = ctx
        .registry
        .alive(None)
        .into_iter()
        .filter_map(|e| ctx.registry.kind(e).map(|k| (e, k)))
        .filter(|(_, k)| participants.contains(k))
        .collect();

    let mut applied = 0;
    for (i, &(a, kind_a)) in candidates.iter().enumerate() {
        for &(b, kind_b) in &candidates[i + 1..] {
            let Some(rule) = rules.lookup(kind_a, kind_b) else {
                continue;
            };
            // Re-read every pair: an earlier outcome this tick may have
            // destroyed either entity or switched its collider off.
            let (Some(box_a), Some(box_b)) =
                (active_box(ctx.registry, a), active_box(ctx.registry, b))
            else {
                continue;
            };
            if !box_a.overlaps(&box_b) {
                continue;
            }
            let (first, second) = if KindPair::is_swapped(kind_a, kind_b) {
                (b, a)
            } else {
                (a, b)
            };
            if apply(rule, first, second, ctx) {
                applied += 1;
            }
        }
    }
    applied
}

/// World box of a live entity whose collider is enabled.
fn active_box(registry: &EntityRegistry, entity: Entity) -> Option<Aabb> {
    let collider = registry.component::<Collider>(entity)?;
    if !collider.enabled {
        return None;
    }
    Some(collider.aabb_at(&registry.position(entity)?))
}

fn apply(rule: CollisionRule, first: Entity, second: Entity, ctx: &mut EffectContext<'_>) -> bool {
    match rule {
        CollisionRule::EnemyRamsPlayer => enemy_rams_player(first, second, ctx),
        CollisionRule::LaserHitsEnemy => laser_hits_enemy(first, second, ctx),
        CollisionRule::EnemyLaserHitsPlayer => enemy_laser_hits_player(first, second, ctx),
    }
}

fn enemy_rams_player(player: Entity, enemy: Entity, ctx: &mut EffectContext<'_>) -> bool {
    if !claim(ctx.registry, enemy) {
        return false;
    }
    let grace = ctx.tuning.enemy_ram_grace_secs;
    enemy_destruction_effects(enemy, grace, false, ctx);
    player::begin_death(player, ctx);
    true
}

fn laser_hits_enemy(enemy: Entity, laser: Entity, ctx: &mut EffectContext<'_>) -> bool {
    if !claim(ctx.registry, enemy) {
        return false;
    }
    ctx.registry.destroy_with_parent(laser);
    ctx.score.award_kill(ctx.state, ctx.sinks);
    let grace = ctx.tuning.enemy_shot_grace_secs;
    enemy_destruction_effects(enemy, grace, true, ctx);
    true
}

fn enemy_laser_hits_player(player: Entity, laser: Entity, ctx: &mut EffectContext<'_>) -> bool {
    ctx.registry.destroy_with_parent(laser);
    player::begin_death(player, ctx)
}

/// Switch off an entity's collider. False if it was already off or is gone:
/// that entity is already inside a destruction sequence.
fn claim(registry: &mut EntityRegistry, entity: Entity) -> bool {
    registry
        .update::<Collider, _>(entity, |c| std::mem::replace(&mut c.enabled, false))
        .unwrap_or(false)
}

/// The rest of an enemy's destruction sequence once its collider is off:
/// slow to the shudder speed, play the explosion, remove after `grace_secs`.
/// When `immediate_without_fx` is set and nothing can play the destruction
/// animation, the enemy is removed right away instead.
fn enemy_destruction_effects(
    enemy: Entity,
    grace_secs: f64,
    immediate_without_fx: bool,
    ctx: &mut EffectContext<'_>,
) {
    ctx.sinks.explosion();
    if immediate_without_fx && !ctx.sinks.has_presentation() {
        ctx.registry.destroy(enemy);
        return;
    }
    let shudder = ctx.tuning.enemy_shudder_speed;
    ctx.registry.update::<Speed, _>(enemy, |s| s.units_per_sec = shudder);
    ctx.sinks.destruction_effect(enemy);
    ctx.deferred.schedule_despawn(enemy, ctx.now, grace_secs);
}
