//! Entity registry: the single owner of every live entity.
//!
//! Wraps a hecs `World`. Destruction is deferred: `destroy` only marks an
//! entity, and `sweep` removes everything marked at the end of the tick.
//! Marked entities are invisible to `get`, `alive` and component access, so
//! later phases of the same tick never see them.

use hecs::{DynamicBundle, Entity, World};

use starfall_core::components::{Collider, Speed};
use starfall_core::enums::EntityKind;
use starfall_core::types::Position;

/// Marks an entity for removal at the end of the tick.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Doomed;

/// Links a grouped entity to its container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Parent(pub Entity);

/// Marks a container entity that groups the lasers of one volley.
#[derive(Debug, Clone, Copy)]
pub struct LaserGroup;

/// A read-only copy of one entity's core data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EntityRecord {
    pub id: Entity,
    pub kind: EntityKind,
    pub position: Position,
    pub speed: Option<f32>,
    pub collider: Option<Collider>,
}

impl EntityRecord {
    /// A destruction sequence has started (collider switched off).
    pub fn is_dying(&self) -> bool {
        self.collider.map_or(false, |c| !c.enabled)
    }
}

/// Owns all entities. Ids are hecs entities, so a stale id never aliases a
/// newer entity even after its slot is recycled.
pub struct EntityRegistry {
    world: World,
    doomed: Vec<Entity>,
}

impl Default for EntityRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl EntityRegistry {
    pub fn new() -> Self {
        Self {
            world: World::new(),
            doomed: Vec::new(),
        }
    }

    /// Create a bare entity of `kind` at `position`.
    pub fn create(&mut self, kind: EntityKind, position: Position) -> Entity {
        self.world.spawn((kind, position))
    }

    /// Create a kindless container at `position` for grouping lasers.
    pub fn create_container(&mut self, position: Position) -> Entity {
        self.world.spawn((LaserGroup, position))
    }

    /// Attach extra components. Returns false for dead or unknown ids.
    pub fn insert(&mut self, id: Entity, components: impl DynamicBundle) -> bool {
        if !self.is_alive(id) {
            return false;
        }
        self.world.insert(id, components).is_ok()
    }

    /// Put `child` under `container`. Destroying the container destroys the child.
    pub fn attach(&mut self, child: Entity, container: Entity) -> bool {
        if !self.is_alive(container) {
            return false;
        }
        self.insert(child, (Parent(container),))
    }

    pub fn parent_of(&self, id: Entity) -> Option<Entity> {
        self.component::<Parent>(id)
            .map(|p| p.0)
            .filter(|&parent| self.is_alive(parent))
    }

    /// Mark `id` (and anything attached to it) for removal at the end of the tick.
    ///
    /// Unknown or already-destroyed ids are a no-op and return false.
    pub fn destroy(&mut self, id: Entity) -> bool {
        if !self.is_alive(id) {
            return false;
        }
        if self.world.insert_one(id, Doomed).is_err() {
            return false;
        }
        self.doomed.push(id);

        let children: Vec<Entity> = self
            .world
            .query::<&Parent>()
            .iter()
            .filter(|(_, parent)| parent.0 == id)
            .map(|(entity, _)| entity)
            .collect();
        for child in children {
            self.destroy(child);
        }
        true
    }

    /// Destroy `id` and, if it is grouped, its container (and so its siblings).
    pub fn destroy_with_parent(&mut self, id: Entity) -> bool {
        let parent = self.parent_of(id);
        let destroyed = self.destroy(id);
        if let Some(container) = parent {
            self.destroy(container);
        }
        destroyed
    }

    /// Exists and has not been destroyed.
    pub fn is_alive(&self, id: Entity) -> bool {
        self.world.contains(id) && self.world.get::<&Doomed>(id).is_err()
    }

    pub fn get(&self, id: Entity) -> Option<EntityRecord> {
        if !self.is_alive(id) {
            return None;
        }
        let kind = *self.world.get::<&EntityKind>(id).ok()?;
        let position = *self.world.get::<&Position>(id).ok()?;
        Some(EntityRecord {
            id,
            kind,
            position,
            speed: self.component::<Speed>(id).map(|s| s.units_per_sec),
            collider: self.component::<Collider>(id),
        })
    }

    pub fn kind(&self, id: Entity) -> Option<EntityKind> {
        self.component::<EntityKind>(id)
    }

    pub fn position(&self, id: Entity) -> Option<Position> {
        self.component::<Position>(id)
    }

    pub fn set_position(&mut self, id: Entity, position: Position) -> bool {
        self.update::<Position, _>(id, |p| *p = position).is_some()
    }

    /// Copy of component `T`, if `id` is alive and has one.
    pub fn component<T: hecs::Component + Copy>(&self, id: Entity) -> Option<T> {
        if !self.is_alive(id) {
            return None;
        }
        self.world.get::<&T>(id).ok().map(|c| *c)
    }

    /// Mutate component `T` in place. `None` if dead, unknown, or missing `T`.
    pub fn update<T: hecs::Component, R>(
        &mut self,
        id: Entity,
        f: impl FnOnce(&mut T) -> R,
    ) -> Option<R> {
        if !self.is_alive(id) {
            return None;
        }
        let mut component = self.world.get::<&mut T>(id).ok()?;
        Some(f(&mut *component))
    }

    /// Ids of all live entities, optionally of one kind, in stable id order.
    ///
    /// Returned as an owned list so callers may destroy while walking it.
    pub fn alive(&self, kind: Option<EntityKind>) -> Vec<Entity> {
        let mut ids: Vec<Entity> = self
            .world
            .query::<(&EntityKind, Option<&Doomed>)>()
            .iter()
            .filter(|(_, (k, doomed))| doomed.is_none() && kind.map_or(true, |want| **k == want))
            .map(|(entity, _)| entity)
            .collect();
        ids.sort_by_key(|e| e.to_bits());
        ids
    }

    pub fn count(&self, kind: EntityKind) -> usize {
        self.alive(Some(kind)).len()
    }

    /// Live entities including containers.
    pub fn len(&self) -> usize {
        self.world.len() as usize - self.doomed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Entities marked this tick and not yet swept.
    pub fn pending_removals(&self) -> usize {
        self.doomed.len()
    }

    /// Physically remove every marked entity. Returns how many went.
    pub fn sweep(&mut self) -> usize {
        let mut removed = 0;
        for entity in self.doomed.drain(..) {
            if self.world.despawn(entity).is_ok() {
                removed += 1;
            }
        }
        removed
    }

    pub(crate) fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }
}
