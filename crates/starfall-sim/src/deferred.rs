//! Time-delayed effects, keyed by an absolute game-clock trigger time.
//!
//! Checked once per tick during teardown. Actions tolerate targets that are
//! already gone: a restart or a scheduler stop may have cleared them first.

use hecs::Entity;

use starfall_core::constants::TIME_EPSILON;

use crate::registry::EntityRegistry;

/// Something to do later.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeferredAction {
    /// Remove an entity whose grace delay has run out.
    Despawn(Entity),
}

#[derive(Debug, Clone, Copy)]
struct Scheduled {
    due_at_secs: f64,
    action: DeferredAction,
}

/// Pending delayed actions.
#[derive(Debug, Default)]
pub struct DeferredQueue {
    pending: Vec<Scheduled>,
}

impl DeferredQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, due_at_secs: f64, action: DeferredAction) {
        self.pending.push(Scheduled {
            due_at_secs,
            action,
        });
    }

    /// Remove `entity` once `delay_secs` have passed after `now`.
    pub fn schedule_despawn(&mut self, entity: Entity, now: f64, delay_secs: f64) {
        self.schedule(now + delay_secs, DeferredAction::Despawn(entity));
    }

    /// Run every action due at `now`, in scheduling order. Returns how many
    /// actually changed something.
    pub fn run_due(&mut self, now: f64, registry: &mut EntityRegistry) -> usize {
        let mut due = Vec::new();
        self.pending.retain(|s| {
            if s.due_at_secs <= now + TIME_EPSILON {
                due.push(s.action);
                false
            } else {
                true
            }
        });

        let mut applied = 0;
        for action in due {
            match action {
                DeferredAction::Despawn(entity) => {
                    if registry.destroy(entity) {
                        applied += 1;
                    } else {
                        log::trace!("deferred despawn of {entity:?} skipped: already gone");
                    }
                }
            }
        }
        applied
    }

    pub fn is_scheduled(&self, action: DeferredAction) -> bool {
        self.pending.iter().any(|s| s.action == action)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }
}
