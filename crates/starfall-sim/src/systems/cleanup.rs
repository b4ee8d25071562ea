//! Cleanup system: fires due deferred actions, then removes everything
//! destroyed this tick.

use crate::deferred::DeferredQueue;
use crate::registry::EntityRegistry;

/// Run due teardown callbacks and sweep the registry. Returns entities removed.
pub fn run(registry: &mut EntityRegistry, deferred: &mut DeferredQueue, now: f64) -> usize {
    deferred.run_due(now, registry);
    registry.sweep()
}
