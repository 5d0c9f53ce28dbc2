//! Time update system.
//!
//! Updates the shared [`WorldTime`](crate::resources::worldtime::WorldTime)
//! resource once per host-loop iteration.
use bevy_ecs::prelude::*;

use crate::resources::worldtime::WorldTime;

/// Stamp a new tick on the `WorldTime` resource.
///
/// `delta_ms` is the unscaled frame delta in milliseconds. The tick counter
/// increments here and nowhere else; systems that must run at most once per
/// tick key off it.
pub fn update_world_time(world: &mut World, delta_ms: u32) {
    let mut wt = world.resource_mut::<WorldTime>();
    wt.frame_count += 1;
    wt.delta_ms = delta_ms;
    wt.elapsed_ms += delta_ms as u64;
}
