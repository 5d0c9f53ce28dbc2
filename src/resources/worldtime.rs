//! Frame clock resource.

use bevy_ecs::prelude::Resource;

/// Tick-level timing shared with every system.
///
/// `delta_ms` is the unscaled milliseconds since the previous tick;
/// `time_scale` is the dilation factor systems apply themselves (the
/// animation update multiplies the two). `frame_count` stamps each tick so
/// consumers can detect duplicate calls within the same tick.
#[derive(Resource, Clone, Copy, Debug)]
pub struct WorldTime {
    /// Monotonic tick counter, incremented once per host-loop iteration.
    pub frame_count: u64,
    /// Unscaled milliseconds since the previous tick.
    pub delta_ms: u32,
    /// Total unscaled milliseconds since startup.
    pub elapsed_ms: u64,
    /// Time-dilation factor; 1.0 is normal speed.
    pub time_scale: f32,
}

impl Default for WorldTime {
    fn default() -> Self {
        WorldTime {
            frame_count: 0,
            delta_ms: 0,
            elapsed_ms: 0,
            time_scale: 1.0,
        }
    }
}
