use std::f64::consts::PI;

// Defaults applied when the caller leaves an option out.

// Direction layout
pub const DEFAULT_DIRECTION_COUNT: usize = 8;
/// Center of the first slice. Angles are measured with page Y inverted, so
/// `-π/2` puts slice 1 at the bottom of the screen; pass `π/2` for the top.
pub const DEFAULT_START_ANGLE: f64 = -PI / 2.0;

// Timing (milliseconds)
pub const DEFAULT_THROTTLE_MS: u64 = 150; // min spacing between active snapshots
pub const DEFAULT_RESIZE_DEBOUNCE_MS: u64 = 200; // quiet period before re-reading layout
