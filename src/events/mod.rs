pub mod resize;
pub mod touch;

pub use resize::wire_resize;
pub use touch::{wire_touch_handlers, TouchListeners};
