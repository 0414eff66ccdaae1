pub mod angle;
pub mod config;
pub mod constants;
pub mod controller;
pub mod direction;
pub mod error;
pub mod geometry;
pub mod layout;
pub mod session;
pub mod state;
pub mod throttle;
pub mod timer;

pub use angle::{normalize, vector_angle};
pub use config::*;
pub use constants::*;
pub use controller::*;
pub use direction::*;
pub use error::*;
pub use geometry::*;
pub use layout::*;
pub use session::*;
pub use state::*;
pub use throttle::*;
pub use timer::*;
