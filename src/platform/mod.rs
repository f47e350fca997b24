//! Platform abstraction layer
//!
//! Things the simulation needs from the host but must not own itself.
//! Currently just frame timing.

pub mod time;

pub use time::{FixedClock, FramePacer, SimClock, WallClock};
