//! # Game Module
//!
//! Per-frame game logic, independent of any window:
//! - `player`: the first-person viewpoint
//! - `movement`: collision-constrained walking
//! - `interaction`: which object is within reach
//! - `progress`: the key-then-treasure state machine
//! - `state`: the session tying them together

pub mod interaction;
pub mod movement;
pub mod player;
pub mod progress;
pub mod state;

pub use interaction::*;
pub use movement::*;
pub use player::*;
pub use progress::*;
pub use state::*;
