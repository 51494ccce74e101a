//! # Rendering Module
//!
//! Macroquad front end: the first-person camera, the 3D scene and the HUD.

pub mod camera;
pub mod display;
pub mod ui;

pub use camera::*;
pub use display::*;
pub use ui::*;
