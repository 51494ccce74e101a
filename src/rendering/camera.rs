//! # First-Person Camera
//!
//! Tracks the output surface size and builds the 3D camera from the
//! player's viewpoint each frame.

use crate::game::Player;
use log::debug;
use macroquad::camera::Camera3D;
use macroquad::math::Vec3;

/// Vertical field of view in degrees.
pub const FIELD_OF_VIEW_DEGREES: f32 = 75.0;

/// Size of the output surface in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Width over height. A degenerate surface reports 1.0.
    pub fn aspect(&self) -> f32 {
        if self.width > 0.0 && self.height > 0.0 {
            self.width / self.height
        } else {
            1.0
        }
    }

    /// Updates the size. Returns whether it changed.
    pub fn resize(&mut self, width: f32, height: f32) -> bool {
        if self.width == width && self.height == height {
            return false;
        }
        debug!(
            "Viewport resized from {}x{} to {}x{}",
            self.width, self.height, width, height
        );
        self.width = width;
        self.height = height;
        true
    }

    /// Camera looking out of the player's eye.
    pub fn camera(&self, player: &Player) -> Camera3D {
        Camera3D {
            position: player.position,
            target: player.position + player.look_direction(),
            up: Vec3::Y,
            fovy: FIELD_OF_VIEW_DEGREES.to_radians(),
            aspect: Some(self.aspect()),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resize_updates_aspect() {
        let mut viewport = Viewport::new(1024.0, 768.0);
        assert!((viewport.aspect() - 4.0 / 3.0).abs() < 1e-6);

        assert!(viewport.resize(1920.0, 1080.0));
        assert!((viewport.aspect() - 16.0 / 9.0).abs() < 1e-6);
        assert!(!viewport.resize(1920.0, 1080.0));
    }

    #[test]
    fn test_degenerate_viewport() {
        assert_eq!(Viewport::new(800.0, 0.0).aspect(), 1.0);
    }

    #[test]
    fn test_camera_follows_player() {
        let player = Player::new(Vec3::new(0.0, 1.6, 30.0));
        let camera = Viewport::new(800.0, 600.0).camera(&player);
        assert_eq!(camera.position, player.position);
        assert!((camera.target - Vec3::new(0.0, 1.6, 29.0)).length() < 1e-5);
        assert_eq!(camera.aspect, Some(800.0 / 600.0));
    }
}
