//! # Player Viewpoint
//!
//! The first-person camera: an eye position plus yaw and pitch.

use macroquad::math::Vec3;

/// Pitch stays just short of straight up or down.
const MAX_PITCH: f32 = std::f32::consts::FRAC_PI_2 - 0.01;

/// Position and orientation of the player's eye.
///
/// Yaw 0 looks down -Z; positive yaw turns left.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Player {
    pub position: Vec3,
    pub yaw: f32,
    pub pitch: f32,
}

impl Player {
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            yaw: 0.0,
            pitch: 0.0,
        }
    }

    /// Creates a player at `position` turned horizontally towards `target`.
    ///
    /// # Examples
    ///
    /// ```
    /// use keyhunt::Player;
    /// use macroquad::math::Vec3;
    ///
    /// let player = Player::looking_at(Vec3::new(0.0, 1.6, 30.0), Vec3::new(0.0, 1.6, 0.0));
    /// assert!(player.forward().abs_diff_eq(Vec3::new(0.0, 0.0, -1.0), 1e-6));
    /// ```
    pub fn looking_at(position: Vec3, target: Vec3) -> Self {
        let mut player = Self::new(position);
        let to_target = target - position;
        if to_target.x != 0.0 || to_target.z != 0.0 {
            player.yaw = (-to_target.x).atan2(-to_target.z);
        }
        let horizontal = to_target.x.hypot(to_target.z);
        player.pitch = to_target.y.atan2(horizontal).clamp(-MAX_PITCH, MAX_PITCH);
        player
    }

    /// Unit vector along the ground in the looking direction.
    pub fn forward(&self) -> Vec3 {
        Vec3::new(-self.yaw.sin(), 0.0, -self.yaw.cos())
    }

    /// Unit vector along the ground to the player's right.
    pub fn right(&self) -> Vec3 {
        Vec3::new(self.yaw.cos(), 0.0, -self.yaw.sin())
    }

    /// Full 3D looking direction including pitch.
    pub fn look_direction(&self) -> Vec3 {
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        self.forward() * cos_pitch + Vec3::Y * sin_pitch
    }

    /// Applies a mouse-look delta in radians.
    pub fn rotate(&mut self, yaw_delta: f32, pitch_delta: f32) {
        self.yaw = (self.yaw + yaw_delta).rem_euclid(std::f32::consts::TAU);
        self.pitch = (self.pitch + pitch_delta).clamp(-MAX_PITCH, MAX_PITCH);
    }
}
