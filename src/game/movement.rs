//! # Movement and Collision
//!
//! Turns held movement keys into a per-tick displacement of the viewpoint.
//!
//! After moving, a ray is cast from the old position towards the new one.
//! If the nearest collidable surface along it is closer than the collision
//! margin, the whole move is undone. There is no sliding along walls and the
//! test is discrete, so very fast motion could tunnel through thin geometry;
//! at walking speed and frame rate it does not.

use super::player::Player;
use crate::config::MovementConfig;
use crate::input::MovementKeys;
use crate::world::{CollisionRegistry, Ray, RayHit};
use macroquad::math::{Vec2, Vec3};

/// Result of one movement tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MoveOutcome {
    /// No movement key held, or opposing keys cancelled out
    Idle,
    /// The viewpoint moved by `displacement`
    Moved { displacement: Vec3 },
    /// The move was reverted because of `hit`
    Blocked { hit: RayHit },
}

/// Collision-constrained first-person movement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MovementController {
    /// Units per second
    pub speed: f32,
    pub collision_margin: f32,
}

impl MovementController {
    pub fn new(speed: f32, collision_margin: f32) -> Self {
        Self {
            speed,
            collision_margin,
        }
    }

    pub fn from_config(config: &MovementConfig) -> Self {
        Self::new(config.speed, config.collision_margin)
    }

    /// Unit-length (or zero) intent: `x` strafes right, `y` walks forward.
    pub fn intent(keys: &MovementKeys) -> Vec2 {
        let axis = |positive: bool, negative: bool| positive as i8 as f32 - negative as i8 as f32;
        Vec2::new(
            axis(keys.right, keys.left),
            axis(keys.forward, keys.backward),
        )
        .normalize_or_zero()
    }

    /// Advances the player by one tick of `dt` seconds.
    pub fn tick(
        &self,
        player: &mut Player,
        keys: &MovementKeys,
        dt: f32,
        collidables: &CollisionRegistry,
    ) -> MoveOutcome {
        let step = Self::intent(keys) * self.speed * dt;
        if step == Vec2::ZERO {
            return MoveOutcome::Idle;
        }

        let previous = player.position;
        player.position += player.right() * step.x;
        player.position += player.forward() * step.y;

        let Some(ray) = Ray::between(previous, player.position) else {
            player.position = previous;
            return MoveOutcome::Idle;
        };

        match collidables.raycast(&ray) {
            Some(hit) if hit.distance < self.collision_margin => {
                player.position = previous;
                MoveOutcome::Blocked { hit }
            }
            _ => MoveOutcome::Moved {
                displacement: player.position - previous,
            },
        }
    }
}
