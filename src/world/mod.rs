//! # World Module
//!
//! Static scene contents: collidable surfaces, decoration, and the centers
//! of every house placed so far.
//!
//! Everything here is append-only for the lifetime of a session.

pub mod collision;
pub mod geometry;

pub use collision::*;
pub use geometry::*;

use macroquad::math::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// Ground color (0xRRGGBB).
pub const GROUND_TINT: u32 = 0x8b6b4a;

/// Sky color (0xRRGGBB).
pub const SKY_TINT: u32 = 0xcfe9ff;

/// The 2D center of a placed structure on the ground plane.
///
/// # Examples
///
/// ```
/// use keyhunt::OccupiedCenter;
///
/// let a = OccupiedCenter::new(0.0, 0.0);
/// let b = OccupiedCenter::new(3.0, 4.0);
/// assert_eq!(a.distance(b), 5.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OccupiedCenter {
    pub x: f32,
    pub z: f32,
}

impl OccupiedCenter {
    pub fn new(x: f32, z: f32) -> Self {
        Self { x, z }
    }

    /// Euclidean distance on the ground plane.
    pub fn distance(self, other: OccupiedCenter) -> f32 {
        (self.x - other.x).hypot(self.z - other.z)
    }

    /// Lifts the center to a world position at height `y`.
    pub fn to_world(self, y: f32) -> Vec3 {
        Vec3::new(self.x, y, self.z)
    }
}

/// Non-collidable scene geometry. The player walks straight through it.
#[derive(Debug, Clone, PartialEq)]
pub enum Decoration {
    /// Four-sided pyramid roof resting on a house
    Roof {
        base: Vec3,
        radius: f32,
        height: f32,
        tint: u32,
    },
    /// Translucent pane set just inside a wall
    Window { center: Vec3, size: Vec2, tint: u32 },
    /// Trunk with a round crown
    Tree {
        base: Vec3,
        trunk_height: f32,
        crown_radius: f32,
    },
}

/// Static contents of the scene.
#[derive(Debug, Clone, Default)]
pub struct World {
    /// Surfaces that block movement
    pub collidables: CollisionRegistry,
    /// Geometry drawn but never collided with
    pub decorations: Vec<Decoration>,
    /// Centers of placed houses, in placement order
    pub centers: Vec<OccupiedCenter>,
}

impl World {
    /// Creates an empty world.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a world containing only the ground plane.
    pub fn with_ground(size: f32) -> Self {
        let mut world = Self::new();
        world
            .collidables
            .add(CollidableSurface::ground(size, GROUND_TINT));
        world
    }

    pub fn add_decoration(&mut self, decoration: Decoration) {
        self.decorations.push(decoration);
    }

    /// Records a structure center. Centers are never removed.
    pub fn record_center(&mut self, center: OccupiedCenter) {
        self.centers.push(center);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_world_with_ground() {
        let world = World::with_ground(200.0);
        assert_eq!(world.collidables.len(), 1);
        assert_eq!(world.collidables.surfaces()[0].kind, SurfaceKind::Ground);
        assert!(world.decorations.is_empty());
        assert!(world.centers.is_empty());
    }

    #[test]
    fn test_center_distance_is_symmetric() {
        let a = OccupiedCenter::new(-18.0, 18.0);
        let b = OccupiedCenter::new(16.0, 0.0);
        assert_eq!(a.distance(b), b.distance(a));
        assert_eq!(a.to_world(1.0), Vec3::new(-18.0, 1.0, 18.0));
    }
}
