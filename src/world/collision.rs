//! # Collision Registry
//!
//! Solid surfaces that block the player, and the nearest-hit raycast the
//! movement controller runs against them every tick.

use super::geometry::{Aabb, HorizontalPlane, Ray};
use macroquad::math::{Vec2, Vec3};

/// Shape of a collidable surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SurfaceShape {
    /// A solid box such as a wall segment
    Box(Aabb),
    /// An upward-facing rectangle such as a floor or the ground
    Plane(HorizontalPlane),
}

/// What a surface is, for rendering and diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceKind {
    Wall,
    Floor,
    Ground,
}

/// A piece of geometry that blocks player movement.
///
/// Surfaces are created by the structure builder and never change after
/// they are registered.
#[derive(Debug, Clone, PartialEq)]
pub struct CollidableSurface {
    pub shape: SurfaceShape,
    pub kind: SurfaceKind,
    /// RGB color as 0xRRGGBB
    pub tint: u32,
}

impl CollidableSurface {
    /// Creates a wall box from its center and full size.
    pub fn wall(center: Vec3, size: Vec3, tint: u32) -> Self {
        Self {
            shape: SurfaceShape::Box(Aabb::from_center_size(center, size)),
            kind: SurfaceKind::Wall,
            tint,
        }
    }

    /// Creates a horizontal floor rectangle.
    pub fn floor(center: Vec3, size: Vec2, tint: u32) -> Self {
        Self {
            shape: SurfaceShape::Plane(HorizontalPlane::new(center, size)),
            kind: SurfaceKind::Floor,
            tint,
        }
    }

    /// Creates the ground plane.
    pub fn ground(size: f32, tint: u32) -> Self {
        Self {
            shape: SurfaceShape::Plane(HorizontalPlane::new(Vec3::ZERO, Vec2::splat(size))),
            kind: SurfaceKind::Ground,
            tint,
        }
    }

    pub fn ray_intersection(&self, ray: &Ray) -> Option<f32> {
        match &self.shape {
            SurfaceShape::Box(aabb) => aabb.ray_intersection(ray),
            SurfaceShape::Plane(plane) => plane.ray_intersection(ray),
        }
    }
}

/// Nearest surface found by a raycast.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// Index of the surface in the registry
    pub surface: usize,
    pub distance: f32,
}

/// Append-only set of all collidable surfaces in the session.
#[derive(Debug, Clone, Default)]
pub struct CollisionRegistry {
    surfaces: Vec<CollidableSurface>,
}

impl CollisionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, surface: CollidableSurface) -> usize {
        self.surfaces.push(surface);
        self.surfaces.len() - 1
    }

    pub fn extend(&mut self, surfaces: impl IntoIterator<Item = CollidableSurface>) {
        self.surfaces.extend(surfaces);
    }

    pub fn surfaces(&self) -> &[CollidableSurface] {
        &self.surfaces
    }

    pub fn len(&self) -> usize {
        self.surfaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.surfaces.is_empty()
    }

    /// Finds the closest surface along `ray`.
    pub fn raycast(&self, ray: &Ray) -> Option<RayHit> {
        self.surfaces
            .iter()
            .enumerate()
            .filter_map(|(index, surface)| {
                surface.ray_intersection(ray).map(|distance| RayHit {
                    surface: index,
                    distance,
                })
            })
            .min_by(|a, b| a.distance.total_cmp(&b.distance))
    }
}
