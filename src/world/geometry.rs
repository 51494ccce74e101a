//! # Geometry
//!
//! Axis-aligned boxes, horizontal planes and rays: the only shapes the game
//! needs for collision and proximity.

use macroquad::math::{Vec2, Vec3};

/// Tolerance for treating a ray as parallel to a plane or slab.
const PARALLEL_EPSILON: f32 = 1e-6;

/// Axis-aligned bounding box in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// Creates a box from its two extreme corners.
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self {
            min: min.min(max),
            max: min.max(max),
        }
    }

    /// Creates a box centered on `center` with full extents `size`.
    ///
    /// # Examples
    ///
    /// ```
    /// use keyhunt::Aabb;
    /// use macroquad::math::Vec3;
    ///
    /// let wall = Aabb::from_center_size(Vec3::new(0.0, 1.5, -5.0), Vec3::new(10.0, 3.0, 0.25));
    /// assert_eq!(wall.min.y, 0.0);
    /// assert_eq!(wall.max.x, 5.0);
    /// ```
    pub fn from_center_size(center: Vec3, size: Vec3) -> Self {
        let half = size.abs() * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    pub fn contains(&self, point: Vec3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }

    /// Returns the eight corners of the box.
    pub fn corners(&self) -> [Vec3; 8] {
        let (a, b) = (self.min, self.max);
        [
            Vec3::new(a.x, a.y, a.z),
            Vec3::new(b.x, a.y, a.z),
            Vec3::new(a.x, b.y, a.z),
            Vec3::new(b.x, b.y, a.z),
            Vec3::new(a.x, a.y, b.z),
            Vec3::new(b.x, a.y, b.z),
            Vec3::new(a.x, b.y, b.z),
            Vec3::new(b.x, b.y, b.z),
        ]
    }

    /// Smallest box enclosing this one after scaling, rotating about the
    /// vertical axis, and translating.
    pub fn transformed(&self, scale: f32, rotation_y: f32, translation: Vec3) -> Self {
        let (sin, cos) = rotation_y.sin_cos();
        let mut min = Vec3::splat(f32::INFINITY);
        let mut max = Vec3::splat(f32::NEG_INFINITY);

        for corner in self.corners() {
            let p = corner * scale;
            // Right-handed rotation about +Y
            let rotated = Vec3::new(p.x * cos + p.z * sin, p.y, -p.x * sin + p.z * cos);
            let world = rotated + translation;
            min = min.min(world);
            max = max.max(world);
        }

        Self { min, max }
    }

    /// Distance along `ray` to the first face it enters, if any.
    ///
    /// Rays that start inside the box report no hit: faces are only solid
    /// from the outside.
    pub fn ray_intersection(&self, ray: &Ray) -> Option<f32> {
        let mut t_near = f32::NEG_INFINITY;
        let mut t_far = f32::INFINITY;

        let origin = ray.origin.to_array();
        let direction = ray.direction.to_array();
        let min = self.min.to_array();
        let max = self.max.to_array();

        for axis in 0..3 {
            if direction[axis].abs() < PARALLEL_EPSILON {
                if origin[axis] < min[axis] || origin[axis] > max[axis] {
                    return None;
                }
                continue;
            }

            let inv = 1.0 / direction[axis];
            let mut t0 = (min[axis] - origin[axis]) * inv;
            let mut t1 = (max[axis] - origin[axis]) * inv;
            if t0 > t1 {
                std::mem::swap(&mut t0, &mut t1);
            }
            t_near = t_near.max(t0);
            t_far = t_far.min(t1);
            if t_near > t_far {
                return None;
            }
        }

        if t_near < 0.0 {
            None
        } else {
            Some(t_near)
        }
    }
}

/// A finite horizontal rectangle facing up (+Y), such as a floor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HorizontalPlane {
    pub center: Vec3,
    /// Extents along X and Z
    pub size: Vec2,
}

impl HorizontalPlane {
    pub fn new(center: Vec3, size: Vec2) -> Self {
        Self { center, size }
    }

    /// Distance along `ray` to the plane, for rays arriving from above.
    pub fn ray_intersection(&self, ray: &Ray) -> Option<f32> {
        if ray.direction.y > -PARALLEL_EPSILON {
            return None;
        }

        let t = (self.center.y - ray.origin.y) / ray.direction.y;
        if t < 0.0 {
            return None;
        }

        let hit = ray.at(t);
        let half = self.size * 0.5;
        let inside = (hit.x - self.center.x).abs() <= half.x
            && (hit.z - self.center.z).abs() <= half.y;
        inside.then_some(t)
    }
}

/// A half-line with a unit direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// Creates a ray pointing from `from` towards `to`.
    ///
    /// Returns `None` when the two points coincide.
    pub fn between(from: Vec3, to: Vec3) -> Option<Self> {
        let direction = (to - from).try_normalize()?;
        Some(Self {
            origin: from,
            direction,
        })
    }

    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_box_at(center: Vec3) -> Aabb {
        Aabb::from_center_size(center, Vec3::ONE)
    }

    #[test]
    fn test_aabb_center_and_size() {
        let aabb = Aabb::new(Vec3::new(2.0, 0.0, 2.0), Vec3::new(-2.0, 1.0, -2.0));
        assert_eq!(aabb.min, Vec3::new(-2.0, 0.0, -2.0));
        assert_eq!(aabb.center(), Vec3::new(0.0, 0.5, 0.0));
        assert_eq!(aabb.size(), Vec3::new(4.0, 1.0, 4.0));
        assert!(aabb.contains(Vec3::ZERO));
        assert!(!aabb.contains(Vec3::new(0.0, 2.0, 0.0)));
    }

    #[test]
    fn test_ray_hits_box_in_front() {
        let aabb = unit_box_at(Vec3::new(0.0, 0.0, -5.0));
        let ray = Ray::between(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0)).unwrap();
        let t = aabb.ray_intersection(&ray).unwrap();
        assert!((t - 4.5).abs() < 1e-5);
    }

    #[test]
    fn test_ray_misses_box_behind_or_beside() {
        let aabb = unit_box_at(Vec3::new(0.0, 0.0, 5.0));
        let forward = Ray::between(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0)).unwrap();
        assert!(aabb.ray_intersection(&forward).is_none());

        let beside = unit_box_at(Vec3::new(3.0, 0.0, -5.0));
        assert!(beside.ray_intersection(&forward).is_none());
    }

    #[test]
    fn test_ray_from_inside_box_reports_no_hit() {
        let aabb = unit_box_at(Vec3::ZERO);
        let ray = Ray::between(Vec3::ZERO, Vec3::X).unwrap();
        assert!(aabb.ray_intersection(&ray).is_none());
    }

    #[test]
    fn test_plane_only_hit_from_above() {
        let floor = HorizontalPlane::new(Vec3::new(0.0, 0.01, 0.0), Vec2::splat(10.0));

        let down = Ray::between(Vec3::new(0.0, 1.6, 0.0), Vec3::ZERO).unwrap();
        let t = floor.ray_intersection(&down).unwrap();
        assert!((t - 1.59).abs() < 1e-5);

        let level = Ray::between(Vec3::new(0.0, 1.6, 0.0), Vec3::new(1.0, 1.6, 0.0)).unwrap();
        assert!(floor.ray_intersection(&level).is_none());

        let outside = Ray::between(Vec3::new(20.0, 1.6, 0.0), Vec3::new(20.0, 0.0, 0.0)).unwrap();
        assert!(floor.ray_intersection(&outside).is_none());
    }

    #[test]
    fn test_degenerate_ray() {
        assert!(Ray::between(Vec3::ONE, Vec3::ONE).is_none());
    }

    #[test]
    fn test_transformed_bounds_rotate_quarter_turn() {
        let local = Aabb::new(Vec3::new(-1.0, 0.0, -0.5), Vec3::new(1.0, 1.0, 0.5));
        let world = local.transformed(1.0, std::f32::consts::FRAC_PI_2, Vec3::new(5.0, 0.0, 0.0));

        assert!((world.size().x - 1.0).abs() < 1e-5);
        assert!((world.size().z - 2.0).abs() < 1e-5);
        assert!((world.center() - Vec3::new(5.0, 0.5, 0.0)).length() < 1e-5);
    }

    #[test]
    fn test_transformed_bounds_scale() {
        let local = Aabb::new(Vec3::ZERO, Vec3::ONE);
        let world = local.transformed(2.0, 0.0, Vec3::ZERO);
        assert_eq!(world.max, Vec3::splat(2.0));
    }
}
