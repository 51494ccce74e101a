//! # Structure Builder
//!
//! Builds the shell of one house: six wall boxes with a centered doorway on
//! the front (+Z) face, a floor plane just above the ground, and a roof and
//! window that are drawn but never collided with.

use crate::world::{CollidableSurface, Decoration, OccupiedCenter, World};
use log::debug;
use macroquad::math::{Vec2, Vec3};

/// Floor color shared by every house.
pub const FLOOR_TINT: u32 = 0xdddddd;
/// Roof color shared by every house.
pub const ROOF_TINT: u32 = 0x8b3a3a;
/// Window pane color.
pub const WINDOW_TINT: u32 = 0x99ccff;

/// Fixed house dimensions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StructureDimensions {
    /// Extent along X
    pub width: f32,
    /// Extent along Z
    pub depth: f32,
    pub wall_height: f32,
    pub wall_thickness: f32,
    pub door_width: f32,
    /// Height of the wall segment above the doorway
    pub lintel_height: f32,
    /// Floor elevation above the ground plane
    pub floor_elevation: f32,
}

impl Default for StructureDimensions {
    fn default() -> Self {
        Self {
            width: 10.0,
            depth: 10.0,
            wall_height: 3.0,
            wall_thickness: 0.25,
            door_width: 2.5,
            lintel_height: 0.4,
            floor_elevation: 0.01,
        }
    }
}

/// Per-house styling. Only the wall tint varies between houses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StructureStyle {
    pub wall_tint: u32,
}

impl StructureStyle {
    pub fn new(wall_tint: u32) -> Self {
        Self { wall_tint }
    }
}

/// The surfaces and decoration making up one house.
#[derive(Debug, Clone, PartialEq)]
pub struct Structure {
    pub center: OccupiedCenter,
    pub style: StructureStyle,
    pub walls: Vec<CollidableSurface>,
    pub floor: CollidableSurface,
    pub decorations: Vec<Decoration>,
}

impl Structure {
    /// Every surface that blocks movement: the walls, then the floor.
    pub fn collidables(&self) -> impl Iterator<Item = &CollidableSurface> {
        self.walls.iter().chain(std::iter::once(&self.floor))
    }

    /// Registers walls and floor as collidable and the rest as decoration.
    pub fn register(self, world: &mut World) {
        world.collidables.extend(self.walls);
        world.collidables.add(self.floor);
        world.decorations.extend(self.decorations);
    }
}

/// Emits house shells at arbitrary centers.
#[derive(Debug, Clone, Default)]
pub struct StructureBuilder {
    pub dimensions: StructureDimensions,
}

impl StructureBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a house centered on `center`.
    ///
    /// # Examples
    ///
    /// ```
    /// use keyhunt::{OccupiedCenter, StructureBuilder, StructureStyle};
    ///
    /// let house = StructureBuilder::new().build(OccupiedCenter::new(16.0, 0.0), StructureStyle::new(0xf2c1c1));
    /// assert_eq!(house.walls.len(), 6);
    /// assert_eq!(house.collidables().count(), 7);
    /// ```
    pub fn build(&self, center: OccupiedCenter, style: StructureStyle) -> Structure {
        let d = self.dimensions;
        let (cx, cz) = (center.x, center.z);
        let mid_y = d.wall_height / 2.0;
        let front_z = cz + d.depth / 2.0;
        let side_width = (d.width - d.door_width) / 2.0;
        let side_offset = d.door_width / 2.0 + side_width / 2.0;
        let tint = style.wall_tint;

        let walls = vec![
            // Back
            CollidableSurface::wall(
                Vec3::new(cx, mid_y, cz - d.depth / 2.0),
                Vec3::new(d.width, d.wall_height, d.wall_thickness),
                tint,
            ),
            // Front, either side of the doorway
            CollidableSurface::wall(
                Vec3::new(cx - side_offset, mid_y, front_z),
                Vec3::new(side_width, d.wall_height, d.wall_thickness),
                tint,
            ),
            CollidableSurface::wall(
                Vec3::new(cx + side_offset, mid_y, front_z),
                Vec3::new(side_width, d.wall_height, d.wall_thickness),
                tint,
            ),
            // Lintel
            CollidableSurface::wall(
                Vec3::new(cx, d.wall_height - d.lintel_height / 2.0, front_z),
                Vec3::new(d.door_width, d.lintel_height, d.wall_thickness),
                tint,
            ),
            // Sides
            CollidableSurface::wall(
                Vec3::new(cx - d.width / 2.0, mid_y, cz),
                Vec3::new(d.wall_thickness, d.wall_height, d.depth),
                tint,
            ),
            CollidableSurface::wall(
                Vec3::new(cx + d.width / 2.0, mid_y, cz),
                Vec3::new(d.wall_thickness, d.wall_height, d.depth),
                tint,
            ),
        ];

        let floor = CollidableSurface::floor(
            Vec3::new(cx, d.floor_elevation, cz),
            Vec2::new(d.width, d.depth),
            FLOOR_TINT,
        );

        let decorations = vec![
            Decoration::Roof {
                base: Vec3::new(cx, d.wall_height, cz),
                radius: d.width * 0.75,
                height: 3.0,
                tint: ROOF_TINT,
            },
            Decoration::Window {
                center: Vec3::new(cx - 3.0, mid_y + 0.3, cz - d.depth / 2.0 + 0.15),
                size: Vec2::new(1.5, 1.0),
                tint: WINDOW_TINT,
            },
        ];

        debug!(
            "Built structure at ({:.2}, {:.2}) with tint {:06x}",
            cx, cz, tint
        );

        Structure {
            center,
            style,
            walls,
            floor,
            decorations,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::{Ray, SurfaceKind, SurfaceShape};

    fn build_at_origin() -> Structure {
        StructureBuilder::new().build(OccupiedCenter::new(0.0, 0.0), StructureStyle::new(0xf2b5b5))
    }

    #[test]
    fn test_structure_shell_composition() {
        let house = build_at_origin();
        assert_eq!(house.walls.len(), 6);
        assert!(house.walls.iter().all(|w| w.kind == SurfaceKind::Wall));
        assert!(house.walls.iter().all(|w| w.tint == 0xf2b5b5));
        assert_eq!(house.floor.kind, SurfaceKind::Floor);
        assert_eq!(house.decorations.len(), 2);
    }

    #[test]
    fn test_floor_sits_above_ground() {
        let house = build_at_origin();
        match house.floor.shape {
            SurfaceShape::Plane(plane) => {
                assert_eq!(plane.center.y, 0.01);
                assert_eq!(plane.size, Vec2::new(10.0, 10.0));
            }
            other => panic!("expected plane, got {:?}", other),
        }
    }

    #[test]
    fn test_doorway_is_open_at_eye_height() {
        let house = build_at_origin();
        let mut world = World::new();
        house.register(&mut world);

        // Walking straight in through the door from outside
        let through_door =
            Ray::between(Vec3::new(0.0, 1.6, 8.0), Vec3::new(0.0, 1.6, 0.0)).unwrap();
        let hit = world.collidables.raycast(&through_door).unwrap();
        // Only the back wall is in the way
        assert!((hit.distance - (8.0 + 5.0 - 0.125)).abs() < 1e-4);

        // Walking into the front wall beside the door
        let into_wall = Ray::between(Vec3::new(3.0, 1.6, 8.0), Vec3::new(3.0, 1.6, 0.0)).unwrap();
        let hit = world.collidables.raycast(&into_wall).unwrap();
        assert!((hit.distance - (8.0 - 5.0 - 0.125)).abs() < 1e-4);
    }

    #[test]
    fn test_door_gap_width() {
        let house = build_at_origin();
        let front: Vec<_> = house
            .walls
            .iter()
            .filter_map(|w| match w.shape {
                SurfaceShape::Box(aabb) if aabb.center().z == 5.0 && aabb.min.y == 0.0 => {
                    Some(aabb)
                }
                _ => None,
            })
            .collect();
        assert_eq!(front.len(), 2);
        let gap = front[1].min.x - front[0].max.x;
        assert!((gap - 2.5).abs() < 1e-5);
    }

    #[test]
    fn test_register_keeps_decoration_out_of_collision() {
        let mut world = World::new();
        build_at_origin().register(&mut world);
        assert_eq!(world.collidables.len(), 7);
        assert_eq!(world.decorations.len(), 2);
    }
}
