//! # Display Management
//!
//! Draws the 3D scene with macroquad primitives, then the HUD on top.
//!
//! Surfaces and decorations are drawn as plain colored solids. Loaded
//! objects are drawn as boxes filling their world-space bounds.

use super::camera::Viewport;
use super::ui::Hud;
use crate::assets::{SearchableObject, Tag};
use crate::game::GameState;
use crate::world::{CollidableSurface, Decoration, SurfaceShape, SKY_TINT};
use macroquad::prelude::*;

const TRUNK_TINT: u32 = 0x6b4226;
const FOLIAGE_TINT: u32 = 0x2e8b57;
const OBJECT_TINT: u32 = 0xb08d57;
const TARGET_TINT: u32 = 0xffe066;

/// Converts a 0xRRGGBB tint to a color with the given alpha.
///
/// # Examples
///
/// ```
/// use keyhunt::tint_color;
///
/// let red = tint_color(0xff0000, 1.0);
/// assert_eq!((red.r, red.g, red.b), (1.0, 0.0, 0.0));
/// ```
pub fn tint_color(tint: u32, alpha: f32) -> Color {
    let channel = |shift: u32| ((tint >> shift) & 0xff) as f32 / 255.0;
    Color::new(channel(16), channel(8), channel(0), alpha)
}

/// Macroquad display for the game.
pub struct MacroquadDisplay {
    pub viewport: Viewport,
    pub hud: Hud,
    /// Draw collision wireframes and the debug overlay
    pub dev_mode: bool,
}

impl MacroquadDisplay {
    /// Creates a display sized to the current window.
    pub fn new(dev_mode: bool) -> Self {
        Self {
            viewport: Viewport::new(screen_width(), screen_height()),
            hud: Hud::new(dev_mode),
            dev_mode,
        }
    }

    /// Picks up a window resize. Returns whether the size changed.
    pub fn handle_resize(&mut self) -> bool {
        self.viewport.resize(screen_width(), screen_height())
    }

    /// Renders one frame.
    pub fn render(&mut self, state: &GameState) {
        self.handle_resize();
        self.hud.prune(get_time());

        clear_background(tint_color(SKY_TINT, 1.0));
        set_camera(&self.viewport.camera(&state.player));

        for surface in state.world.collidables.surfaces() {
            self.draw_surface(surface);
        }
        for decoration in &state.world.decorations {
            draw_decoration(decoration);
        }
        let target = state.target().target;
        for object in state.assets.objects() {
            self.draw_object(object, target == Some(object.id));
        }

        set_default_camera();
        self.hud.draw(state);
    }

    fn draw_surface(&self, surface: &CollidableSurface) {
        let color = tint_color(surface.tint, 1.0);
        match surface.shape {
            SurfaceShape::Box(aabb) => {
                draw_cube(aabb.center(), aabb.size(), None, color);
                if self.dev_mode {
                    draw_cube_wires(aabb.center(), aabb.size(), RED);
                }
            }
            SurfaceShape::Plane(plane) => {
                draw_plane(plane.center, plane.size * 0.5, None, color);
            }
        }
    }

    fn draw_object(&self, object: &SearchableObject, targeted: bool) {
        let tint = if targeted { TARGET_TINT } else { OBJECT_TINT };
        let (center, size) = (object.bounds.center(), object.bounds.size());
        draw_cube(center, size, None, tint_color(tint, 1.0));

        if self.dev_mode {
            let wire = match object.tag {
                Tag::Key => GOLD,
                Tag::Treasure => PURPLE,
                Tag::None => DARKGRAY,
            };
            draw_cube_wires(center, size, wire);
        }
    }
}

fn draw_decoration(decoration: &Decoration) {
    match *decoration {
        Decoration::Roof {
            base,
            radius,
            height,
            tint,
        } => draw_cylinder(base, 0.0, radius, height, None, tint_color(tint, 1.0)),
        Decoration::Window { center, size, tint } => {
            draw_cube(center, vec3(size.x, size.y, 0.05), None, tint_color(tint, 0.6));
        }
        Decoration::Tree {
            base,
            trunk_height,
            crown_radius,
        } => {
            draw_cylinder(base, 0.25, 0.3, trunk_height, None, tint_color(TRUNK_TINT, 1.0));
            let crown = base + Vec3::Y * (trunk_height + crown_radius * 0.6);
            draw_sphere(crown, crown_radius, None, tint_color(FOLIAGE_TINT, 1.0));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tint_color_channels() {
        let color = tint_color(0x336699, 0.5);
        assert!((color.r - 0.2).abs() < 1e-6);
        assert!((color.g - 0.4).abs() < 1e-6);
        assert!((color.b - 0.6).abs() < 1e-6);
        assert_eq!(color.a, 0.5);
    }

    #[test]
    fn test_tint_color_ignores_high_bits() {
        assert_eq!(tint_color(0xff000000, 1.0), tint_color(0x000000, 1.0));
    }
}
