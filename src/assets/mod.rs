//! # Assets Module
//!
//! Searchable objects and the asynchronous pipeline that produces them.
//!
//! Furniture is requested synchronously while the town is generated, but an
//! object only exists once its load completes. Completion order is
//! unspecified, so nothing in this module depends on request order.

pub mod loader;
pub mod registry;

pub use loader::*;
pub use registry::*;

use crate::world::Aabb;
use macroquad::math::Vec3;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Semantic role attached to an object when it is requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Tag {
    #[default]
    None,
    Key,
    Treasure,
}

impl Tag {
    /// Whether the object takes part in role binding.
    pub fn is_role(self) -> bool {
        !matches!(self, Tag::None)
    }
}

/// Unique identifier of a loaded object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObjectId(pub Uuid);

impl ObjectId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ObjectId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Placement of a loaded model in the world.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AssetTransform {
    pub position: Vec3,
    /// Uniform scale
    pub scale: f32,
    /// Rotation about the vertical axis in radians
    pub rotation_y: f32,
}

impl AssetTransform {
    pub fn new(position: Vec3, scale: f32, rotation_y: f32) -> Self {
        Self {
            position,
            scale,
            rotation_y,
        }
    }

    /// Unscaled, unrotated placement at `position`.
    pub fn at(position: Vec3) -> Self {
        Self::new(position, 1.0, 0.0)
    }
}

/// A request to load one model.
#[derive(Debug, Clone, PartialEq)]
pub struct AssetRequest {
    pub path: String,
    pub transform: AssetTransform,
    pub tag: Tag,
}

impl AssetRequest {
    pub fn new(path: impl Into<String>, transform: AssetTransform, tag: Tag) -> Self {
        Self {
            path: path.into(),
            transform,
            tag,
        }
    }
}

/// A loaded object the player can search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchableObject {
    pub id: ObjectId,
    pub path: String,
    pub transform: AssetTransform,
    pub tag: Tag,
    /// World-space bounds after the transform is applied
    pub bounds: Aabb,
}

impl SearchableObject {
    /// Instantiates a loaded asset at the requested transform.
    pub fn instantiate(request: &AssetRequest, asset: &LoadedAsset) -> Self {
        let t = request.transform;
        Self {
            id: ObjectId::new(),
            path: request.path.clone(),
            transform: t,
            tag: request.tag,
            bounds: asset.local_bounds.transformed(t.scale, t.rotation_y, t.position),
        }
    }

    /// Center of the world-space bounds.
    pub fn bounds_center(&self) -> Vec3 {
        self.bounds.center()
    }

    /// Short display name derived from the asset path.
    pub fn display_name(&self) -> &str {
        std::path::Path::new(&self.path)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(&self.path)
    }
}
