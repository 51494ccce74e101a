//! # Proximity Interaction
//!
//! Finds the object the player can currently search. The target is
//! recomputed from scratch every tick and is never stored between ticks.

use crate::assets::{ObjectId, SearchableObject};
use macroquad::math::Vec3;

/// The object within reach this tick, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InteractionTarget {
    pub target: Option<ObjectId>,
}

impl InteractionTarget {
    pub fn none() -> Self {
        Self::default()
    }

    /// Whether the interaction hint should be shown.
    pub fn can_interact(&self) -> bool {
        self.target.is_some()
    }
}

/// Scans searchable objects for one within interaction range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProximityResolver {
    pub range: f32,
}

impl ProximityResolver {
    pub fn new(range: f32) -> Self {
        Self { range }
    }

    /// Returns the first object, in registry order, whose bounds center is
    /// strictly closer than `range` to `viewpoint`.
    ///
    /// This is not the nearest object: the scan stops at the first match.
    pub fn resolve(&self, viewpoint: Vec3, objects: &[SearchableObject]) -> InteractionTarget {
        InteractionTarget {
            target: objects
                .iter()
                .find(|object| object.bounds_center().distance(viewpoint) < self.range)
                .map(|object| object.id),
        }
    }
}
