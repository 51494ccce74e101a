//! # Generation Module
//!
//! Procedural construction of the play area.
//!
//! - `placement`: non-overlapping random house centers
//! - `structure`: house shells (walls, floor, roof, window)
//! - `furnishing`: furniture layouts per room kind
//! - `scenery`: trees
//! - `town`: the complete layout, built from all of the above

pub mod furnishing;
pub mod placement;
pub mod scenery;
pub mod structure;
pub mod town;

pub use furnishing::*;
pub use placement::*;
pub use scenery::*;
pub use structure::*;
pub use town::*;

use crate::config::GameConfig;
use crate::world::OccupiedCenter;
use crate::KeyhuntResult;
use rand::rngs::StdRng;

/// Centers of the three houses that are always present, in order.
pub const FOUNDING_CENTERS: [OccupiedCenter; 3] = [
    OccupiedCenter { x: 0.0, z: 0.0 },
    OccupiedCenter { x: 16.0, z: 0.0 },
    OccupiedCenter { x: -18.0, z: 18.0 },
];

/// Trait for procedural generators.
///
/// Generators produce a plan from the configuration and a seeded RNG and can
/// check a plan against the invariants they promise.
pub trait Generator<T> {
    /// Generates content using the provided configuration and random number generator.
    fn generate(&self, config: &GameConfig, rng: &mut StdRng) -> KeyhuntResult<T>;

    /// Validates that the generated content meets requirements.
    fn validate(&self, content: &T, config: &GameConfig) -> KeyhuntResult<()>;

    /// Gets the generator type name for logging and debugging.
    fn generator_type(&self) -> &'static str;
}

/// Utility functions for generation algorithms.
pub mod utils {
    use super::*;
    use rand::SeedableRng;

    /// Creates a seeded random number generator from the config.
    pub fn create_rng(config: &GameConfig) -> StdRng {
        StdRng::seed_from_u64(config.seed)
    }
}
