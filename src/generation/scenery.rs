//! # Scenery
//!
//! Trees scattered around the town. They are decoration only: the player
//! can walk through them.

use super::Generator;
use crate::config::{GameConfig, SceneryConfig};
use crate::world::Decoration;
use crate::{KeyhuntError, KeyhuntResult};
use log::warn;
use macroquad::math::Vec3;
use rand::rngs::StdRng;
use rand::Rng;

/// Candidates tried per tree before it is skipped.
const MAX_TREE_ATTEMPTS: u32 = 100;

/// Generator for the trees around the town.
#[derive(Debug, Clone, Copy, Default)]
pub struct SceneryGenerator;

impl Generator<Vec<Decoration>> for SceneryGenerator {
    fn generate(&self, config: &GameConfig, rng: &mut StdRng) -> KeyhuntResult<Vec<Decoration>> {
        Ok(scatter_trees(&config.scenery, rng))
    }

    fn validate(&self, content: &Vec<Decoration>, config: &GameConfig) -> KeyhuntResult<()> {
        let clearing = config.scenery.tree_clearing;
        for decoration in content {
            if let Decoration::Tree { base, .. } = decoration {
                if base.x.abs() < clearing && base.z.abs() < clearing {
                    return Err(KeyhuntError::GenerationFailed(format!(
                        "tree at ({:.2}, {:.2}) is inside the clearing",
                        base.x, base.z
                    )));
                }
            }
        }
        Ok(())
    }

    fn generator_type(&self) -> &'static str {
        "SceneryGenerator"
    }
}

/// Scatters trees outside the clearing around the origin.
pub fn scatter_trees(config: &SceneryConfig, rng: &mut StdRng) -> Vec<Decoration> {
    let mut trees = Vec::with_capacity(config.tree_count as usize);
    let region = config.tree_region;

    for index in 0..config.tree_count {
        let spot = (0..MAX_TREE_ATTEMPTS).find_map(|_| {
            let x = rng.gen_range(-region..region);
            let z = rng.gen_range(-region..region);
            let in_clearing = x.abs() < config.tree_clearing && z.abs() < config.tree_clearing;
            (!in_clearing).then_some((x, z))
        });

        match spot {
            Some((x, z)) => trees.push(Decoration::Tree {
                base: Vec3::new(x, 0.0, z),
                trunk_height: 2.0,
                crown_radius: 1.2,
            }),
            None => warn!("No spot found for tree {}, skipping", index),
        }
    }

    trees
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_trees_avoid_clearing() {
        let config = SceneryConfig::default();
        let mut rng = StdRng::seed_from_u64(4242);
        let trees = scatter_trees(&config, &mut rng);

        assert_eq!(trees.len(), 8);
        for tree in trees {
            let Decoration::Tree { base, .. } = tree else {
                panic!("expected a tree");
            };
            assert!(!(base.x.abs() < 8.0 && base.z.abs() < 8.0));
            assert!(base.x.abs() <= 35.0 && base.z.abs() <= 35.0);
        }
    }

    #[test]
    fn test_scenery_generator_validates_clearing() {
        let config = GameConfig::for_testing(3);
        let mut rng = StdRng::seed_from_u64(3);
        let trees = SceneryGenerator.generate(&config, &mut rng).unwrap();
        assert!(SceneryGenerator.validate(&trees, &config).is_ok());

        let bad = vec![Decoration::Tree {
            base: Vec3::ZERO,
            trunk_height: 2.0,
            crown_radius: 1.2,
        }];
        assert!(SceneryGenerator.validate(&bad, &config).is_err());
    }

    #[test]
    fn test_no_trees_requested() {
        let config = SceneryConfig {
            tree_count: 0,
            ..SceneryConfig::default()
        };
        let mut rng = StdRng::seed_from_u64(1);
        assert!(scatter_trees(&config, &mut rng).is_empty());
    }
}
