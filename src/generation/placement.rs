//! # House Placement
//!
//! Rejection sampling of house centers on the ground plane.
//!
//! A candidate is drawn uniformly from a square region and accepted when it
//! keeps `min_distance` from every recorded center. Sampling is bounded: after
//! `max_attempts` rejections the region is widened, and once every widening
//! is spent the candidate farthest from its nearest neighbour is accepted
//! with a warning.

use crate::config::PlacementConfig;
use crate::world::OccupiedCenter;
use log::{debug, warn};
use rand::rngs::StdRng;
use rand::Rng;

/// Outcome of a placement request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub center: OccupiedCenter,
    /// Candidates drawn in total
    pub attempts: u32,
    /// Times the sampling region was widened
    pub widenings: u32,
    /// True when no candidate satisfied the distance constraint
    pub relaxed: bool,
}

/// Stateful placement service: every accepted center is appended to the
/// collection it was checked against.
#[derive(Debug, Clone)]
pub struct PlacementService {
    pub config: PlacementConfig,
}

impl PlacementService {
    pub fn new(config: PlacementConfig) -> Self {
        Self { config }
    }

    /// Picks a new center at least `min_distance` from all of `centers` and
    /// appends it to `centers`.
    pub fn place(&self, centers: &mut Vec<OccupiedCenter>, rng: &mut StdRng) -> Placement {
        let min_distance = self.config.min_distance;
        let mut half_extent = self.config.region_half_extent;
        let mut attempts = 0;
        let mut best: Option<(OccupiedCenter, f32)> = None;

        for widenings in 0..=self.config.max_widenings {
            for _ in 0..self.config.max_attempts {
                attempts += 1;
                let candidate = OccupiedCenter::new(
                    rng.gen_range(-half_extent..half_extent),
                    rng.gen_range(-half_extent..half_extent),
                );
                let clearance = nearest_distance(candidate, centers);

                if clearance >= min_distance {
                    debug!(
                        "Placed center ({:.2}, {:.2}) after {} attempts",
                        candidate.x, candidate.z, attempts
                    );
                    centers.push(candidate);
                    return Placement {
                        center: candidate,
                        attempts,
                        widenings,
                        relaxed: false,
                    };
                }

                if best.map_or(true, |(_, d)| clearance > d) {
                    best = Some((candidate, clearance));
                }
            }

            if widenings < self.config.max_widenings {
                half_extent *= self.config.widen_factor;
                warn!(
                    "No center {} units clear after {} attempts, widening region to {:.1}",
                    min_distance, attempts, half_extent
                );
            }
        }

        let (center, clearance) = best.unwrap_or((OccupiedCenter::new(0.0, 0.0), 0.0));
        warn!(
            "Placement exhausted after {} attempts; accepting ({:.2}, {:.2}) with clearance {:.2}",
            attempts, center.x, center.z, clearance
        );
        centers.push(center);
        Placement {
            center,
            attempts,
            widenings: self.config.max_widenings,
            relaxed: true,
        }
    }
}

/// Distance from `point` to the closest of `centers`, or infinity.
pub fn nearest_distance(point: OccupiedCenter, centers: &[OccupiedCenter]) -> f32 {
    centers
        .iter()
        .map(|c| point.distance(*c))
        .fold(f32::INFINITY, f32::min)
}
