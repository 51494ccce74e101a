//! # Town Generation
//!
//! Lays out the whole play area: the founding houses, the study, two
//! randomly placed houses, their furniture, the treasure and the trees.
//!
//! Generation produces a [`TownLayout`] plan without touching the session.
//! [`TownLayout::apply`] then registers the geometry and issues the asset
//! requests.

use super::furnishing::{RoomKind, TREASURE};
use super::placement::{Placement, PlacementService};
use super::scenery::SceneryGenerator;
use super::structure::{Structure, StructureBuilder, StructureStyle};
use super::{Generator, FOUNDING_CENTERS};
use crate::assets::{AssetRegistry, AssetRequest, Tag};
use crate::config::GameConfig;
use crate::world::{Decoration, OccupiedCenter, World};
use crate::{KeyhuntError, KeyhuntResult};
use log::info;
use rand::rngs::StdRng;

/// Center of the study, which is not recorded as an occupied center.
pub const STUDY_CENTER: OccupiedCenter = OccupiedCenter { x: 32.0, z: 0.0 };

/// One house in the plan.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedHouse {
    pub name: &'static str,
    pub kind: RoomKind,
    pub structure: Structure,
    /// Random placement details, for randomly placed houses
    pub placement: Option<Placement>,
}

/// Everything the town generator decided.
#[derive(Debug, Clone, PartialEq)]
pub struct TownLayout {
    pub houses: Vec<PlannedHouse>,
    /// Occupied centers in placement order, founding centers first
    pub centers: Vec<OccupiedCenter>,
    pub requests: Vec<AssetRequest>,
    pub scenery: Vec<Decoration>,
}

impl TownLayout {
    /// Registers the layout into the session: geometry into `world`, model
    /// loads into `assets`.
    pub fn apply(self, world: &mut World, assets: &mut AssetRegistry) {
        for center in self.centers {
            world.record_center(center);
        }
        for house in self.houses {
            info!(
                "House '{}' ({:?}) at ({:.1}, {:.1})",
                house.name, house.kind, house.structure.center.x, house.structure.center.z
            );
            house.structure.register(world);
        }
        for decoration in self.scenery {
            world.add_decoration(decoration);
        }
        assets.request_all(self.requests);
    }

    pub fn house(&self, name: &str) -> Option<&PlannedHouse> {
        self.houses.iter().find(|h| h.name == name)
    }

    pub fn count_tagged(&self, tag: Tag) -> usize {
        self.requests.iter().filter(|r| r.tag == tag).count()
    }
}

/// Generator for the complete town.
#[derive(Debug, Clone, Default)]
pub struct TownGenerator {
    pub builder: StructureBuilder,
}

impl TownGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    fn fixed_house(
        &self,
        name: &'static str,
        kind: RoomKind,
        center: OccupiedCenter,
        tint: u32,
    ) -> PlannedHouse {
        PlannedHouse {
            name,
            kind,
            structure: self.builder.build(center, StructureStyle::new(tint)),
            placement: None,
        }
    }

    fn random_house(
        &self,
        name: &'static str,
        kind: RoomKind,
        placement: Placement,
        tint: u32,
    ) -> PlannedHouse {
        PlannedHouse {
            placement: Some(placement),
            ..self.fixed_house(name, kind, placement.center, tint)
        }
    }
}

impl Generator<TownLayout> for TownGenerator {
    fn generate(&self, config: &GameConfig, rng: &mut StdRng) -> KeyhuntResult<TownLayout> {
        let placement = PlacementService::new(config.placement.clone());
        let mut centers = FOUNDING_CENTERS.to_vec();

        let mut houses = vec![
            self.fixed_house("living room", RoomKind::LivingRoom, FOUNDING_CENTERS[0], 0xf2b5b5),
            self.fixed_house("lounge", RoomKind::Lounge, FOUNDING_CENTERS[1], 0xf2c1c1),
            self.fixed_house("cottage", RoomKind::Cottage, FOUNDING_CENTERS[2], 0xb5d9f2),
            self.fixed_house("study", RoomKind::Study, STUDY_CENTER, 0xc1f2d1),
        ];

        let bathroom = placement.place(&mut centers, rng);
        houses.push(self.random_house("bathroom", RoomKind::Bathroom, bathroom, 0xd1c1f2));

        let bedroom = placement.place(&mut centers, rng);
        houses.push(self.random_house(
            "bedroom",
            RoomKind::BedroomStorage,
            bedroom,
            0xf2e2b5,
        ));

        let mut requests: Vec<AssetRequest> = houses
            .iter()
            .flat_map(|house| house.kind.requests(house.structure.center))
            .collect();
        requests.push(TREASURE.request_at(bedroom.center));

        let scenery = SceneryGenerator.generate(config, rng)?;

        let layout = TownLayout {
            houses,
            centers,
            requests,
            scenery,
        };
        self.validate(&layout, config)?;
        Ok(layout)
    }

    fn validate(&self, content: &TownLayout, config: &GameConfig) -> KeyhuntResult<()> {
        for tag in [Tag::Key, Tag::Treasure] {
            let count = content.count_tagged(tag);
            if count != 1 {
                return Err(KeyhuntError::GenerationFailed(format!(
                    "expected exactly one {:?} object, found {}",
                    tag, count
                )));
            }
        }

        let founding = FOUNDING_CENTERS.len();
        let min_distance = config.placement.min_distance;
        for house in content.houses.iter().filter(|h| h.placement.is_some()) {
            let center = house.structure.center;
            let Some(index) = content.centers.iter().position(|c| *c == center) else {
                return Err(KeyhuntError::GenerationFailed(format!(
                    "house '{}' has no recorded center",
                    house.name
                )));
            };
            let relaxed = house.placement.map_or(false, |p| p.relaxed);
            if index < founding || relaxed {
                continue;
            }
            if let Some(prior) = content.centers[..index]
                .iter()
                .find(|prior| prior.distance(center) < min_distance)
            {
                return Err(KeyhuntError::GenerationFailed(format!(
                    "house '{}' is {:.2} units from ({:.1}, {:.1})",
                    house.name,
                    prior.distance(center),
                    prior.x,
                    prior.z
                )));
            }
        }

        SceneryGenerator.validate(&content.scenery, config)
    }

    fn generator_type(&self) -> &'static str {
        "TownGenerator"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::utils::create_rng;
    use macroquad::math::Vec3;

    fn layout(seed: u64) -> TownLayout {
        let config = GameConfig::for_testing(seed);
        TownGenerator::new()
            .generate(&config, &mut create_rng(&config))
            .unwrap()
    }

    #[test]
    fn test_town_has_six_houses_and_five_centers() {
        let town = layout(12345);
        assert_eq!(town.houses.len(), 6);
        assert_eq!(town.centers.len(), 5);
        assert_eq!(&town.centers[..3], &FOUNDING_CENTERS[..]);
        assert!(!town.centers.contains(&STUDY_CENTER));
    }

    #[test]
    fn test_random_houses_keep_distance() {
        for seed in 0..20 {
            let town = layout(seed);
            for (i, center) in town.centers.iter().enumerate().skip(3) {
                for prior in &town.centers[..i] {
                    assert!(center.distance(*prior) >= 18.0, "seed {}", seed);
                }
            }
        }
    }

    #[test]
    fn test_treasure_is_in_bedroom() {
        let town = layout(99);
        let bedroom = town.house("bedroom").unwrap();
        let treasure = town
            .requests
            .iter()
            .find(|r| r.tag == Tag::Treasure)
            .unwrap();
        let expected = bedroom.structure.center.to_world(0.0) + Vec3::new(1.2, 0.0, -1.0);
        assert!((treasure.transform.position - expected).length() < 1e-4);
        assert_eq!(town.count_tagged(Tag::Key), 1);
    }

    #[test]
    fn test_same_seed_same_layout() {
        let a = layout(7);
        let b = layout(7);
        assert_eq!(a.centers, b.centers);
        assert_eq!(a.scenery, b.scenery);
    }

    #[test]
    fn test_validate_rejects_missing_key() {
        let config = GameConfig::for_testing(1);
        let mut town = layout(1);
        town.requests.retain(|r| r.tag != Tag::Key);
        assert!(TownGenerator::new().validate(&town, &config).is_err());
    }

    #[test]
    fn test_validate_rejects_crowded_house() {
        let config = GameConfig::for_testing(1);
        let mut town = layout(1);
        let bathroom = town.houses.iter().position(|h| h.name == "bathroom").unwrap();
        let crowded = OccupiedCenter::new(2.0, 2.0);
        let index = town
            .centers
            .iter()
            .position(|c| *c == town.houses[bathroom].structure.center)
            .unwrap();
        town.centers[index] = crowded;
        town.houses[bathroom].structure.center = crowded;
        assert!(TownGenerator::new().validate(&town, &config).is_err());
    }

    #[test]
    fn test_validate_rejects_tree_in_clearing() {
        let config = GameConfig::for_testing(1);
        let mut town = layout(1);
        town.scenery.push(Decoration::Tree {
            base: Vec3::new(1.0, 0.0, -1.0),
            trunk_height: 2.0,
            crown_radius: 1.2,
        });
        assert!(matches!(
            TownGenerator::new().validate(&town, &config),
            Err(KeyhuntError::GenerationFailed(_))
        ));
    }
}
