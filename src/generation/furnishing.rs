//! # Furnishing
//!
//! Declarative furniture layouts for each kind of room. Offsets are relative
//! to the house center; every piece becomes one asset request.

use crate::assets::{AssetRequest, AssetTransform, Tag};
use crate::world::OccupiedCenter;
use macroquad::math::Vec3;
use std::f32::consts::{FRAC_PI_2, PI};

/// One piece of furniture in a room layout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FurnitureSpec {
    pub path: &'static str,
    /// Offset from the house center
    pub offset: [f32; 3],
    pub rotation_y: f32,
    pub tag: Tag,
}

impl FurnitureSpec {
    const fn new(path: &'static str, offset: [f32; 3], rotation_y: f32) -> Self {
        Self {
            path,
            offset,
            rotation_y,
            tag: Tag::None,
        }
    }

    const fn tagged(self, tag: Tag) -> Self {
        Self { tag, ..self }
    }

    /// Request for this piece in the house centered on `center`.
    pub fn request_at(&self, center: OccupiedCenter) -> AssetRequest {
        let position = center.to_world(0.0) + Vec3::from_array(self.offset);
        AssetRequest::new(
            self.path,
            AssetTransform::new(position, 1.0, self.rotation_y),
            self.tag,
        )
    }
}

/// The purpose of a house, which decides its furniture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoomKind {
    LivingRoom,
    Lounge,
    Cottage,
    Study,
    Bathroom,
    BedroomStorage,
}

impl RoomKind {
    pub const ALL: [RoomKind; 6] = [
        RoomKind::LivingRoom,
        RoomKind::Lounge,
        RoomKind::Cottage,
        RoomKind::Study,
        RoomKind::Bathroom,
        RoomKind::BedroomStorage,
    ];

    pub fn furniture(self) -> &'static [FurnitureSpec] {
        match self {
            RoomKind::LivingRoom => LIVING_ROOM,
            RoomKind::Lounge => LOUNGE,
            RoomKind::Cottage => COTTAGE,
            RoomKind::Study => STUDY,
            RoomKind::Bathroom => BATHROOM,
            RoomKind::BedroomStorage => BEDROOM_STORAGE,
        }
    }

    /// Asset requests furnishing a house of this kind at `center`.
    pub fn requests(self, center: OccupiedCenter) -> Vec<AssetRequest> {
        self.furniture()
            .iter()
            .map(|spec| spec.request_at(center))
            .collect()
    }
}

const MODELS: &str = "assets/models/";

macro_rules! model {
    ($name:literal) => {
        concat!("assets/models/", $name, ".glb")
    };
}

/// The chest that must be unlocked with the key.
pub const TREASURE: FurnitureSpec =
    FurnitureSpec::new(model!("tableCoffee"), [1.2, 0.0, -1.0], 0.0).tagged(Tag::Treasure);

const LIVING_ROOM: &[FurnitureSpec] = &[
    FurnitureSpec::new(model!("bedSingle"), [-2.0, 0.0, -3.0], FRAC_PI_2),
    FurnitureSpec::new(model!("bathroomCabinet"), [0.0, 0.0, 3.0], PI),
    FurnitureSpec::new(model!("chair"), [2.0, 0.0, -1.0], 0.0).tagged(Tag::Key),
    FurnitureSpec::new(model!("loungeSofa"), [-1.0, 0.0, 1.0], PI),
    FurnitureSpec::new(model!("tableCoffee"), [-1.0, 0.0, 0.0], 0.0),
    FurnitureSpec::new(model!("rugRectangle"), [-1.0, 0.01, 0.0], 0.0),
    FurnitureSpec::new(model!("plantSmall1"), [3.0, 0.0, 3.0], 0.0),
];

const LOUNGE: &[FurnitureSpec] = &[
    FurnitureSpec::new(model!("loungeSofa"), [-1.0, 0.0, 1.0], PI),
    FurnitureSpec::new(model!("loungeChair"), [2.0, 0.0, -1.0], 0.0),
    FurnitureSpec::new(model!("rugRectangle"), [0.0, 0.01, 0.0], 0.0),
    FurnitureSpec::new(model!("plantSmall2"), [3.0, 0.0, 3.0], 0.0),
];

const COTTAGE: &[FurnitureSpec] = &[
    FurnitureSpec::new(model!("loungeSofa"), [-1.0, 0.0, 0.0], PI),
    FurnitureSpec::new(model!("tableCoffee"), [0.0, 0.0, -1.5], 0.0),
    FurnitureSpec::new(model!("plantSmall3"), [3.0, 0.0, 3.0], 0.0),
];

const STUDY: &[FurnitureSpec] = &[
    // Desk against the right wall
    FurnitureSpec::new(model!("desk"), [3.2, 0.0, 0.0], -FRAC_PI_2),
    FurnitureSpec::new(model!("computerScreen"), [3.05, 0.85, 0.0], -FRAC_PI_2),
    FurnitureSpec::new(model!("computerKeyboard"), [2.9, 0.82, 0.15], -FRAC_PI_2),
    FurnitureSpec::new(model!("computerMouse"), [2.85, 0.82, -0.15], -FRAC_PI_2),
    FurnitureSpec::new(model!("lampRoundTable"), [3.0, 0.85, -0.6], 0.0),
    FurnitureSpec::new(model!("chairDesk"), [2.3, 0.0, 0.0], PI),
    // Chairs along the left wall
    FurnitureSpec::new(model!("chair"), [-3.0, 0.0, -1.5], FRAC_PI_2),
    FurnitureSpec::new(model!("chairCushion"), [-3.0, 0.0, 0.0], FRAC_PI_2),
    FurnitureSpec::new(model!("chairRounded"), [-3.0, 0.0, 1.5], FRAC_PI_2),
    // Coat racks by the door
    FurnitureSpec::new(model!("coatRack"), [-1.5, 0.0, 3.0], 0.0),
    FurnitureSpec::new(model!("coatRackStanding"), [1.5, 0.0, 3.0], 0.0),
    FurnitureSpec::new(model!("loungeChair"), [2.0, 0.0, -2.0], 0.0),
];

const BATHROOM: &[FurnitureSpec] = &[
    FurnitureSpec::new(model!("bathroomSink"), [-3.0, 0.0, -2.0], FRAC_PI_2),
    FurnitureSpec::new(model!("bathroomMirror"), [-3.0, 1.6, -2.05], FRAC_PI_2),
    FurnitureSpec::new(model!("bathroomCabinet"), [-3.0, 0.0, 1.0], FRAC_PI_2),
    FurnitureSpec::new(model!("bathroomCabinetDrawer"), [-2.0, 0.0, 1.0], FRAC_PI_2),
    FurnitureSpec::new(model!("bathtub"), [3.0, 0.0, 0.0], -FRAC_PI_2),
    FurnitureSpec::new(model!("bathroomSinkSquare"), [0.0, 0.0, -3.0], PI),
];

const BEDROOM_STORAGE: &[FurnitureSpec] = &[
    FurnitureSpec::new(model!("bookcaseOpenLow"), [-3.0, 0.0, -2.0], FRAC_PI_2),
    FurnitureSpec::new(model!("books"), [-3.0, 1.1, -2.0], FRAC_PI_2),
    FurnitureSpec::new(model!("cabinetBed"), [0.0, 0.0, 3.0], PI),
    FurnitureSpec::new(model!("cabinetBedDrawer"), [1.2, 0.0, 3.0], PI),
    FurnitureSpec::new(model!("cabinetBedDrawerTable"), [-1.2, 0.0, 3.0], PI),
    FurnitureSpec::new(model!("cabinetTelevision"), [3.0, 0.0, -1.0], -FRAC_PI_2),
    FurnitureSpec::new(model!("cabinetTelevisionDoors"), [3.0, 0.0, 1.0], -FRAC_PI_2),
    FurnitureSpec::new(model!("cardboardBoxClosed"), [-2.5, 0.0, 2.0], 0.0),
    FurnitureSpec::new(model!("cardboardBoxOpen"), [-1.5, 0.0, 2.0], 0.0),
];

/// Every distinct model path used by the layouts.
pub fn all_furniture_paths() -> Vec<&'static str> {
    let mut paths: Vec<&'static str> = RoomKind::ALL
        .iter()
        .flat_map(|kind| kind.furniture().iter().map(|spec| spec.path))
        .chain(std::iter::once(TREASURE.path))
        .collect();
    paths.sort_unstable();
    paths.dedup();
    paths
}

/// Whether `path` points into the model directory.
pub fn is_model_path(path: &str) -> bool {
    path.starts_with(MODELS) && path.ends_with(".glb")
}
