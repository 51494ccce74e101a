//! # Keyhunt
//!
//! A first-person exploration game: walk between procedurally placed houses,
//! search the furniture inside them, find the key and unlock the treasure.
//!
//! ## Architecture Overview
//!
//! The crate is split so that every piece of game logic can run without a
//! window. Only `rendering`, `input` and `scenes` touch the window; the rest
//! borrows macroquad's math types and nothing else.
//!
//! - **World**: geometry primitives, collidable surfaces and scene decoration
//! - **Generation**: house placement, structure shells, furnishing and scenery
//! - **Assets**: asynchronous loading of searchable objects and role binding
//! - **Game**: movement and collision, proximity targeting, win-state machine
//! - **Input / Rendering / Scenes**: the macroquad front end
//!
//! All session state lives in [`GameState`], which owns the registries and
//! is passed by reference to each component.

pub mod assets;
pub mod config;
pub mod game;
pub mod generation;
pub mod input;
pub mod rendering;
pub mod scenes;
pub mod world;

pub use assets::*;
pub use config::*;
pub use game::*;
pub use generation::*;
pub use input::*;
pub use rendering::*;
pub use world::*;

pub use scenes::{SceneManager, SceneType};

/// Core error type for the Keyhunt engine.
#[derive(thiserror::Error, Debug)]
pub enum KeyhuntError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Game state is invalid
    #[error("Invalid game state: {0}")]
    InvalidState(String),

    /// Configuration value out of range
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// An asset could not be loaded
    #[error("Failed to load asset '{path}': {reason}")]
    AssetLoad { path: String, reason: String },

    /// Generation failed
    #[error("Generation failed: {0}")]
    GenerationFailed(String),

    /// Async runtime could not be started
    #[error("Runtime error: {0}")]
    Runtime(String),
}

/// Result type used throughout the Keyhunt codebase.
pub type KeyhuntResult<T> = Result<T, KeyhuntError>;

/// Version information for the game.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Gameplay constants shared by the defaults in [`GameConfig`].
pub mod constants {
    /// Walking speed in world units per second
    pub const DEFAULT_MOVE_SPEED: f32 = 6.0;

    /// Simulated duration of one frame tick in seconds
    pub const DEFAULT_TICK_SECONDS: f32 = 0.016;

    /// A move is reverted when the nearest wall along it is closer than this
    pub const COLLISION_MARGIN: f32 = 0.4;

    /// Maximum distance to an object's bounds center for it to be searchable
    pub const INTERACTION_RANGE: f32 = 1.8;

    /// Camera height above the ground
    pub const EYE_HEIGHT: f32 = 1.6;

    /// Minimum distance between house centers
    pub const HOUSE_MIN_DISTANCE: f32 = 18.0;

    /// Half side of the square random houses are sampled from
    pub const HOUSE_REGION_HALF_EXTENT: f32 = 40.0;

    /// Side of the square ground plane
    pub const GROUND_SIZE: f32 = 200.0;

    /// Seconds to wait for tagged loads before binding roles anyway
    pub const ROLE_RESOLUTION_TIMEOUT_SECS: f32 = 5.0;
}
