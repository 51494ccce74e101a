//! # Game State Module
//!
//! The session: one struct owning every registry and state field, driven by
//! the frame loop through [`GameState::handle_input`] and [`GameState::tick`].
//!
//! Per tick, in order:
//! 1. finished asset loads are applied and roles bound once ready
//! 2. the player moves, if the pointer is captured and the game is not won
//! 3. the interaction target is recomputed from the new position

use super::interaction::{InteractionTarget, ProximityResolver};
use super::movement::{MoveOutcome, MovementController};
use super::player::Player;
use super::progress::{GamePhase, InteractOutcome, Progress};
use crate::assets::{AssetLoader, AssetRegistry, ObjectId, RoleReport};
use crate::config::GameConfig;
use crate::constants::GROUND_SIZE;
use crate::generation::{utils::create_rng, Generator, TownGenerator};
use crate::input::{MovementKeys, PlayerInput};
use crate::world::World;
use crate::KeyhuntResult;
use log::{debug, info};
use std::sync::Arc;
use std::time::Instant;
use tokio::runtime::Handle;

/// Something that happened during input handling or a tick.
///
/// The front end turns these into notifications, cursor grabs and screens.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    InputCaptured,
    InputReleased,
    /// A move was reverted at the collision margin
    MoveBlocked { distance: f32 },
    TargetChanged { target: Option<ObjectId> },
    /// Searchable objects arrived this tick
    AssetsLoaded { count: usize },
    RolesResolved(RoleReport),
    Interacted(InteractOutcome),
    Won,
    QuitRequested,
}

/// Summary of the generated town, for logging and the dev overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TownSummary {
    pub houses: usize,
    pub requests: usize,
    pub relaxed_placements: usize,
}

/// All state for one play session.
pub struct GameState {
    pub config: GameConfig,
    pub world: World,
    pub assets: AssetRegistry,
    pub player: Player,
    pub keys: MovementKeys,
    movement: MovementController,
    resolver: ProximityResolver,
    progress: Progress,
    target: InteractionTarget,
    input_captured: bool,
}

impl GameState {
    /// Creates a session with only the ground plane and no objects.
    pub fn new(
        config: GameConfig,
        loader: Arc<dyn AssetLoader>,
        runtime: Handle,
    ) -> KeyhuntResult<Self> {
        config.validate()?;
        let player = Player::looking_at(config.spawn.position(), config.spawn.look_at());
        Ok(Self {
            movement: MovementController::from_config(&config.movement),
            resolver: ProximityResolver::new(config.interaction.range),
            world: World::with_ground(GROUND_SIZE),
            assets: AssetRegistry::new(loader, runtime),
            player,
            keys: MovementKeys::default(),
            progress: Progress::new(),
            target: InteractionTarget::none(),
            input_captured: false,
            config,
        })
    }

    /// Creates a session and generates the town into it.
    pub fn start(
        config: GameConfig,
        loader: Arc<dyn AssetLoader>,
        runtime: Handle,
        now: Instant,
    ) -> KeyhuntResult<Self> {
        info!("Starting session with seed {}", config.seed);
        let mut state = Self::new(config, loader, runtime)?;
        let summary = state.generate_town(now)?;
        info!(
            "Town ready: {} houses, {} objects requested",
            summary.houses, summary.requests
        );
        Ok(state)
    }

    /// Generates and applies the town, then seals the asset registry so
    /// roles bind once the tagged loads have settled.
    pub fn generate_town(&mut self, now: Instant) -> KeyhuntResult<TownSummary> {
        let generator = TownGenerator::new();
        let mut rng = create_rng(&self.config);
        let layout = generator.generate(&self.config, &mut rng)?;

        let summary = TownSummary {
            houses: layout.houses.len(),
            requests: layout.requests.len(),
            relaxed_placements: layout
                .houses
                .iter()
                .filter(|h| h.placement.map_or(false, |p| p.relaxed))
                .count(),
        };
        layout.apply(&mut self.world, &mut self.assets);
        self.assets.seal(now, self.config.role_resolution_timeout());
        Ok(summary)
    }

    /// Applies one input event.
    pub fn handle_input(&mut self, input: PlayerInput) -> Vec<GameEvent> {
        let mut events = Vec::new();
        if input == PlayerInput::Quit {
            events.push(GameEvent::QuitRequested);
            return events;
        }
        if self.has_won() {
            return events;
        }

        match input {
            PlayerInput::Move { key, pressed } => self.keys.set(key, pressed),
            PlayerInput::Look { dx, dy } => {
                if self.input_captured {
                    let sensitivity = self.config.movement.mouse_sensitivity;
                    self.player.rotate(-dx * sensitivity, -dy * sensitivity);
                }
            }
            PlayerInput::Interact => {
                let outcome = self.interact();
                events.push(GameEvent::Interacted(outcome));
                if outcome == InteractOutcome::Won {
                    if self.set_input_captured(false) {
                        events.push(GameEvent::InputReleased);
                    }
                    events.push(GameEvent::Won);
                }
            }
            PlayerInput::Capture => {
                if self.set_input_captured(true) {
                    events.push(GameEvent::InputCaptured);
                }
            }
            PlayerInput::Release => {
                if self.set_input_captured(false) {
                    events.push(GameEvent::InputReleased);
                }
            }
            PlayerInput::Quit => {}
        }
        events
    }

    /// Runs one simulation tick of `dt` seconds.
    pub fn tick(&mut self, dt: f32, now: Instant) -> Vec<GameEvent> {
        let mut events = Vec::new();

        let arrived = self.assets.poll();
        if arrived > 0 {
            events.push(GameEvent::AssetsLoaded { count: arrived });
        }
        if let Some(report) = self.assets.update_roles(now) {
            events.push(GameEvent::RolesResolved(report));
        }

        if self.input_captured && !self.has_won() {
            let outcome =
                self.movement
                    .tick(&mut self.player, &self.keys, dt, &self.world.collidables);
            if let MoveOutcome::Blocked { hit } = outcome {
                debug!("Move blocked at {:.3}", hit.distance);
                events.push(GameEvent::MoveBlocked {
                    distance: hit.distance,
                });
            }
        }

        let target = self
            .resolver
            .resolve(self.player.position, self.assets.objects());
        if target != self.target {
            self.target = target;
            events.push(GameEvent::TargetChanged {
                target: target.target,
            });
        }

        events
    }

    /// Interacts with the current target.
    pub fn interact(&mut self) -> InteractOutcome {
        let outcome = self.progress.interact(self.target, self.assets.roles());
        if let Some(id) = self.target.target {
            let name = self
                .assets
                .get(id)
                .map_or("unknown object", |o| o.display_name());
            info!("Interacted with {}: {:?}", name, outcome);
        } else {
            info!("Interacted with nothing: {:?}", outcome);
        }
        outcome
    }

    /// Sets pointer capture. Returns whether the flag changed.
    ///
    /// Capture cannot be taken once the game is won. Releasing also drops
    /// any held movement keys.
    pub fn set_input_captured(&mut self, captured: bool) -> bool {
        if captured && self.has_won() {
            return false;
        }
        if self.input_captured == captured {
            return false;
        }
        self.input_captured = captured;
        if !captured {
            self.keys.clear();
        }
        debug!("Input captured: {}", captured);
        true
    }

    pub fn is_input_captured(&self) -> bool {
        self.input_captured
    }

    pub fn phase(&self) -> GamePhase {
        self.progress.phase()
    }

    pub fn has_key(&self) -> bool {
        self.phase().has_key()
    }

    pub fn has_won(&self) -> bool {
        self.phase().has_won()
    }

    pub fn target(&self) -> InteractionTarget {
        self.target
    }

    pub fn can_interact(&self) -> bool {
        self.target.can_interact()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::{AssetCatalog, AssetRequest, AssetTransform, CatalogAssetLoader, Tag};
    use crate::input::MoveKey;
    use macroquad::math::Vec3;
    use std::time::Duration;

    const TICK: f32 = 0.016;

    fn loader() -> Arc<dyn AssetLoader> {
        Arc::new(CatalogAssetLoader::new(
            AssetCatalog::builtin().unwrap(),
            ".",
            false,
        ))
    }

    fn empty_session() -> GameState {
        GameState::new(GameConfig::for_testing(1), loader(), Handle::current()).unwrap()
    }

    /// Places `path` so that its bounds center lands at `center`.
    fn request_centered(state: &mut GameState, path: &str, center: Vec3, tag: Tag) {
        let catalog = AssetCatalog::builtin().unwrap();
        let local = catalog.lookup(path).unwrap().to_aabb().center();
        let transform = AssetTransform::at(center - local);
        state.assets.request(AssetRequest::new(path, transform, tag));
    }

    /// Session with the viewpoint at the origin, the key chair 1.0 away and
    /// the treasure table 5.0 away, roles bound.
    async fn key_and_treasure_session() -> GameState {
        let mut state = empty_session();
        state.player = Player::new(Vec3::ZERO);
        request_centered(&mut state, "assets/models/chair.glb", Vec3::new(1.0, 0.0, 0.0), Tag::Key);
        request_centered(
            &mut state,
            "assets/models/tableCoffee.glb",
            Vec3::new(0.0, 0.0, 5.0),
            Tag::Treasure,
        );
        let now = Instant::now();
        state.assets.seal(now, Duration::from_secs(5));
        state.assets.settle().await;
        state.tick(TICK, now);
        state
    }

    #[tokio::test]
    async fn test_new_session_spawns_looking_at_town() {
        let state = empty_session();
        assert_eq!(state.player.position, Vec3::new(0.0, 1.6, 30.0));
        assert!(state.player.forward().abs_diff_eq(Vec3::NEG_Z, 1e-6));
        assert_eq!(state.phase(), GamePhase::Exploring);
        assert!(!state.is_input_captured());
        assert_eq!(state.world.collidables.len(), 1);
    }

    #[tokio::test]
    async fn test_invalid_config_is_rejected() {
        let mut config = GameConfig::for_testing(1);
        config.movement.speed = 0.0;
        assert!(GameState::new(config, loader(), Handle::current()).is_err());
    }

    #[tokio::test]
    async fn test_close_key_is_targeted_over_far_treasure() {
        let mut state = key_and_treasure_session().await;
        let key = state.assets.roles().key;
        assert!(key.is_some());
        assert_eq!(state.target().target, key);

        let events = state.handle_input(PlayerInput::Interact);
        assert_eq!(events, vec![GameEvent::Interacted(InteractOutcome::KeyAcquired)]);
        assert!(state.has_key());
        assert!(!state.has_won());
    }

    #[tokio::test]
    async fn test_treasure_locked_then_won() {
        let mut state = key_and_treasure_session().await;
        state.handle_input(PlayerInput::Capture);

        // Stand next to the treasure without the key
        state.player.position = Vec3::new(0.0, 0.0, 4.0);
        state.tick(TICK, Instant::now());
        let events = state.handle_input(PlayerInput::Interact);
        assert_eq!(events, vec![GameEvent::Interacted(InteractOutcome::TreasureLocked)]);
        assert_eq!(state.phase(), GamePhase::Exploring);

        // Fetch the key, come back
        state.player.position = Vec3::ZERO;
        state.tick(TICK, Instant::now());
        state.handle_input(PlayerInput::Interact);
        state.player.position = Vec3::new(0.0, 0.0, 4.0);
        state.tick(TICK, Instant::now());

        let events = state.handle_input(PlayerInput::Interact);
        assert_eq!(
            events,
            vec![
                GameEvent::Interacted(InteractOutcome::Won),
                GameEvent::InputReleased,
                GameEvent::Won,
            ]
        );
        assert!(!state.is_input_captured());
    }

    #[tokio::test]
    async fn test_input_after_win_is_ignored() {
        let mut state = key_and_treasure_session().await;
        state.handle_input(PlayerInput::Interact);
        state.player.position = Vec3::new(0.0, 0.0, 4.0);
        state.tick(TICK, Instant::now());
        state.handle_input(PlayerInput::Interact);
        assert!(state.has_won());

        assert!(state.handle_input(PlayerInput::Capture).is_empty());
        assert!(state.handle_input(PlayerInput::Interact).is_empty());
        assert!(!state.is_input_captured());
        assert_eq!(
            state.handle_input(PlayerInput::Quit),
            vec![GameEvent::QuitRequested]
        );
    }

    #[tokio::test]
    async fn test_interact_with_nothing_in_reach() {
        let mut state = key_and_treasure_session().await;
        state.player.position = Vec3::new(20.0, 0.0, 20.0);
        state.tick(TICK, Instant::now());
        assert!(!state.can_interact());

        let events = state.handle_input(PlayerInput::Interact);
        assert_eq!(events, vec![GameEvent::Interacted(InteractOutcome::NothingHere)]);
    }

    #[tokio::test]
    async fn test_role_bound_before_key_loads_gives_nothing_here() {
        let mut state = empty_session();
        state.player = Player::new(Vec3::ZERO);
        let start = Instant::now();
        state.assets.seal(start, Duration::from_millis(100));
        request_centered(&mut state, "assets/models/chair.glb", Vec3::new(1.0, 0.0, 0.0), Tag::Key);

        // The deadline passes before the load is applied
        let events = state.tick(TICK, start + Duration::from_millis(200));
        assert!(events
            .iter()
            .any(|e| matches!(e, GameEvent::RolesResolved(r) if r.timed_out)));

        state.assets.settle().await;
        state.tick(TICK, start + Duration::from_millis(300));
        assert!(state.can_interact());
        assert_eq!(state.assets.roles().key, None);

        let events = state.handle_input(PlayerInput::Interact);
        assert_eq!(events, vec![GameEvent::Interacted(InteractOutcome::NothingHere)]);

        // Re-running resolution picks up the late key
        state.assets.resolve_roles();
        let events = state.handle_input(PlayerInput::Interact);
        assert_eq!(events, vec![GameEvent::Interacted(InteractOutcome::KeyAcquired)]);
    }

    #[tokio::test]
    async fn test_movement_only_while_captured() {
        let mut state = empty_session();
        let start = state.player.position;
        state.handle_input(PlayerInput::Move {
            key: MoveKey::Forward,
            pressed: true,
        });

        state.tick(TICK, Instant::now());
        assert_eq!(state.player.position, start);

        assert_eq!(
            state.handle_input(PlayerInput::Capture),
            vec![GameEvent::InputCaptured]
        );
        state.tick(TICK, Instant::now());
        assert!(state.player.position.z < start.z);

        state.handle_input(PlayerInput::Release);
        assert!(!state.keys.any());
    }

    #[tokio::test]
    async fn test_look_requires_capture() {
        let mut state = empty_session();
        let yaw = state.player.yaw;
        state.handle_input(PlayerInput::Look { dx: 100.0, dy: 0.0 });
        assert_eq!(state.player.yaw, yaw);

        state.handle_input(PlayerInput::Capture);
        state.handle_input(PlayerInput::Look { dx: 100.0, dy: 0.0 });
        assert_ne!(state.player.yaw, yaw);
    }

    #[tokio::test]
    async fn test_generate_town_seals_registry() {
        let mut state = empty_session();
        let summary = state.generate_town(Instant::now()).unwrap();

        assert_eq!(summary.houses, 6);
        assert_eq!(state.world.centers.len(), 5);
        assert_eq!(state.assets.pending(), summary.requests);
        assert!(!matches!(
            state.assets.resolution(),
            crate::assets::RoleResolution::Open
        ));

        state.assets.settle().await;
        let events = state.tick(TICK, Instant::now());
        assert!(events.iter().any(|e| matches!(
            e,
            GameEvent::RolesResolved(r) if !r.timed_out
                && r.slots.key.is_some()
                && r.slots.treasure.is_some()
        )));
    }
}
