//! # Game Progress
//!
//! The key-then-treasure state machine.

use super::interaction::InteractionTarget;
use crate::assets::RoleSlots;
use log::info;
use serde::{Deserialize, Serialize};

/// Where the player is in the hunt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    #[default]
    Exploring,
    HasKey,
    /// Terminal
    Won,
}

impl GamePhase {
    pub fn has_key(self) -> bool {
        matches!(self, GamePhase::HasKey | GamePhase::Won)
    }

    pub fn has_won(self) -> bool {
        self == GamePhase::Won
    }
}

/// What an interact action did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractOutcome {
    KeyAcquired,
    /// Treasure targeted without the key; can be repeated
    TreasureLocked,
    Won,
    NothingHere,
    /// The game is already won
    Ignored,
}

impl InteractOutcome {
    /// Player-facing notification text, if the outcome has one.
    pub fn message(self) -> Option<&'static str> {
        match self {
            InteractOutcome::KeyAcquired => Some("You found the KEY!"),
            InteractOutcome::TreasureLocked => Some("Treasure locked. Find the key!"),
            InteractOutcome::NothingHere => Some("Nothing here..."),
            InteractOutcome::Won | InteractOutcome::Ignored => None,
        }
    }
}

/// Tracks the player's progress through the hunt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Progress {
    phase: GamePhase,
}

impl Progress {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Reacts to an interact action against this tick's target.
    ///
    /// The key check comes first, so the treasure is only considered when the
    /// target is not an unclaimed key.
    ///
    /// # Examples
    ///
    /// ```
    /// use keyhunt::{InteractOutcome, InteractionTarget, ObjectId, Progress, RoleSlots};
    ///
    /// let key = ObjectId::new();
    /// let roles = RoleSlots { key: Some(key), treasure: None };
    /// let mut progress = Progress::new();
    ///
    /// let target = InteractionTarget { target: Some(key) };
    /// assert_eq!(progress.interact(target, roles), InteractOutcome::KeyAcquired);
    /// assert_eq!(progress.interact(target, roles), InteractOutcome::NothingHere);
    /// ```
    pub fn interact(&mut self, target: InteractionTarget, roles: RoleSlots) -> InteractOutcome {
        if self.phase.has_won() {
            return InteractOutcome::Ignored;
        }
        let Some(id) = target.target else {
            return InteractOutcome::NothingHere;
        };

        if roles.is_key(id) && !self.phase.has_key() {
            self.transition(GamePhase::HasKey);
            InteractOutcome::KeyAcquired
        } else if roles.is_treasure(id) {
            if self.phase.has_key() {
                self.transition(GamePhase::Won);
                InteractOutcome::Won
            } else {
                InteractOutcome::TreasureLocked
            }
        } else {
            InteractOutcome::NothingHere
        }
    }

    fn transition(&mut self, next: GamePhase) {
        info!("Game phase {:?} -> {:?}", self.phase, next);
        self.phase = next;
    }
}
