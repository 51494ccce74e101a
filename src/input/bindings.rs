//! # Key Bindings
//!
//! Maps physical keys to the game's small control surface.

use macroquad::input::KeyCode;

/// One of the four held movement directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveKey {
    Forward,
    Backward,
    Left,
    Right,
}

impl MoveKey {
    pub const ALL: [MoveKey; 4] = [
        MoveKey::Forward,
        MoveKey::Backward,
        MoveKey::Left,
        MoveKey::Right,
    ];
}

/// Which keys drive which control.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyBindings {
    pub movement: Vec<(KeyCode, MoveKey)>,
    pub interact: KeyCode,
    /// Releases pointer capture, or quits when nothing is captured
    pub escape: KeyCode,
}

impl Default for KeyBindings {
    /// WASD plus arrow keys, E to search.
    fn default() -> Self {
        Self {
            movement: vec![
                (KeyCode::W, MoveKey::Forward),
                (KeyCode::S, MoveKey::Backward),
                (KeyCode::A, MoveKey::Left),
                (KeyCode::D, MoveKey::Right),
                (KeyCode::Up, MoveKey::Forward),
                (KeyCode::Down, MoveKey::Backward),
                (KeyCode::Left, MoveKey::Left),
                (KeyCode::Right, MoveKey::Right),
            ],
            interact: KeyCode::E,
            escape: KeyCode::Escape,
        }
    }
}

impl KeyBindings {
    pub fn movement_for(&self, key: KeyCode) -> Option<MoveKey> {
        self.movement
            .iter()
            .find(|(bound, _)| *bound == key)
            .map(|(_, movement)| *movement)
    }

    /// Every physical key bound to `movement`.
    pub fn keys_for(&self, movement: MoveKey) -> impl Iterator<Item = KeyCode> + '_ {
        self.movement
            .iter()
            .filter(move |(_, bound)| *bound == movement)
            .map(|(key, _)| *key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bindings() {
        let bindings = KeyBindings::default();
        assert_eq!(bindings.movement_for(KeyCode::W), Some(MoveKey::Forward));
        assert_eq!(bindings.movement_for(KeyCode::Left), Some(MoveKey::Left));
        assert_eq!(bindings.movement_for(KeyCode::E), None);
        assert_eq!(bindings.interact, KeyCode::E);
    }

    #[test]
    fn test_every_direction_is_bound() {
        let bindings = KeyBindings::default();
        for movement in MoveKey::ALL {
            assert_eq!(bindings.keys_for(movement).count(), 2);
        }
    }
}
