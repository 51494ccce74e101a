//! # Input Module
//!
//! Turns macroquad keyboard and mouse state into [`PlayerInput`] events.
//!
//! Movement keys are reported on press and on release so the game can keep
//! held-key state. The interact key is edge-triggered: one event per press.

pub mod bindings;

pub use bindings::*;

use macroquad::prelude::*;

/// Held state of the four movement keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MovementKeys {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
}

impl MovementKeys {
    pub fn set(&mut self, key: MoveKey, pressed: bool) {
        match key {
            MoveKey::Forward => self.forward = pressed,
            MoveKey::Backward => self.backward = pressed,
            MoveKey::Left => self.left = pressed,
            MoveKey::Right => self.right = pressed,
        }
    }

    pub fn any(&self) -> bool {
        self.forward || self.backward || self.left || self.right
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Player input events the game reacts to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlayerInput {
    /// A movement key went down (`true`) or up (`false`)
    Move { key: MoveKey, pressed: bool },
    /// Search the object in reach
    Interact,
    /// Mouse motion in pixels while captured
    Look { dx: f32, dy: f32 },
    /// Click: grab the pointer and start playing
    Capture,
    /// Escape while captured
    Release,
    Quit,
}

/// Polls macroquad for input each frame.
pub struct InputHandler {
    pub bindings: KeyBindings,
    last_mouse: Option<Vec2>,
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl InputHandler {
    pub fn new() -> Self {
        Self::with_bindings(KeyBindings::default())
    }

    pub fn with_bindings(bindings: KeyBindings) -> Self {
        Self {
            bindings,
            last_mouse: None,
        }
    }

    /// Collects this frame's input events.
    ///
    /// `captured` selects what Escape and mouse motion mean.
    pub fn poll(&mut self, captured: bool) -> Vec<PlayerInput> {
        let mut inputs = Vec::new();

        if is_key_pressed(self.bindings.escape) {
            inputs.push(if captured {
                PlayerInput::Release
            } else {
                PlayerInput::Quit
            });
        }

        if !captured && is_mouse_button_pressed(MouseButton::Left) {
            inputs.push(PlayerInput::Capture);
        }

        for movement in MoveKey::ALL {
            let keys: Vec<KeyCode> = self.bindings.keys_for(movement).collect();
            inputs.extend(movement_edges(
                movement,
                keys.iter().any(|&k| is_key_pressed(k)),
                keys.iter().any(|&k| is_key_released(k)),
                keys.iter().any(|&k| is_key_down(k)),
            ));
        }

        if is_key_pressed(self.bindings.interact) {
            inputs.push(PlayerInput::Interact);
        }

        let mouse: Vec2 = mouse_position().into();
        if let Some(last) = self.last_mouse {
            let delta = mouse - last;
            if captured && delta != Vec2::ZERO {
                inputs.push(PlayerInput::Look {
                    dx: delta.x,
                    dy: delta.y,
                });
            }
        }
        self.last_mouse = Some(mouse);

        inputs
    }

    /// Forgets the last mouse position, so the jump caused by grabbing the
    /// cursor does not turn the camera.
    pub fn reset_mouse(&mut self) {
        self.last_mouse = None;
    }
}

/// Press and release events for one movement direction in one frame.
///
/// A tap shorter than a frame reports both edges, press first, so the held
/// state ends up released.
fn movement_edges(key: MoveKey, pressed: bool, released: bool, down: bool) -> Vec<PlayerInput> {
    let mut edges = Vec::with_capacity(2);
    if pressed {
        edges.push(PlayerInput::Move { key, pressed: true });
    }
    if released && !down {
        edges.push(PlayerInput::Move {
            key,
            pressed: false,
        });
    }
    edges
}
