//! # Scene Management System
//!
//! Runs the frame loop and switches between the playing scene and the win
//! screen.
//!
//! Simulation runs in fixed ticks of `movement.tick_seconds`, fed by the
//! real frame time, so walking speed does not depend on the frame rate.

use crate::{GameEvent, GameState, InputHandler, KeyhuntResult, MacroquadDisplay, PlayerInput};
use log::info;
use macroquad::prelude::*;
use std::time::Instant;

/// Ticks simulated at most per frame, so a stall cannot snowball.
const MAX_TICKS_PER_FRAME: u32 = 5;

/// Represents the current scene in the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneType {
    /// Normal gameplay
    Playing,
    /// Treasure unlocked
    Won,
}

/// The main scene manager that coordinates all game scenes.
pub struct SceneManager {
    current_scene: SceneType,
    game_state: GameState,
    display: MacroquadDisplay,
    input_handler: InputHandler,
    /// Unsimulated frame time in seconds
    accumulator: f32,
}

impl SceneManager {
    pub fn new(game_state: GameState, input_handler: InputHandler, dev_mode: bool) -> Self {
        Self {
            current_scene: SceneType::Playing,
            game_state,
            display: MacroquadDisplay::new(dev_mode),
            input_handler,
            accumulator: 0.0,
        }
    }

    pub fn current_scene(&self) -> SceneType {
        self.current_scene
    }

    /// Runs the main scene loop until the game exits.
    pub async fn run(&mut self) -> KeyhuntResult<()> {
        loop {
            let quit = match self.current_scene {
                SceneType::Playing => self.update_playing_scene(),
                SceneType::Won => self.update_won_scene(),
            };
            if quit {
                info!("Quit requested");
                break;
            }
            self.display.render(&self.game_state);
            next_frame().await;
        }
        set_cursor_grab(false);
        show_mouse(true);
        Ok(())
    }

    /// Updates the playing scene, returns true if exit is requested.
    fn update_playing_scene(&mut self) -> bool {
        let captured = self.game_state.is_input_captured();
        for input in self.input_handler.poll(captured) {
            let events = self.game_state.handle_input(input);
            if self.process_events(&events) {
                return true;
            }
        }

        let tick = self.game_state.config.movement.tick_seconds;
        self.accumulator += get_frame_time();
        let mut ticks = 0;
        while self.accumulator >= tick && ticks < MAX_TICKS_PER_FRAME {
            let events = self.game_state.tick(tick, Instant::now());
            self.process_events(&events);
            self.accumulator -= tick;
            ticks += 1;
        }
        if ticks == MAX_TICKS_PER_FRAME {
            self.accumulator = 0.0;
        }

        if self.game_state.has_won() {
            info!("Switching to the win screen");
            self.current_scene = SceneType::Won;
        }
        false
    }

    /// Only quitting is possible once the game is won.
    fn update_won_scene(&mut self) -> bool {
        // Loads still arriving keep the registry current for the dev overlay
        self.game_state.assets.poll();
        self.input_handler
            .poll(false)
            .into_iter()
            .any(|input| input == PlayerInput::Quit)
    }

    /// Applies side effects of game events. Returns true on quit.
    fn process_events(&mut self, events: &[GameEvent]) -> bool {
        let now = get_time();
        for event in events {
            match event {
                GameEvent::QuitRequested => return true,
                GameEvent::InputCaptured => {
                    set_cursor_grab(true);
                    show_mouse(false);
                    self.input_handler.reset_mouse();
                }
                GameEvent::InputReleased => {
                    set_cursor_grab(false);
                    show_mouse(true);
                }
                _ => {}
            }
            self.display.hud.handle_event(event, now);
        }
        false
    }
}
