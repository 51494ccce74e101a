//! # User Interface Elements
//!
//! The 2D overlay drawn on top of the scene: crosshair, interaction hint,
//! transient notifications, the win screen and the dev overlay.

use crate::game::{GameEvent, GameState};
use macroquad::prelude::*;
use std::collections::VecDeque;

/// Seconds a notification stays on screen.
pub const NOTIFICATION_SECONDS: f64 = 2.5;

const HINT_TEXT: &str = "Press E to search";
const CAPTURE_TEXT: &str = "Click to play - WASD to move, mouse to look, E to search";

/// A message shown for a limited time.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub text: String,
    pub expires_at: f64,
}

/// Heads-up display state.
#[derive(Debug, Clone)]
pub struct Hud {
    notifications: VecDeque<Notification>,
    max_notifications: usize,
    pub dev_mode: bool,
}

impl Default for Hud {
    fn default() -> Self {
        Self::new(false)
    }
}

impl Hud {
    pub fn new(dev_mode: bool) -> Self {
        Self {
            notifications: VecDeque::new(),
            max_notifications: 4,
            dev_mode,
        }
    }

    /// Shows `text` until `now + NOTIFICATION_SECONDS`. The oldest message
    /// is dropped when the history is full.
    pub fn notify(&mut self, text: impl Into<String>, now: f64) {
        if self.notifications.len() == self.max_notifications {
            self.notifications.pop_front();
        }
        self.notifications.push_back(Notification {
            text: text.into(),
            expires_at: now + NOTIFICATION_SECONDS,
        });
    }

    /// Turns game events into notifications.
    pub fn handle_event(&mut self, event: &GameEvent, now: f64) {
        match event {
            GameEvent::Interacted(outcome) => {
                if let Some(message) = outcome.message() {
                    self.notify(message, now);
                }
            }
            GameEvent::RolesResolved(report) if report.timed_out && self.dev_mode => {
                self.notify(
                    format!("{} tagged objects missed role binding", report.outstanding),
                    now,
                );
            }
            _ => {}
        }
    }

    /// Drops expired notifications.
    pub fn prune(&mut self, now: f64) {
        self.notifications.retain(|n| n.expires_at > now);
    }

    pub fn notifications(&self) -> impl Iterator<Item = &Notification> {
        self.notifications.iter()
    }

    /// Draws the overlay in screen space.
    pub fn draw(&self, state: &GameState) {
        let width = screen_width();
        let height = screen_height();

        if state.has_won() {
            self.draw_win_screen(width, height);
            return;
        }

        if state.is_input_captured() {
            draw_line(width / 2.0 - 8.0, height / 2.0, width / 2.0 + 8.0, height / 2.0, 2.0, WHITE);
            draw_line(width / 2.0, height / 2.0 - 8.0, width / 2.0, height / 2.0 + 8.0, 2.0, WHITE);
        } else {
            draw_rectangle(0.0, 0.0, width, height, Color::new(0.0, 0.0, 0.0, 0.35));
            draw_centered(CAPTURE_TEXT, height / 2.0, 28.0, WHITE);
        }

        if state.can_interact() {
            draw_centered(HINT_TEXT, height * 0.62, 26.0, YELLOW);
        }

        if state.has_key() {
            draw_text("KEY", width - 70.0, 36.0, 30.0, GOLD);
        }

        for (i, notification) in self.notifications.iter().enumerate() {
            draw_centered(&notification.text, 60.0 + i as f32 * 30.0, 28.0, WHITE);
        }

        if self.dev_mode {
            self.draw_dev_overlay(state);
        }
    }

    fn draw_win_screen(&self, width: f32, height: f32) {
        draw_rectangle(0.0, 0.0, width, height, Color::new(0.0, 0.0, 0.0, 0.8));
        draw_centered("You unlocked the treasure!", height / 2.0 - 20.0, 48.0, GOLD);
        draw_centered("Press Esc to quit", height / 2.0 + 30.0, 24.0, WHITE);
    }

    fn draw_dev_overlay(&self, state: &GameState) {
        let p = state.player.position;
        let roles = state.assets.roles();
        let lines = [
            format!("pos ({:.2}, {:.2}, {:.2})", p.x, p.y, p.z),
            format!("yaw {:.2} pitch {:.2}", state.player.yaw, state.player.pitch),
            format!("phase {:?}", state.phase()),
            format!(
                "objects {} pending {} ({} tagged) failed {}",
                state.assets.objects().len(),
                state.assets.pending(),
                state.assets.pending_tagged(),
                state.assets.failed()
            ),
            format!(
                "key {} treasure {}",
                roles.key.map_or("-".to_string(), |id| id.to_string()),
                roles.treasure.map_or("-".to_string(), |id| id.to_string())
            ),
            format!("fps {}", get_fps()),
        ];
        for (i, line) in lines.iter().enumerate() {
            draw_text(line, 10.0, 20.0 + i as f32 * 18.0, 18.0, GREEN);
        }
    }
}

fn draw_centered(text: &str, y: f32, size: f32, color: Color) {
    let dims = measure_text(text, None, size as u16, 1.0);
    draw_text(text, (screen_width() - dims.width) / 2.0, y, size, color);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::{RoleReport, RoleSlots};
    use crate::game::InteractOutcome;

    #[test]
    fn test_notifications_expire() {
        let mut hud = Hud::new(false);
        hud.notify("first", 0.0);
        hud.notify("second", 2.0);

        hud.prune(3.0);
        let texts: Vec<_> = hud.notifications().map(|n| n.text.as_str()).collect();
        assert_eq!(texts, vec!["second"]);

        hud.prune(10.0);
        assert_eq!(hud.notifications().count(), 0);
    }

    #[test]
    fn test_history_is_bounded() {
        let mut hud = Hud::new(false);
        for i in 0..10 {
            hud.notify(format!("message {}", i), 0.0);
        }
        let texts: Vec<_> = hud.notifications().map(|n| n.text.clone()).collect();
        assert_eq!(texts.len(), 4);
        assert_eq!(texts[0], "message 6");
    }

    #[test]
    fn test_interact_outcomes_become_notifications() {
        let mut hud = Hud::new(false);
        hud.handle_event(&GameEvent::Interacted(InteractOutcome::NothingHere), 0.0);
        hud.handle_event(&GameEvent::Interacted(InteractOutcome::Won), 0.0);
        hud.handle_event(&GameEvent::InputCaptured, 0.0);

        let texts: Vec<_> = hud.notifications().map(|n| n.text.as_str()).collect();
        assert_eq!(texts, vec!["Nothing here..."]);
    }

    #[test]
    fn test_role_timeout_only_reported_in_dev_mode() {
        let event = GameEvent::RolesResolved(RoleReport {
            slots: RoleSlots::default(),
            outstanding: 1,
            timed_out: true,
        });

        let mut hud = Hud::new(false);
        hud.handle_event(&event, 0.0);
        assert_eq!(hud.notifications().count(), 0);

        let mut hud = Hud::new(true);
        hud.handle_event(&event, 0.0);
        assert_eq!(hud.notifications().count(), 1);
    }
}
