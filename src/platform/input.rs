//! Keyboard and touch mapping
//!
//! Arrow keys steer, Space pauses, Escape toggles pause. A touch on the left
//! half of the screen steers left, on the right half steers right.

use crate::sim::TickInput;

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Left,
    Right,
    Space,
    Escape,
    Other,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value
    pub fn from_dom(key: &str) -> Self {
        match key {
            "ArrowLeft" => Key::Left,
            "ArrowRight" => Key::Right,
            " " => Key::Space,
            "Escape" => Key::Escape,
            _ => Key::Other,
        }
    }
}

/// One-shot commands produced by key presses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlCommand {
    /// Pause if running
    Pause,
    /// Pause if running, resume if paused
    TogglePause,
}

/// Currently held directions
#[derive(Debug, Clone, Copy, Default)]
pub struct Controls {
    pub left: bool,
    pub right: bool,
}

impl Controls {
    pub fn key_down(&mut self, key: Key) -> Option<ControlCommand> {
        match key {
            Key::Left => self.left = true,
            Key::Right => self.right = true,
            Key::Space => return Some(ControlCommand::Pause),
            Key::Escape => return Some(ControlCommand::TogglePause),
            Key::Other => {}
        }
        None
    }

    pub fn key_up(&mut self, key: Key) {
        match key {
            Key::Left => self.left = false,
            Key::Right => self.right = false,
            _ => {}
        }
    }

    /// A touch steers toward the half of the screen it lands on
    pub fn touch_start(&mut self, x: f32, screen_width: f32) {
        let go_left = x < screen_width / 2.0;
        self.left = go_left;
        self.right = !go_left;
    }

    pub fn touch_end(&mut self) {
        self.left = false;
        self.right = false;
    }

    pub fn tick_input(&self) -> TickInput {
        TickInput {
            left: self.left,
            right: self.right,
        }
    }
}
