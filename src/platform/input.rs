//! Held-direction tracking for keyboard and touch buttons
//!
//! Both sources are tracked separately and OR'd per direction each frame, so
//! releasing a key does not cancel a touch that is still held.

use crate::sim::TickInput;

/// Background for a held touch button
pub const TOUCH_PRESSED_BG: &str = "rgba(255, 255, 255, 0.4)";
/// Background for a released touch button
pub const TOUCH_RELEASED_BG: &str = "rgba(255, 255, 255, 0.2)";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Map a `KeyboardEvent.key` value
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowUp" => Some(Direction::Up),
            "ArrowDown" => Some(Direction::Down),
            "ArrowLeft" => Some(Direction::Left),
            "ArrowRight" => Some(Direction::Right),
            _ => None,
        }
    }

    /// Map an on-screen control button's element id
    pub fn from_button_id(id: &str) -> Option<Self> {
        match id {
            "up-btn" => Some(Direction::Up),
            "down-btn" => Some(Direction::Down),
            "left-btn" => Some(Direction::Left),
            "right-btn" => Some(Direction::Right),
            _ => None,
        }
    }
}

fn set(input: &mut TickInput, dir: Direction, held: bool) {
    match dir {
        Direction::Up => input.up = held,
        Direction::Down => input.down = held,
        Direction::Left => input.left = held,
        Direction::Right => input.right = held,
    }
}

/// Current held state of both input sources
#[derive(Debug, Clone, Default)]
pub struct InputState {
    keys: TickInput,
    touch: TickInput,
    /// Touch buttons only count on touch profiles
    touch_enabled: bool,
}

impl InputState {
    pub fn new(touch_enabled: bool) -> Self {
        Self {
            touch_enabled,
            ..Default::default()
        }
    }

    /// Returns true if the key is a direction key
    pub fn key_down(&mut self, key: &str) -> bool {
        self.set_key(key, true)
    }

    pub fn key_up(&mut self, key: &str) -> bool {
        self.set_key(key, false)
    }

    fn set_key(&mut self, key: &str, held: bool) -> bool {
        match Direction::from_key(key) {
            Some(dir) => {
                set(&mut self.keys, dir, held);
                true
            }
            None => false,
        }
    }

    /// Returns true if the id names a control button
    pub fn touch_start(&mut self, button_id: &str) -> bool {
        self.set_touch(button_id, true)
    }

    pub fn touch_end(&mut self, button_id: &str) -> bool {
        self.set_touch(button_id, false)
    }

    fn set_touch(&mut self, button_id: &str, held: bool) -> bool {
        match Direction::from_button_id(button_id) {
            Some(dir) => {
                set(&mut self.touch, dir, held);
                true
            }
            None => false,
        }
    }

    /// Directions to feed this frame's tick
    pub fn current(&self) -> TickInput {
        if self.touch_enabled {
            self.keys.merge(self.touch)
        } else {
            self.keys
        }
    }
}
