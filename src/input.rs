//! Logical input state
//!
//! The host translates raw key events into named buttons; the simulation
//! only ever sees this snapshot. Kept free of platform types so the mapping
//! is testable anywhere.

use serde::{Deserialize, Serialize};

/// A logical button the simulation understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    SteerLeft,
    SteerRight,
    Boost,
}

impl Button {
    /// Map a lowercased `KeyboardEvent.key` value to a button. Keys the
    /// simulation does not consume (R, Enter, W/S) return `None` and stay
    /// host-level concerns.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "arrowleft" | "a" => Some(Button::SteerLeft),
            "arrowright" | "d" => Some(Button::SteerRight),
            " " | "space" | "spacebar" => Some(Button::Boost),
            _ => None,
        }
    }
}

/// Held-button snapshot read at the start of each step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputState {
    pub steer_left: bool,
    pub steer_right: bool,
    pub boost: bool,
}

impl InputState {
    pub fn set(&mut self, button: Button, pressed: bool) {
        match button {
            Button::SteerLeft => self.steer_left = pressed,
            Button::SteerRight => self.steer_right = pressed,
            Button::Boost => self.boost = pressed,
        }
    }

    /// Apply a raw key transition; returns true if the key mapped to a
    /// button (callers use this to decide on preventDefault)
    pub fn apply_key(&mut self, key: &str, pressed: bool) -> bool {
        match Button::from_key(key) {
            Some(button) => {
                self.set(button, pressed);
                true
            }
            None => false,
        }
    }

    /// Release everything (session restart)
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
