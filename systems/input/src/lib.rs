#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Translation of raw player input into Grid Snake commands.
//!
//! Key presses and pointer drags both end up as
//! [`Command::RequestDirection`]; whether a request is accepted is decided by
//! the world, so both sources obey the same buffering rules.

use grid_snake_core::{Command, Direction};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Mapping from keyboard characters to player actions.
///
/// Keys are matched without regard to ASCII case.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    /// Key that turns the snake upwards.
    pub up: char,
    /// Key that turns the snake downwards.
    pub down: char,
    /// Key that turns the snake to the left.
    pub left: char,
    /// Key that turns the snake to the right.
    pub right: char,
    /// Key that restarts the session.
    pub reset: char,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            up: 'w',
            down: 's',
            left: 'a',
            right: 'd',
            reset: 'r',
        }
    }
}

impl KeyBindings {
    /// Direction bound to `key`, if any.
    #[must_use]
    pub fn direction_for(&self, key: char) -> Option<Direction> {
        Direction::ALL
            .into_iter()
            .find(|direction| same_key(self.key_for(*direction), key))
    }

    /// Reports whether `key` restarts the session.
    #[must_use]
    pub fn is_reset(&self, key: char) -> bool {
        same_key(self.reset, key)
    }

    /// Key bound to `direction`.
    #[must_use]
    pub const fn key_for(&self, direction: Direction) -> char {
        match direction {
            Direction::Up => self.up,
            Direction::Down => self.down,
            Direction::Left => self.left,
            Direction::Right => self.right,
        }
    }

    /// Rejects bindings where one key would trigger two actions.
    pub fn validate(&self) -> Result<(), BindingsError> {
        let keys = [self.up, self.down, self.left, self.right, self.reset];
        for (index, key) in keys.iter().enumerate() {
            if keys[index + 1..].iter().any(|other| same_key(*key, *other)) {
                return Err(BindingsError::DuplicateKey { key: *key });
            }
        }
        Ok(())
    }
}

fn same_key(bound: char, pressed: char) -> bool {
    bound.to_ascii_lowercase() == pressed.to_ascii_lowercase()
}

/// Reasons a key binding table is rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum BindingsError {
    /// The same key is bound to more than one action.
    #[error("key '{key}' is bound to more than one action")]
    DuplicateKey {
        /// Offending key.
        key: char,
    },
}

/// Pointer or touch drag measured in grid units, `y` pointing up.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Gesture {
    /// Horizontal displacement from press to release.
    pub dx: f32,
    /// Vertical displacement from press to release.
    pub dy: f32,
}

impl Gesture {
    /// Creates a gesture from its displacement.
    #[must_use]
    pub const fn new(dx: f32, dy: f32) -> Self {
        Self { dx, dy }
    }

    /// Classifies the drag by its dominant axis.
    ///
    /// Ties go to the vertical axis, so a drag without any displacement
    /// counts as downward.
    #[must_use]
    pub fn classify(&self) -> Direction {
        if self.dx.abs() > self.dy.abs() {
            if self.dx > 0.0 {
                Direction::Right
            } else {
                Direction::Left
            }
        } else if self.dy > 0.0 {
            Direction::Up
        } else {
            Direction::Down
        }
    }
}

/// Input captured by a host between two frames.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RawInput {
    /// Character typed on the keyboard.
    Key(char),
    /// Completed pointer drag.
    Drag(Gesture),
    /// Reset requested through a non-keyboard control.
    Reset,
}

/// Pure system that turns raw input into world commands.
#[derive(Clone, Debug)]
pub struct InputRouter {
    bindings: KeyBindings,
}

impl InputRouter {
    /// Creates a router for the provided bindings.
    pub fn new(bindings: KeyBindings) -> Result<Self, BindingsError> {
        bindings.validate()?;
        Ok(Self { bindings })
    }

    /// Emits one command per recognised input, preserving order.
    ///
    /// Unbound keys are dropped.
    pub fn handle(&self, inputs: &[RawInput], out: &mut Vec<Command>) {
        for input in inputs {
            let command = match *input {
                RawInput::Key(key) if self.bindings.is_reset(key) => Some(Command::Reset),
                RawInput::Key(key) => self
                    .bindings
                    .direction_for(key)
                    .map(|direction| Command::RequestDirection { direction }),
                RawInput::Drag(gesture) => Some(Command::RequestDirection {
                    direction: gesture.classify(),
                }),
                RawInput::Reset => Some(Command::Reset),
            };
            out.extend(command);
        }
    }
}

impl Default for InputRouter {
    fn default() -> Self {
        Self {
            bindings: KeyBindings::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_bindings_are_wasd() {
        let bindings = KeyBindings::default();
        assert_eq!(bindings.direction_for('w'), Some(Direction::Up));
        assert_eq!(bindings.direction_for('A'), Some(Direction::Left));
        assert_eq!(bindings.direction_for('s'), Some(Direction::Down));
        assert_eq!(bindings.direction_for('D'), Some(Direction::Right));
        assert_eq!(bindings.direction_for('q'), None);
        assert!(bindings.is_reset('R'));
        assert_eq!(bindings.validate(), Ok(()));
    }

    #[test]
    fn duplicate_keys_are_rejected_case_insensitively() {
        let bindings = KeyBindings {
            reset: 'W',
            ..KeyBindings::default()
        };
        assert_eq!(
            bindings.validate(),
            Err(BindingsError::DuplicateKey { key: 'w' })
        );
        assert!(InputRouter::new(bindings).is_err());
    }

    #[test]
    fn gestures_follow_the_dominant_axis() {
        assert_eq!(Gesture::new(3.0, 1.0).classify(), Direction::Right);
        assert_eq!(Gesture::new(-3.0, 2.5).classify(), Direction::Left);
        assert_eq!(Gesture::new(0.5, 2.0).classify(), Direction::Up);
        assert_eq!(Gesture::new(-0.5, -2.0).classify(), Direction::Down);
        assert_eq!(Gesture::new(1.0, 1.0).classify(), Direction::Up);
        assert_eq!(Gesture::new(0.0, 0.0).classify(), Direction::Down);
    }
}
