#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Grid Snake engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then reports [`Event`] values that observers
//! (renderers, score labels, audio cues) react to. Nothing in the engine
//! dispatches callbacks behind the caller's back.

use serde::{Deserialize, Serialize};

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Grid Snake.";

/// Cardinal movement directions available to the snake.
///
/// The grid uses a bottom-left origin, so [`Direction::Up`] increases the
/// `y` coordinate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Movement toward increasing `y`.
    Up,
    /// Movement toward decreasing `y`.
    Down,
    /// Movement toward decreasing `x`.
    Left,
    /// Movement toward increasing `x`.
    Right,
}

impl Direction {
    /// Every direction in a stable order.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Unit vector `(dx, dy)` travelled by a single step in this direction.
    #[must_use]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Self::Up => (0, 1),
            Self::Down => (0, -1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }

    /// Direction pointing the other way along the same axis.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Reports whether the two unit vectors cancel each other out.
    #[must_use]
    pub const fn is_opposite(self, other: Direction) -> bool {
        let (dx, dy) = self.delta();
        let (other_dx, other_dy) = other.delta();
        dx + other_dx == 0 && dy + other_dy == 0
    }

    /// Reports whether the direction moves along the `x` axis.
    #[must_use]
    pub const fn is_horizontal(self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }
}

/// Location of a single grid cell expressed as `x` and `y` coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    x: u32,
    y: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn x(&self) -> u32 {
        self.x
    }

    /// Zero-based row index of the cell, counted upward from the bottom edge.
    #[must_use]
    pub const fn y(&self) -> u32 {
        self.y
    }
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// Asks the world to buffer a direction change for the next tick.
    ///
    /// The world silently drops the request when a change is already pending
    /// or when the direction would reverse the snake onto itself.
    RequestDirection {
        /// Direction the player wants the snake to take.
        direction: Direction,
    },
    /// Advances the simulation by one discrete step.
    Tick,
    /// Replaces the running session with a freshly initialised one.
    Reset,
}

/// Reason the snake was defeated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DefeatCause {
    /// The head entered a wall cell.
    WallCollision,
    /// The head entered a cell still occupied by the body.
    SelfCollision,
}

/// Events reported by the world after processing commands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    /// Indicates that a tick started executing against a running session.
    Ticked {
        /// One-based index of the tick within the current session.
        tick: u64,
    },
    /// Confirms that a direction change was buffered for the next tick.
    DirectionQueued {
        /// Direction that will be committed on the next tick.
        direction: Direction,
    },
    /// Confirms that the snake moved its head into a new cell.
    SnakeAdvanced {
        /// Cell now occupied by the head.
        head: CellCoord,
        /// Whether the body grew instead of sliding forward.
        grew: bool,
    },
    /// Announces that the snake consumed the food item.
    FoodEaten {
        /// Cell that held the food.
        cell: CellCoord,
    },
    /// Reports the location of freshly placed food.
    FoodSpawned {
        /// Cell holding the food, or `None` when no free cell remains.
        cell: Option<CellCoord>,
    },
    /// Reports the score whenever it changes, including the reset to zero.
    ScoreChanged {
        /// Current score of the session.
        score: u32,
    },
    /// Announces that the session entered its terminal defeated state.
    Defeated {
        /// Cell the head attempted to enter.
        head: CellCoord,
        /// Obstacle that ended the session.
        cause: DefeatCause,
    },
    /// Confirms that the session was replaced with a fresh one.
    SessionReset,
}
