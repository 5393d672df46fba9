//! Load-once configuration for a Grid Snake session.
//!
//! A [`GameConfig`] is an immutable value handed to [`crate::World::new`].
//! Nothing in the engine reads process-wide settings, so independent worlds
//! with different configurations can coexist in one process.

use std::time::Duration;

use grid_snake_core::Direction;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default number of columns of the procedurally bordered grid.
pub const DEFAULT_COLUMNS: u32 = 40;
/// Default number of rows of the procedurally bordered grid.
pub const DEFAULT_ROWS: u32 = 60;
/// Default length of a freshly spawned snake.
pub const DEFAULT_START_SIZE: u32 = 3;
/// Default simulation rate.
pub const DEFAULT_TICKS_PER_SECOND: u32 = 10;
/// Marker that denotes a wall cell in map layouts unless configured otherwise.
pub const DEFAULT_WALL_MARKER: char = '#';

/// Describes where the grid dimensions and wall layout come from.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GridSource {
    /// Procedural grid whose outer ring of cells is walled.
    Bordered {
        /// Number of columns in the grid.
        columns: u32,
        /// Number of rows in the grid.
        rows: u32,
    },
    /// Fixed layout of marker characters, listed top row first.
    Map {
        /// Rows of the map. Rows may differ in length.
        layout: Vec<String>,
        /// Character that marks a wall cell.
        #[serde(default = "default_wall_marker")]
        wall_marker: char,
    },
}

fn default_wall_marker() -> char {
    DEFAULT_WALL_MARKER
}

impl GridSource {
    /// Grid dimensions `(columns, rows)` implied by the source.
    ///
    /// Map sources take the widest row as the column count.
    #[must_use]
    pub fn dimensions(&self) -> (u32, u32) {
        match self {
            Self::Bordered { columns, rows } => (*columns, *rows),
            Self::Map { layout, .. } => {
                let columns = layout
                    .iter()
                    .map(|row| row.chars().count())
                    .max()
                    .unwrap_or(0);
                (saturating_u32(columns), saturating_u32(layout.len()))
            }
        }
    }
}

impl Default for GridSource {
    fn default() -> Self {
        Self::Bordered {
            columns: DEFAULT_COLUMNS,
            rows: DEFAULT_ROWS,
        }
    }
}

/// Immutable configuration consumed when a world is created.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Origin of the grid dimensions and walls.
    pub grid: GridSource,
    /// Whether walls participate at all. Disabled walls leave a pure torus.
    pub walls_enabled: bool,
    /// Number of cells in a freshly spawned snake.
    pub start_size: u32,
    /// Direction the snake faces when a session starts.
    pub start_direction: Direction,
    /// Number of simulation ticks per second.
    pub ticks_per_second: u32,
    /// Seed for food placement. `None` falls back to a fixed default.
    pub food_seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid: GridSource::default(),
            walls_enabled: true,
            start_size: DEFAULT_START_SIZE,
            start_direction: Direction::Right,
            ticks_per_second: DEFAULT_TICKS_PER_SECOND,
            food_seed: None,
        }
    }
}

impl GameConfig {
    /// Creates a configuration for a bordered grid of the provided size.
    #[must_use]
    pub fn bordered(columns: u32, rows: u32) -> Self {
        Self {
            grid: GridSource::Bordered { columns, rows },
            ..Self::default()
        }
    }

    /// Creates a configuration whose walls come from a map layout.
    #[must_use]
    pub fn from_map<S>(layout: &[S], wall_marker: char) -> Self
    where
        S: AsRef<str>,
    {
        Self {
            grid: GridSource::Map {
                layout: layout.iter().map(|row| row.as_ref().to_owned()).collect(),
                wall_marker,
            },
            ..Self::default()
        }
    }

    /// Returns a copy with walls switched on or off.
    #[must_use]
    pub fn with_walls(mut self, enabled: bool) -> Self {
        self.walls_enabled = enabled;
        self
    }

    /// Returns a copy with a fixed food seed.
    #[must_use]
    pub fn with_food_seed(mut self, seed: u64) -> Self {
        self.food_seed = Some(seed);
        self
    }

    /// Returns a copy with a different start size and heading.
    #[must_use]
    pub fn with_start(mut self, start_size: u32, start_direction: Direction) -> Self {
        self.start_size = start_size;
        self.start_direction = start_direction;
        self
    }

    /// Checks every constraint that does not depend on the wall layout.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let (columns, rows) = self.grid.dimensions();
        match &self.grid {
            GridSource::Map { .. } if columns == 0 || rows == 0 => {
                return Err(ConfigError::EmptyWallMap);
            }
            _ if columns == 0 || rows == 0 => {
                return Err(ConfigError::NonPositiveDimensions { columns, rows });
            }
            _ => {}
        }

        if self.start_size == 0 {
            return Err(ConfigError::ZeroStartSize);
        }

        let available = if self.start_direction.is_horizontal() {
            columns
        } else {
            rows
        };
        if self.start_size > available {
            return Err(ConfigError::StartSizeExceedsGrid {
                start_size: self.start_size,
                available,
            });
        }

        if self.ticks_per_second == 0 {
            return Err(ConfigError::ZeroTickRate);
        }

        Ok(())
    }

    /// Simulated time between two consecutive ticks.
    ///
    /// A zero rate is rejected by [`GameConfig::validate`]; it maps to a zero
    /// interval here so callers never divide by zero.
    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        if self.ticks_per_second == 0 {
            return Duration::ZERO;
        }
        Duration::from_secs(1) / self.ticks_per_second
    }
}

/// Reasons a configuration is rejected at startup.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The grid has no area.
    #[error("grid dimensions must be positive (received {columns}x{rows})")]
    NonPositiveDimensions {
        /// Configured column count.
        columns: u32,
        /// Configured row count.
        rows: u32,
    },
    /// The wall map has no rows or only empty rows.
    #[error("wall map is empty")]
    EmptyWallMap,
    /// The snake must occupy at least one cell.
    #[error("start size must be at least one cell")]
    ZeroStartSize,
    /// The starting run would overlap itself after wrapping.
    #[error("start size {start_size} exceeds the {available} cells available along the start direction")]
    StartSizeExceedsGrid {
        /// Configured start size.
        start_size: u32,
        /// Cells available along the axis of the start direction.
        available: u32,
    },
    /// The simulation must advance at a positive rate.
    #[error("ticks per second must be positive")]
    ZeroTickRate,
}

fn saturating_u32(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}
