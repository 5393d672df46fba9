//! Startup settings assembled from an optional TOML file and command-line flags.
//!
//! Flags take precedence over file values, which take precedence over the
//! engine defaults.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use grid_snake_core::Direction;
use grid_snake_system_input::KeyBindings;
use grid_snake_world::{config::DEFAULT_WALL_MARKER, BuiltinMap, GameConfig, GridSource};
use serde::Deserialize;

/// Command-line flags accepted by the `grid-snake` binary.
#[derive(Debug, Parser)]
#[command(
    name = "grid-snake",
    about = "Steer the snake, eat the food, avoid the walls."
)]
pub(crate) struct CliArgs {
    /// TOML file with game settings.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Columns of the bordered grid.
    #[arg(long)]
    columns: Option<u32>,
    /// Rows of the bordered grid.
    #[arg(long)]
    rows: Option<u32>,
    /// Built-in map name (`arena`, `tunnels`) or path to a map file.
    #[arg(long, value_name = "NAME|PATH")]
    map: Option<String>,
    /// Disable walls; the grid becomes a pure torus.
    #[arg(long)]
    no_walls: bool,
    /// Length of a freshly spawned snake.
    #[arg(long)]
    start_size: Option<u32>,
    /// Heading of a freshly spawned snake.
    #[arg(long, value_enum)]
    direction: Option<DirectionArg>,
    /// Simulation ticks per second.
    #[arg(long = "tps", value_name = "TICKS")]
    ticks_per_second: Option<u32>,
    /// Seed for food placement. Random when omitted.
    #[arg(long)]
    seed: Option<u64>,
    /// Run without a window and print a summary.
    #[arg(long)]
    headless: bool,
    /// Number of ticks simulated in headless mode.
    #[arg(long, default_value_t = 200)]
    ticks: u64,
    /// TOML input script replayed in headless mode.
    #[arg(long, value_name = "PATH", requires = "headless")]
    script: Option<PathBuf>,
}

/// Direction names accepted on the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum DirectionArg {
    Up,
    Down,
    Left,
    Right,
}

impl From<DirectionArg> for Direction {
    fn from(value: DirectionArg) -> Self {
        match value {
            DirectionArg::Up => Direction::Up,
            DirectionArg::Down => Direction::Down,
            DirectionArg::Left => Direction::Left,
            DirectionArg::Right => Direction::Right,
        }
    }
}

/// Settings file layout. Every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct FileConfig {
    columns: Option<u32>,
    rows: Option<u32>,
    map: Option<String>,
    wall_marker: Option<char>,
    walls: Option<bool>,
    start_size: Option<u32>,
    start_direction: Option<Direction>,
    ticks_per_second: Option<u32>,
    seed: Option<u64>,
    keys: Option<KeyBindings>,
}

impl FileConfig {
    fn read(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        toml::from_str(&text)
            .with_context(|| format!("failed to parse config file {}", path.display()))
    }
}

/// How the session is presented.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum RunMode {
    /// Interactive window.
    Windowed,
    /// Fixed number of ticks without a window.
    Headless {
        /// Ticks to simulate.
        ticks: u64,
        /// Optional scripted input.
        script: Option<PathBuf>,
    },
}

/// Fully resolved startup settings.
#[derive(Clone, Debug)]
pub(crate) struct Settings {
    pub(crate) game: GameConfig,
    pub(crate) bindings: KeyBindings,
    pub(crate) mode: RunMode,
}

impl Settings {
    /// Reads the optional settings file and merges the flags over it.
    pub(crate) fn load(args: CliArgs) -> Result<Self> {
        let file = match &args.config {
            Some(path) => FileConfig::read(path)?,
            None => FileConfig::default(),
        };
        Self::resolve(args, file)
    }

    fn resolve(args: CliArgs, file: FileConfig) -> Result<Self> {
        let defaults = GameConfig::default();
        let wall_marker = file.wall_marker.unwrap_or(DEFAULT_WALL_MARKER);

        let grid = match args.map.or(file.map) {
            Some(map) => {
                if args.columns.is_some() || args.rows.is_some() {
                    tracing::warn!(%map, "map sets the grid size; ignoring --columns/--rows");
                }
                GridSource::Map {
                    layout: load_layout(&map)?,
                    wall_marker,
                }
            }
            None => {
                let (default_columns, default_rows) = defaults.grid.dimensions();
                GridSource::Bordered {
                    columns: args.columns.or(file.columns).unwrap_or(default_columns),
                    rows: args.rows.or(file.rows).unwrap_or(default_rows),
                }
            }
        };

        let game = GameConfig {
            grid,
            walls_enabled: !args.no_walls && file.walls.unwrap_or(defaults.walls_enabled),
            start_size: args
                .start_size
                .or(file.start_size)
                .unwrap_or(defaults.start_size),
            start_direction: args
                .direction
                .map(Direction::from)
                .or(file.start_direction)
                .unwrap_or(defaults.start_direction),
            ticks_per_second: args
                .ticks_per_second
                .or(file.ticks_per_second)
                .unwrap_or(defaults.ticks_per_second),
            food_seed: Some(args.seed.or(file.seed).unwrap_or_else(rand::random)),
        };
        game.validate().context("invalid game configuration")?;

        let bindings = file.keys.unwrap_or_default();
        bindings.validate().context("invalid key bindings")?;

        let mode = if args.headless {
            RunMode::Headless {
                ticks: args.ticks,
                script: args.script,
            }
        } else {
            RunMode::Windowed
        };

        Ok(Self {
            game,
            bindings,
            mode,
        })
    }
}

fn load_layout(map: &str) -> Result<Vec<String>> {
    if let Some(builtin) = BuiltinMap::from_name(map) {
        return Ok(builtin.layout());
    }

    let path = Path::new(map);
    let text = fs::read_to_string(path).with_context(|| {
        format!("'{map}' is neither a built-in map nor a readable map file")
    })?;
    let layout = parse_layout(&text);
    if layout.is_empty() {
        bail!("map file {} contains no rows", path.display());
    }
    Ok(layout)
}

fn parse_layout(text: &str) -> Vec<String> {
    let mut rows: Vec<String> = text
        .lines()
        .map(|line| line.trim_end_matches('\r').to_owned())
        .collect();
    while rows.last().is_some_and(|row| row.trim().is_empty()) {
        let _ = rows.pop();
    }
    rows
}
