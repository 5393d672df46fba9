#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Grid Snake.
//!
//! The world owns the grid, the snake, the food and the score. It is mutated
//! exclusively through [`apply`] and observed through the [`query`] module.

pub mod config;
pub mod geometry;
pub mod maps;
pub mod snake;

pub use config::{ConfigError, GameConfig, GridSource};
pub use geometry::GridGeometry;
pub use maps::BuiltinMap;
pub use snake::SnakeState;

use grid_snake_core::{CellCoord, Command, DefeatCause, Event, WELCOME_BANNER};
use grid_snake_system_food_spawning::{Config as SpawnerConfig, FoodSpawner, DEFAULT_SEED};

/// State that lives for exactly one game, from spawn to defeat.
#[derive(Clone, Debug)]
struct Session {
    snake: SnakeState,
    food: Option<CellCoord>,
    score: u32,
    defeat: Option<DefeatCause>,
    tick_index: u64,
}

impl Session {
    fn start(config: &GameConfig, geometry: &GridGeometry, spawner: &mut FoodSpawner) -> Self {
        let (columns, rows) = geometry.dimensions();
        let head = geometry.wrap(
            i64::from(columns / 2) - 1,
            i64::from(rows / 2) + 1,
        );
        let snake = SnakeState::spawn(head, config.start_size, config.start_direction, geometry);
        let food = spawner.spawn(snake.cells(), geometry.wall_set(), columns, rows);

        Self {
            snake,
            food,
            score: 0,
            defeat: None,
            tick_index: 0,
        }
    }
}

/// Represents the authoritative Grid Snake world state.
#[derive(Clone, Debug)]
pub struct World {
    banner: &'static str,
    config: GameConfig,
    geometry: GridGeometry,
    spawner: FoodSpawner,
    session: Session,
}

impl World {
    /// Creates a new world and spawns the first session.
    ///
    /// Fails when the configuration describes an unusable grid or start run.
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let geometry = GridGeometry::from_source(&config.grid, config.walls_enabled)?;
        let mut spawner = FoodSpawner::new(SpawnerConfig::new(
            config.food_seed.unwrap_or(DEFAULT_SEED),
        ));
        let session = Session::start(&config, &geometry, &mut spawner);

        Ok(Self {
            banner: WELCOME_BANNER,
            config,
            geometry,
            spawner,
            session,
        })
    }

    fn respawn_food(&mut self) -> Option<CellCoord> {
        let (columns, rows) = self.geometry.dimensions();
        self.session.food = self.spawner.spawn(
            self.session.snake.cells(),
            self.geometry.wall_set(),
            columns,
            rows,
        );
        self.session.food
    }

    fn advance(&mut self, out_events: &mut Vec<Event>) {
        if self.session.defeat.is_some() {
            return;
        }

        self.session.tick_index = self.session.tick_index.saturating_add(1);
        out_events.push(Event::Ticked {
            tick: self.session.tick_index,
        });

        let direction = self.session.snake.commit_direction();
        let head = self.geometry.step(self.session.snake.head(), direction);

        let cause = if self.geometry.is_wall(head) {
            Some(DefeatCause::WallCollision)
        } else if self.session.snake.collides(head) {
            Some(DefeatCause::SelfCollision)
        } else {
            None
        };
        if let Some(cause) = cause {
            self.session.defeat = Some(cause);
            out_events.push(Event::Defeated { head, cause });
            return;
        }

        if self.session.food == Some(head) {
            self.session.snake.grow(head);
            self.session.score = self.session.score.saturating_add(1);
            let cell = self.respawn_food();
            out_events.push(Event::SnakeAdvanced { head, grew: true });
            out_events.push(Event::FoodEaten { cell: head });
            out_events.push(Event::ScoreChanged {
                score: self.session.score,
            });
            out_events.push(Event::FoodSpawned { cell });
        } else {
            self.session.snake.slide(head);
            out_events.push(Event::SnakeAdvanced { head, grew: false });
        }
    }

    fn reset(&mut self, out_events: &mut Vec<Event>) {
        self.session = Session::start(&self.config, &self.geometry, &mut self.spawner);
        out_events.push(Event::SessionReset);
        out_events.push(Event::ScoreChanged { score: 0 });
        out_events.push(Event::FoodSpawned {
            cell: self.session.food,
        });
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::RequestDirection { direction } => {
            if world.session.defeat.is_some() {
                return;
            }
            if world.session.snake.request_direction_change(direction) {
                out_events.push(Event::DirectionQueued { direction });
            }
        }
        Command::Tick => world.advance(out_events),
        Command::Reset => world.reset(out_events),
    }
}

/// Read-only queries over the world state.
pub mod query {
    use grid_snake_core::{CellCoord, DefeatCause, Direction};
    use serde::{Deserialize, Serialize};

    use super::World;
    use crate::{GameConfig, GridGeometry, SnakeState};

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Provides read-only access to the configuration the world was built from.
    #[must_use]
    pub fn config(world: &World) -> &GameConfig {
        &world.config
    }

    /// Provides read-only access to the grid dimensions and walls.
    #[must_use]
    pub fn geometry(world: &World) -> &GridGeometry {
        &world.geometry
    }

    /// Wall cells sorted by `(x, y)`.
    #[must_use]
    pub fn walls(world: &World) -> Vec<CellCoord> {
        world.geometry.sorted_walls()
    }

    /// Provides read-only access to the snake.
    #[must_use]
    pub fn snake(world: &World) -> &SnakeState {
        &world.session.snake
    }

    /// Snake body cells ordered from tail to head.
    #[must_use]
    pub fn snake_cells(world: &World) -> Vec<CellCoord> {
        world.session.snake.cells().collect()
    }

    /// Cell holding the food, if any free cell was left when it was placed.
    #[must_use]
    pub fn food(world: &World) -> Option<CellCoord> {
        world.session.food
    }

    /// Number of food items eaten during the current session.
    #[must_use]
    pub fn score(world: &World) -> u32 {
        world.session.score
    }

    /// Reports whether the current session has ended.
    #[must_use]
    pub fn is_defeated(world: &World) -> bool {
        world.session.defeat.is_some()
    }

    /// Obstacle that ended the current session, if it has ended.
    #[must_use]
    pub fn defeat_cause(world: &World) -> Option<DefeatCause> {
        world.session.defeat
    }

    /// Number of ticks executed since the session started.
    #[must_use]
    pub fn tick_index(world: &World) -> u64 {
        world.session.tick_index
    }

    /// Captures every piece of session state that changes between ticks.
    #[must_use]
    pub fn snapshot(world: &World) -> SessionSnapshot {
        let session = &world.session;
        SessionSnapshot {
            snake: session.snake.cells().collect(),
            direction: session.snake.current_direction(),
            food: session.food,
            score: session.score,
            defeat: session.defeat,
            tick_index: session.tick_index,
        }
    }

    /// Owned copy of the mutable session state.
    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct SessionSnapshot {
        /// Snake body cells ordered from tail to head.
        pub snake: Vec<CellCoord>,
        /// Direction committed by the most recent tick.
        pub direction: Direction,
        /// Cell holding the food.
        pub food: Option<CellCoord>,
        /// Current score.
        pub score: u32,
        /// Cause of defeat once the session has ended.
        pub defeat: Option<DefeatCause>,
        /// Number of ticks executed in the session.
        pub tick_index: u64,
    }
}
