//! Frame-level driver that connects input, the tick clock and the world.

use std::{fmt, time::Duration};

use anyhow::{Context, Result};
use grid_snake_core::{Command, DefeatCause, Event};
use grid_snake_rendering::{FrameInput, Palette, Scene};
use grid_snake_system_clock::{Config as ClockConfig, TickClock};
use grid_snake_system_input::{Gesture, InputRouter, KeyBindings, RawInput};
use grid_snake_world::{self as world, query, GameConfig, World};

/// One running game plus the systems that feed it.
#[derive(Debug)]
pub(crate) struct Session {
    world: World,
    router: InputRouter,
    clock: TickClock,
    events: Vec<Event>,
}

impl Session {
    pub(crate) fn new(game: GameConfig, bindings: KeyBindings) -> Result<Self> {
        let clock = TickClock::new(ClockConfig::new(game.tick_interval()));
        let router = InputRouter::new(bindings).context("invalid key bindings")?;
        let world = World::new(game).context("failed to create world")?;

        let (columns, rows) = query::geometry(&world).dimensions();
        tracing::info!(
            columns,
            rows,
            walls = query::geometry(&world).wall_set().len(),
            ticks_per_second = query::config(&world).ticks_per_second,
            seed = ?query::config(&world).food_seed,
            "{}",
            query::welcome_banner(&world)
        );

        Ok(Self {
            world,
            router,
            clock,
            events: Vec::new(),
        })
    }

    /// Simulated time between ticks.
    pub(crate) fn tick_interval(&self) -> Duration {
        query::config(&self.world).tick_interval()
    }

    /// Applies one frame of input, then every tick that `dt` makes due.
    ///
    /// Returns the events produced during the frame.
    pub(crate) fn step(&mut self, dt: Duration, inputs: &[RawInput]) -> &[Event] {
        self.events.clear();

        let mut commands = Vec::new();
        self.router.handle(inputs, &mut commands);
        for command in commands {
            self.dispatch(command);
        }

        let mut ticks = Vec::new();
        self.clock.handle(dt, &mut ticks);
        for command in ticks {
            self.dispatch(command);
        }

        &self.events
    }

    fn dispatch(&mut self, command: Command) {
        let first = self.events.len();
        world::apply(&mut self.world, command, &mut self.events);
        if command == Command::Reset {
            self.clock.reset();
        }
        for event in &self.events[first..] {
            log_event(event, &self.world);
        }
    }

    /// Builds the scene for the world's grid with the current session drawn on it.
    pub(crate) fn scene(&self, palette: Palette) -> Scene {
        let (columns, rows) = query::geometry(&self.world).dimensions();
        let mut scene = Scene::new(columns, rows, query::walls(&self.world), palette);
        self.populate_scene(&mut scene);
        scene
    }

    /// Copies the mutable session state into `scene`.
    pub(crate) fn populate_scene(&self, scene: &mut Scene) {
        scene.snake = query::snake_cells(&self.world);
        scene.food = query::food(&self.world);
        scene.defeated = query::is_defeated(&self.world);
        scene.score = query::score(&self.world);
    }

    pub(crate) fn summary(&self) -> SessionSummary {
        SessionSummary {
            score: query::score(&self.world),
            length: query::snake(&self.world).len(),
            ticks: query::tick_index(&self.world),
            defeat: query::defeat_cause(&self.world),
        }
    }
}

fn log_event(event: &Event, world: &World) {
    match *event {
        Event::Ticked { tick } => tracing::trace!(tick, "tick"),
        Event::DirectionQueued { direction } => tracing::debug!(?direction, "direction queued"),
        Event::SnakeAdvanced { .. } => {}
        Event::FoodEaten { cell } => tracing::debug!(x = cell.x(), y = cell.y(), "food eaten"),
        Event::FoodSpawned { cell: Some(cell) } => {
            tracing::debug!(x = cell.x(), y = cell.y(), "food placed");
        }
        Event::FoodSpawned { cell: None } => tracing::warn!("no free cell left for food"),
        Event::ScoreChanged { score } => tracing::info!(score, "score changed"),
        Event::Defeated { head, cause } => tracing::info!(
            x = head.x(),
            y = head.y(),
            ?cause,
            score = query::score(world),
            "snake defeated"
        ),
        Event::SessionReset => tracing::info!("session reset"),
    }
}

/// Translates a rendered frame's input into router input, keys first.
pub(crate) fn raw_inputs(frame: FrameInput) -> Vec<RawInput> {
    let mut inputs: Vec<RawInput> = frame.typed.into_iter().map(RawInput::Key).collect();
    if let Some(drag) = frame.drag {
        inputs.push(RawInput::Drag(Gesture::new(drag.x, drag.y)));
    }
    if frame.reset_requested {
        inputs.push(RawInput::Reset);
    }
    inputs
}

/// Final state reported when a headless run ends.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct SessionSummary {
    pub(crate) score: u32,
    pub(crate) length: usize,
    pub(crate) ticks: u64,
    pub(crate) defeat: Option<DefeatCause>,
}

impl fmt::Display for SessionSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "score {} | length {} | ticks {}",
            self.score, self.length, self.ticks
        )?;
        match self.defeat {
            Some(DefeatCause::WallCollision) => write!(f, " | defeated by a wall"),
            Some(DefeatCause::SelfCollision) => write!(f, " | defeated by its own tail"),
            None => write!(f, " | still running"),
        }
    }
}
