#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Fixed-rate tick scheduling for Grid Snake.
//!
//! Hosts feed the clock the wall time that elapsed since the previous frame
//! and receive one [`Command::Tick`] for every whole tick interval that has
//! accumulated.

use std::time::Duration;

use grid_snake_core::Command;

/// Upper bound on ticks emitted for a single frame.
///
/// A host that stalls (window dragged, debugger attached) resumes at normal
/// speed instead of fast-forwarding the snake into a wall.
pub const MAX_CATCH_UP_TICKS: u32 = 4;

/// Configuration parameters required to construct the clock.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    tick_interval: Duration,
}

impl Config {
    /// Creates a configuration that emits a tick every `tick_interval`.
    ///
    /// A zero interval yields a clock that never ticks.
    #[must_use]
    pub const fn new(tick_interval: Duration) -> Self {
        Self { tick_interval }
    }
}

/// Pure system that converts elapsed wall time into tick commands.
#[derive(Debug)]
pub struct TickClock {
    tick_interval: Duration,
    accumulator: Duration,
}

impl TickClock {
    /// Creates a new clock using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            tick_interval: config.tick_interval,
            accumulator: Duration::ZERO,
        }
    }

    /// Accumulates `dt` and emits one tick command per elapsed interval.
    pub fn handle(&mut self, dt: Duration, out: &mut Vec<Command>) {
        if self.tick_interval.is_zero() {
            return;
        }

        self.accumulator = self.accumulator.saturating_add(dt);
        let ticks = self.resolve_ticks();
        out.extend((0..ticks).map(|_| Command::Tick));
    }

    /// Discards partially accumulated time, typically after a session reset.
    pub fn reset(&mut self) {
        self.accumulator = Duration::ZERO;
    }

    /// Time accumulated towards the next tick.
    #[must_use]
    pub const fn pending(&self) -> Duration {
        self.accumulator
    }

    fn resolve_ticks(&mut self) -> u32 {
        let mut ticks = 0;
        while self.accumulator >= self.tick_interval && ticks < MAX_CATCH_UP_TICKS {
            self.accumulator -= self.tick_interval;
            ticks += 1;
        }
        if self.accumulator >= self.tick_interval {
            self.accumulator = Duration::ZERO;
        }
        ticks
    }
}
