#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Seeded food placement for Grid Snake.
//!
//! The spawner picks a cell uniformly at random among every cell that is
//! neither part of the snake nor a wall. Candidates are enumerated in a fixed
//! column-major order so a given seed always yields the same placements.

use std::collections::HashSet;

use grid_snake_core::CellCoord;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Seed used when the caller does not provide one.
pub const DEFAULT_SEED: u64 = 0x5a4e_c0de_f00d_2024;

/// Configuration parameters required to construct the food spawner.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    rng_seed: u64,
}

impl Config {
    /// Creates a new configuration using the provided random seed.
    #[must_use]
    pub const fn new(rng_seed: u64) -> Self {
        Self { rng_seed }
    }

    /// Seed that initialises the spawner's random stream.
    #[must_use]
    pub const fn rng_seed(&self) -> u64 {
        self.rng_seed
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}

/// Chooses free cells for food placement.
#[derive(Clone, Debug)]
pub struct FoodSpawner {
    rng: ChaCha8Rng,
}

impl FoodSpawner {
    /// Creates a new spawner using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(config.rng_seed),
        }
    }

    /// Picks a cell that is free of snake segments and walls.
    ///
    /// Returns `None` when every cell in `[0, columns) × [0, rows)` is
    /// occupied. The random stream is only advanced when there is more than
    /// one candidate to choose from.
    pub fn spawn<I>(
        &mut self,
        snake_cells: I,
        walls: &HashSet<CellCoord>,
        columns: u32,
        rows: u32,
    ) -> Option<CellCoord>
    where
        I: IntoIterator<Item = CellCoord>,
    {
        let snake: HashSet<CellCoord> = snake_cells.into_iter().collect();
        let candidates = free_cells(&snake, walls, columns, rows);

        match candidates.len() {
            0 => None,
            1 => candidates.first().copied(),
            count => {
                let index = self.rng.gen_range(0..count);
                candidates.get(index).copied()
            }
        }
    }
}

fn free_cells(
    snake: &HashSet<CellCoord>,
    walls: &HashSet<CellCoord>,
    columns: u32,
    rows: u32,
) -> Vec<CellCoord> {
    let mut cells = Vec::new();
    for x in 0..columns {
        for y in 0..rows {
            let cell = CellCoord::new(x, y);
            if !snake.contains(&cell) && !walls.contains(&cell) {
                cells.push(cell);
            }
        }
    }
    cells
}
