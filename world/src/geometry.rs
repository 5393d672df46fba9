//! Grid dimensions and the static wall layout.

use std::collections::HashSet;

use grid_snake_core::{CellCoord, Direction};

use crate::config::{ConfigError, GridSource};

/// Dimensions and walls of the playing field.
///
/// Geometry never changes after construction, so a single instance is shared
/// between the world, food placement and rendering snapshots.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GridGeometry {
    columns: u32,
    rows: u32,
    walls: HashSet<CellCoord>,
}

impl GridGeometry {
    /// Creates a grid without any walls.
    pub fn open(columns: u32, rows: u32) -> Result<Self, ConfigError> {
        if columns == 0 || rows == 0 {
            return Err(ConfigError::NonPositiveDimensions { columns, rows });
        }

        Ok(Self {
            columns,
            rows,
            walls: HashSet::new(),
        })
    }

    /// Creates a grid whose outer ring of cells is walled.
    pub fn bordered(columns: u32, rows: u32) -> Result<Self, ConfigError> {
        let mut geometry = Self::open(columns, rows)?;
        for x in 0..columns {
            let _ = geometry.walls.insert(CellCoord::new(x, 0));
            let _ = geometry.walls.insert(CellCoord::new(x, rows - 1));
        }
        for y in 0..rows {
            let _ = geometry.walls.insert(CellCoord::new(0, y));
            let _ = geometry.walls.insert(CellCoord::new(columns - 1, y));
        }
        Ok(geometry)
    }

    /// Creates a grid from rows of marker characters, top row first.
    ///
    /// The first row maps to the highest `y` so the layout reads the same way
    /// it is drawn. Ragged rows are accepted; the widest row sets the column
    /// count and missing cells are open.
    pub fn from_map<S>(layout: &[S], wall_marker: char) -> Result<Self, ConfigError>
    where
        S: AsRef<str>,
    {
        let columns = layout
            .iter()
            .map(|row| row.as_ref().chars().count())
            .max()
            .unwrap_or(0);
        let columns = u32::try_from(columns).unwrap_or(u32::MAX);
        let rows = u32::try_from(layout.len()).unwrap_or(u32::MAX);
        if columns == 0 || rows == 0 {
            return Err(ConfigError::EmptyWallMap);
        }

        let mut geometry = Self::open(columns, rows)?;
        for (row_index, row) in (0..rows).zip(layout) {
            let y = rows - 1 - row_index;
            for (x, marker) in (0..columns).zip(row.as_ref().chars()) {
                if marker == wall_marker {
                    let _ = geometry.walls.insert(CellCoord::new(x, y));
                }
            }
        }
        Ok(geometry)
    }

    /// Builds the geometry described by a configured grid source.
    ///
    /// With `walls_enabled` unset the dimensions are still taken from the
    /// source but the wall set stays empty.
    pub fn from_source(source: &GridSource, walls_enabled: bool) -> Result<Self, ConfigError> {
        let geometry = match source {
            GridSource::Bordered { columns, rows } => Self::bordered(*columns, *rows)?,
            GridSource::Map {
                layout,
                wall_marker,
            } => Self::from_map(layout, *wall_marker)?,
        };

        if walls_enabled {
            Ok(geometry)
        } else {
            Self::open(geometry.columns, geometry.rows)
        }
    }

    /// Grid dimensions as `(columns, rows)`.
    #[must_use]
    pub const fn dimensions(&self) -> (u32, u32) {
        (self.columns, self.rows)
    }

    /// Reports whether the cell is a wall.
    #[must_use]
    pub fn is_wall(&self, cell: CellCoord) -> bool {
        self.walls.contains(&cell)
    }

    /// Read-only access to the wall set.
    #[must_use]
    pub fn wall_set(&self) -> &HashSet<CellCoord> {
        &self.walls
    }

    /// Wall cells sorted by `(x, y)` for deterministic iteration.
    #[must_use]
    pub fn sorted_walls(&self) -> Vec<CellCoord> {
        let mut walls: Vec<CellCoord> = self.walls.iter().copied().collect();
        walls.sort_unstable();
        walls
    }

    /// Reduces arbitrary coordinates onto the grid, treating it as a torus.
    #[must_use]
    pub fn wrap(&self, x: i64, y: i64) -> CellCoord {
        let x = x.rem_euclid(i64::from(self.columns));
        let y = y.rem_euclid(i64::from(self.rows));
        CellCoord::new(x as u32, y as u32)
    }

    /// Cell reached by moving one step from `cell`, wrapping at the edges.
    #[must_use]
    pub fn step(&self, cell: CellCoord, direction: Direction) -> CellCoord {
        self.offset(cell, direction, 1)
    }

    /// Cell reached by moving `distance` steps from `cell`, wrapping at the edges.
    #[must_use]
    pub fn offset(&self, cell: CellCoord, direction: Direction, distance: i64) -> CellCoord {
        let (dx, dy) = direction.delta();
        self.wrap(
            i64::from(cell.x()) + i64::from(dx) * distance,
            i64::from(cell.y()) + i64::from(dy) * distance,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bordered_grid_walls_the_outer_ring_only() {
        let geometry = GridGeometry::bordered(5, 4).expect("valid grid");
        assert_eq!(geometry.wall_set().len(), 2 * 5 + 2 * 4 - 4);
        assert!(geometry.is_wall(CellCoord::new(0, 0)));
        assert!(geometry.is_wall(CellCoord::new(4, 2)));
        assert!(geometry.is_wall(CellCoord::new(2, 3)));
        assert!(!geometry.is_wall(CellCoord::new(1, 1)));
        assert!(!geometry.is_wall(CellCoord::new(3, 2)));
    }

    #[test]
    fn map_rows_are_inverted_to_bottom_left_origin() {
        let geometry = GridGeometry::from_map(&["#..", "...", "..#"], '#').expect("valid map");
        assert_eq!(geometry.dimensions(), (3, 3));
        assert!(geometry.is_wall(CellCoord::new(0, 2)));
        assert!(geometry.is_wall(CellCoord::new(2, 0)));
        assert_eq!(geometry.wall_set().len(), 2);
    }

    #[test]
    fn ragged_map_takes_widest_row() {
        let geometry = GridGeometry::from_map(&["x", "....x"], 'x').expect("valid map");
        assert_eq!(geometry.dimensions(), (5, 2));
        assert!(geometry.is_wall(CellCoord::new(0, 1)));
        assert!(geometry.is_wall(CellCoord::new(4, 0)));
    }

    #[test]
    fn disabled_walls_keep_map_dimensions() {
        let source = GridSource::Map {
            layout: vec!["####".to_owned(), "#..#".to_owned()],
            wall_marker: '#',
        };
        let geometry = GridGeometry::from_source(&source, false).expect("valid map");
        assert_eq!(geometry.dimensions(), (4, 2));
        assert!(geometry.wall_set().is_empty());
    }

    #[test]
    fn wrap_always_lands_inside_grid() {
        let geometry = GridGeometry::open(7, 3).expect("valid grid");
        for x in -20..20 {
            for y in -20..20 {
                let cell = geometry.wrap(x, y);
                assert!(cell.x() < 7 && cell.y() < 3);
            }
        }
        assert_eq!(geometry.wrap(-1, -1), CellCoord::new(6, 2));
        assert_eq!(geometry.wrap(7, 3), CellCoord::new(0, 0));
    }

    #[test]
    fn step_wraps_in_every_direction() {
        let geometry = GridGeometry::open(4, 4).expect("valid grid");
        let corner = CellCoord::new(3, 3);
        assert_eq!(geometry.step(corner, Direction::Right), CellCoord::new(0, 3));
        assert_eq!(geometry.step(corner, Direction::Up), CellCoord::new(3, 0));
        let origin = CellCoord::new(0, 0);
        assert_eq!(geometry.step(origin, Direction::Left), CellCoord::new(3, 0));
        assert_eq!(geometry.step(origin, Direction::Down), CellCoord::new(0, 3));
    }

    #[test]
    fn zero_sized_grids_are_rejected() {
        assert_eq!(
            GridGeometry::bordered(0, 3),
            Err(ConfigError::NonPositiveDimensions {
                columns: 0,
                rows: 3
            })
        );
        let empty: [&str; 0] = [];
        assert_eq!(
            GridGeometry::from_map(&empty, '#'),
            Err(ConfigError::EmptyWallMap)
        );
    }
}
