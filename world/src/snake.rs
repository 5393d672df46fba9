//! Body and heading of the player-controlled snake.

use std::collections::VecDeque;

use grid_snake_core::{CellCoord, Direction};

use crate::geometry::GridGeometry;

/// Ordered snake body plus its committed and buffered headings.
///
/// Cells are kept tail first, head last. The head is stored separately so the
/// body can never be empty.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SnakeState {
    trail: VecDeque<CellCoord>,
    head: CellCoord,
    current_direction: Direction,
    pending_direction: Direction,
}

impl SnakeState {
    /// Lays out a straight snake whose head sits on `head`.
    ///
    /// The remaining `length - 1` cells extend behind the head, opposite to
    /// `direction`, wrapping at the grid edges. A zero length is treated as
    /// one.
    #[must_use]
    pub fn spawn(
        head: CellCoord,
        length: u32,
        direction: Direction,
        geometry: &GridGeometry,
    ) -> Self {
        let behind = direction.opposite();
        let trail = (1..i64::from(length.max(1)))
            .rev()
            .map(|distance| geometry.offset(head, behind, distance))
            .collect();

        Self {
            trail,
            head,
            current_direction: direction,
            pending_direction: direction,
        }
    }

    /// Cell occupied by the head.
    #[must_use]
    pub fn head(&self) -> CellCoord {
        self.head
    }

    /// Number of cells in the body.
    #[must_use]
    pub fn len(&self) -> usize {
        self.trail.len() + 1
    }

    /// Iterates the body from tail to head.
    pub fn cells(&self) -> impl Iterator<Item = CellCoord> + '_ {
        self.trail
            .iter()
            .copied()
            .chain(std::iter::once(self.head))
    }

    /// Reports whether any body cell sits on `cell`.
    #[must_use]
    pub fn contains(&self, cell: CellCoord) -> bool {
        self.cells().any(|occupied| occupied == cell)
    }

    /// Heading committed by the most recent tick.
    #[must_use]
    pub const fn current_direction(&self) -> Direction {
        self.current_direction
    }

    /// Heading the next tick will commit.
    #[must_use]
    pub const fn pending_direction(&self) -> Direction {
        self.pending_direction
    }

    /// Reports whether no direction change is waiting for the next tick.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.current_direction == self.pending_direction
    }

    /// Buffers a heading change for the next tick.
    ///
    /// Returns `false` without touching the state when a change is already
    /// buffered or when `requested` would reverse the snake.
    pub fn request_direction_change(&mut self, requested: Direction) -> bool {
        if !self.is_settled() {
            return false;
        }
        if self.current_direction.is_opposite(requested) {
            return false;
        }
        self.pending_direction = requested;
        true
    }

    pub(crate) fn commit_direction(&mut self) -> Direction {
        self.current_direction = self.pending_direction;
        self.current_direction
    }

    /// Whether moving the head onto `cell` hits the body.
    ///
    /// The tail is excluded because it leaves its cell during the same move.
    pub(crate) fn collides(&self, cell: CellCoord) -> bool {
        self.cells().skip(1).any(|occupied| occupied == cell)
    }

    pub(crate) fn grow(&mut self, head: CellCoord) {
        self.trail.push_back(self.head);
        self.head = head;
    }

    pub(crate) fn slide(&mut self, head: CellCoord) {
        self.grow(head);
        let _ = self.trail.pop_front();
    }
}
