#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Grid Snake adapters.
//!
//! Scenes are plain snapshots of the world expressed in grid cells. Backends
//! map them onto the screen through [`GridLayout`], which keeps the
//! bottom-left grid origin independent of the backend's screen axes.

use anyhow::Result as AnyResult;
use glam::Vec2;
use grid_snake_core::CellCoord;
use std::time::Duration;

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from floating point channels.
    #[must_use]
    pub const fn opaque(red: f32, green: f32, blue: f32) -> Self {
        Self::new(red, green, blue, 1.0)
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }
}

/// Colors assigned to every kind of drawable cell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Palette {
    /// Color of snake segments.
    pub snake: Color,
    /// Color of the food cell.
    pub food: Color,
    /// Color of wall cells.
    pub wall: Color,
    /// Color of the head after the session was lost.
    pub defeat: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            snake: Color::opaque(0.0, 1.0, 0.0),
            food: Color::opaque(1.0, 0.0, 0.0),
            wall: Color::opaque(0.5, 0.5, 0.5),
            defeat: Color::opaque(1.0, 0.25, 0.0),
        }
    }
}

/// Role of a cell within the scene's draw list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CellKind {
    /// Static obstacle.
    Wall,
    /// Food waiting to be eaten.
    Food,
    /// Segment of the snake's body.
    Snake,
    /// Head of a snake whose session has ended.
    DefeatedHead,
}

/// Screen-space mapping of the grid for a particular viewport.
///
/// Screen coordinates grow rightwards and downwards. Grid row zero is drawn at
/// the bottom of the grid area.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridLayout {
    /// Top-left corner of the grid area in screen space.
    pub origin: Vec2,
    /// Side length of a single square cell in screen units.
    pub cell_size: f32,
    /// Number of columns in the grid.
    pub columns: u32,
    /// Number of rows in the grid.
    pub rows: u32,
}

impl GridLayout {
    /// Fits a `columns` by `rows` grid into `viewport`, centred, with square cells.
    ///
    /// The cell size is the largest value that fits both axes. Degenerate
    /// viewports or grids produce a zero cell size.
    #[must_use]
    pub fn fit(viewport: Vec2, columns: u32, rows: u32) -> Self {
        let cell_size = if columns == 0 || rows == 0 {
            0.0
        } else {
            (viewport.x / columns as f32)
                .min(viewport.y / rows as f32)
                .max(0.0)
        };
        let extent = Vec2::new(columns as f32, rows as f32) * cell_size;
        let origin = ((viewport - extent) * 0.5).max(Vec2::ZERO);

        Self {
            origin,
            cell_size,
            columns,
            rows,
        }
    }

    /// Width and height of the grid area in screen units.
    #[must_use]
    pub fn extent(&self) -> Vec2 {
        Vec2::new(self.columns as f32, self.rows as f32) * self.cell_size
    }

    /// Top-left corner of `cell` in screen space.
    #[must_use]
    pub fn cell_origin(&self, cell: CellCoord) -> Vec2 {
        let flipped_row = self.rows.saturating_sub(1).saturating_sub(cell.y());
        self.origin + Vec2::new(cell.x() as f32, flipped_row as f32) * self.cell_size
    }

    /// Reports whether a screen position lies inside the grid area.
    #[must_use]
    pub fn contains(&self, position: Vec2) -> bool {
        let extent = self.extent();
        position.x >= self.origin.x
            && position.y >= self.origin.y
            && position.x < self.origin.x + extent.x
            && position.y < self.origin.y + extent.y
    }

    /// Converts a pointer drag into a displacement measured in cells, `y` up.
    ///
    /// Drags that start outside the grid area are ignored.
    #[must_use]
    pub fn drag_in_cells(&self, drag: PointerDrag) -> Option<Vec2> {
        if self.cell_size <= f32::EPSILON || !self.contains(drag.start) {
            return None;
        }
        let delta = (drag.end - drag.start) / self.cell_size;
        Some(Vec2::new(delta.x, -delta.y))
    }
}

/// Press and release positions of a pointer drag in screen space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerDrag {
    /// Position where the pointer was pressed.
    pub start: Vec2,
    /// Position where the pointer was released.
    pub end: Vec2,
}

/// Input snapshot gathered by adapters before updating the scene.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct FrameInput {
    /// Characters typed during the frame, in order.
    pub typed: Vec<char>,
    /// Completed drag that started on the grid, in cells with `y` pointing up.
    pub drag: Option<Vec2>,
    /// Whether a reset was requested through the control panel.
    pub reset_requested: bool,
}

/// Side panel hosting the score and the reset control.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ControlPanelView {
    /// Width of the panel in screen units.
    pub width: f32,
    /// Background color of the panel.
    pub background: Color,
}

impl ControlPanelView {
    /// Creates a new control panel descriptor.
    #[must_use]
    pub const fn new(width: f32, background: Color) -> Self {
        Self { width, background }
    }
}

/// Scene description combining the grid, its walls and the session state.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Number of columns in the grid.
    pub columns: u32,
    /// Number of rows in the grid.
    pub rows: u32,
    /// Wall cells.
    pub walls: Vec<CellCoord>,
    /// Snake cells ordered from tail to head.
    pub snake: Vec<CellCoord>,
    /// Food cell, if placed.
    pub food: Option<CellCoord>,
    /// Whether the session has ended.
    pub defeated: bool,
    /// Current score.
    pub score: u32,
    /// Colors used for every cell kind.
    pub palette: Palette,
    /// Optional side panel.
    pub control_panel: Option<ControlPanelView>,
}

impl Scene {
    /// Creates an empty scene for a grid of the provided dimensions.
    #[must_use]
    pub fn new(columns: u32, rows: u32, walls: Vec<CellCoord>, palette: Palette) -> Self {
        Self {
            columns,
            rows,
            walls,
            snake: Vec::new(),
            food: None,
            defeated: false,
            score: 0,
            palette,
            control_panel: None,
        }
    }

    /// Returns a copy of the scene with a control panel attached.
    #[must_use]
    pub fn with_control_panel(mut self, panel: ControlPanelView) -> Self {
        self.control_panel = Some(panel);
        self
    }

    /// Cells to draw, back to front.
    ///
    /// Walls come first, then food, then the snake from tail to head. The
    /// head of a defeated snake is reported as [`CellKind::DefeatedHead`].
    #[must_use]
    pub fn draw_list(&self) -> Vec<(CellCoord, CellKind)> {
        let mut cells = Vec::with_capacity(self.walls.len() + self.snake.len() + 1);
        cells.extend(self.walls.iter().map(|cell| (*cell, CellKind::Wall)));
        cells.extend(self.food.map(|cell| (cell, CellKind::Food)));

        let head_index = self.snake.len().checked_sub(1);
        cells.extend(self.snake.iter().enumerate().map(|(index, cell)| {
            if self.defeated && Some(index) == head_index {
                (*cell, CellKind::DefeatedHead)
            } else {
                (*cell, CellKind::Snake)
            }
        }));
        cells
    }

    /// Color assigned to a cell kind.
    #[must_use]
    pub const fn color_for(&self, kind: CellKind) -> Color {
        match kind {
            CellKind::Wall => self.palette.wall,
            CellKind::Food => self.palette.food,
            CellKind::Snake => self.palette.snake,
            CellKind::DefeatedHead => self.palette.defeat,
        }
    }
}

/// Presentation descriptor consumed by rendering backends.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Title used by the created window.
    pub window_title: String,
    /// Solid color used to clear each frame.
    pub clear_color: Color,
    /// Scene content that should be displayed.
    pub scene: Scene,
}

impl Presentation {
    /// Constructs a new presentation descriptor.
    #[must_use]
    pub fn new<T>(window_title: T, clear_color: Color, scene: Scene) -> Self
    where
        T: Into<String>,
    {
        Self {
            window_title: window_title.into(),
            clear_color,
            scene,
        }
    }
}

/// Rendering backend capable of presenting Grid Snake scenes.
pub trait RenderingBackend {
    /// Runs the rendering backend until it is requested to exit.
    ///
    /// The provided `update_scene` closure receives the frame delta and the
    /// input captured by the adapter, and refreshes the scene before it is
    /// drawn.
    fn run<F>(self, presentation: Presentation, update_scene: F) -> AnyResult<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) + 'static;
}
