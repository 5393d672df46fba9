#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Macroquad-backed rendering adapter for Grid Snake.
//!
//! Macroquad's optional audio stack depends on native ALSA development
//! libraries, which are unavailable in the containerised CI environment.
//! To keep `cargo test` usable everywhere we depend on macroquad without its
//! default `audio` feature.
//!
//! The adapter uses Macroquad's immediate-mode UI module for the control
//! panel. All UI-specific calls live inside the local `ui` module.

mod ui;

use self::ui::{draw_control_panel_ui, ControlPanelUiContext, ControlPanelUiResult};
use anyhow::Result;
use glam::Vec2;
use grid_snake_rendering::{
    Color, ControlPanelView, FrameInput, GridLayout, PointerDrag, Presentation, RenderingBackend,
    Scene,
};
use macroquad::math::Vec2 as MacroquadVec2;
use macroquad::input::{
    get_char_pressed, is_key_pressed, is_mouse_button_pressed, is_mouse_button_released,
    mouse_position, KeyCode, MouseButton,
};
use std::time::Duration;

const DEFAULT_WINDOW_WIDTH: i32 = 800;
const DEFAULT_WINDOW_HEIGHT: i32 = 960;

/// Tracks UI-sourced interactions so they can be merged with physical input on the next frame.
#[doc(hidden)]
#[derive(Clone, Copy, Debug, Default)]
pub struct ControlPanelInputState {
    reset_latched: bool,
}

impl ControlPanelInputState {
    /// Returns whether the UI requested a reset and clears the latch so the
    /// action fires only once.
    pub fn take_reset(&mut self) -> bool {
        let latched = self.reset_latched;
        self.reset_latched = false;
        latched
    }

    /// Records that the control-panel button requested a reset this frame.
    pub fn register_reset(&mut self) {
        self.reset_latched = true;
    }
}

/// Press position of a drag that has not been released yet.
#[derive(Clone, Copy, Debug, Default)]
struct PointerTracker {
    pressed_at: Option<Vec2>,
}

impl PointerTracker {
    fn observe(&mut self, position: Vec2, pressed: bool, released: bool) -> Option<PointerDrag> {
        if pressed {
            self.pressed_at = Some(position);
        }
        if !released {
            return None;
        }
        self.pressed_at.take().map(|start| PointerDrag {
            start,
            end: position,
        })
    }
}

/// Rendering backend implemented on top of macroquad.
#[derive(Debug)]
pub struct MacroquadBackend {
    window_width: i32,
    window_height: i32,
}

impl Default for MacroquadBackend {
    fn default() -> Self {
        Self {
            window_width: DEFAULT_WINDOW_WIDTH,
            window_height: DEFAULT_WINDOW_HEIGHT,
        }
    }
}

impl MacroquadBackend {
    /// Returns a backend that opens a window of the default size.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the initial window size in pixels.
    #[must_use]
    pub fn with_window_size(mut self, width: i32, height: i32) -> Self {
        self.window_width = width.max(1);
        self.window_height = height.max(1);
        self
    }
}

impl RenderingBackend for MacroquadBackend {
    fn run<F>(self, presentation: Presentation, mut update_scene: F) -> Result<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) + 'static,
    {
        let Self {
            window_width,
            window_height,
        } = self;

        let Presentation {
            window_title,
            clear_color,
            scene,
        } = presentation;

        let config = macroquad::window::Conf {
            window_title,
            window_width,
            window_height,
            window_resizable: true,
            ..macroquad::window::Conf::default()
        };

        macroquad::Window::from_config(config, async move {
            let mut scene = scene;
            let background = to_macroquad_color(clear_color);
            let mut control_panel_input = ControlPanelInputState::default();
            let mut pointer = PointerTracker::default();
            let mut last_layout: Option<GridLayout> = None;

            loop {
                if is_key_pressed(KeyCode::Escape) {
                    tracing::info!("quit requested");
                    break;
                }

                macroquad::window::clear_background(background);

                let screen = Vec2::new(
                    macroquad::window::screen_width(),
                    macroquad::window::screen_height(),
                );
                let layout = layout_for(&scene, screen);
                if last_layout.map(|previous| previous.cell_size) != Some(layout.cell_size) {
                    tracing::debug!(
                        width = screen.x,
                        height = screen.y,
                        cell_size = layout.cell_size,
                        "grid layout refitted"
                    );
                }
                last_layout = Some(layout);

                let (cursor_x, cursor_y) = mouse_position();
                let drag = pointer.observe(
                    Vec2::new(cursor_x, cursor_y),
                    is_mouse_button_pressed(MouseButton::Left),
                    is_mouse_button_released(MouseButton::Left),
                );
                let typed: Vec<char> = std::iter::from_fn(get_char_pressed).collect();
                let frame_input = gather_frame_input_from_observations(
                    &layout,
                    typed,
                    drag,
                    control_panel_input.take_reset(),
                );

                let dt_seconds = macroquad::time::get_frame_time();
                let frame_dt = Duration::from_secs_f32(dt_seconds.max(0.0));
                update_scene(frame_dt, frame_input, &mut scene);

                draw_cells(&scene, &layout);

                if let Some(panel_context) = draw_control_panel(&scene, screen) {
                    let mut control_panel_ui = macroquad::ui::root_ui();
                    let ControlPanelUiResult { reset_pressed } =
                        draw_control_panel_ui(&mut control_panel_ui, panel_context);
                    if reset_pressed {
                        control_panel_input.register_reset();
                    }
                }

                macroquad::window::next_frame().await;
            }
        });

        Ok(())
    }
}

fn panel_width(scene: &Scene, screen_width: f32) -> f32 {
    scene
        .control_panel
        .map(|panel| panel.width.max(0.0))
        .unwrap_or(0.0)
        .min(screen_width)
}

fn layout_for(scene: &Scene, screen: Vec2) -> GridLayout {
    let available = Vec2::new((screen.x - panel_width(scene, screen.x)).max(0.0), screen.y);
    GridLayout::fit(available, scene.columns, scene.rows)
}

fn gather_frame_input_from_observations(
    layout: &GridLayout,
    typed: Vec<char>,
    drag: Option<PointerDrag>,
    reset_requested: bool,
) -> FrameInput {
    FrameInput {
        typed,
        drag: drag.and_then(|drag| layout.drag_in_cells(drag)),
        reset_requested,
    }
}

fn draw_cells(scene: &Scene, layout: &GridLayout) {
    if layout.cell_size <= f32::EPSILON {
        return;
    }

    for (cell, kind) in scene.draw_list() {
        let origin = layout.cell_origin(cell);
        macroquad::shapes::draw_rectangle(
            origin.x,
            origin.y,
            layout.cell_size,
            layout.cell_size,
            to_macroquad_color(scene.color_for(kind)),
        );
    }
}

fn draw_control_panel(scene: &Scene, screen: Vec2) -> Option<ControlPanelUiContext> {
    let Some(ControlPanelView { width, background }) = scene.control_panel else {
        return None;
    };
    if width <= f32::EPSILON {
        return None;
    }

    let left = (screen.x - width).max(0.0);
    let background_color = to_macroquad_color(background);
    macroquad::shapes::draw_rectangle(left, 0.0, width, screen.y, background_color);

    Some(ControlPanelUiContext {
        origin: MacroquadVec2::new(left, 0.0),
        size: MacroquadVec2::new(width, screen.y),
        background: background_color,
        score: scene.score,
        defeated: scene.defeated,
    })
}

fn to_macroquad_color(color: Color) -> macroquad::color::Color {
    macroquad::color::Color::new(color.red, color.green, color.blue, color.alpha)
}
