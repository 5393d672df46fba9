#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that boots the Grid Snake experience.

mod config;
mod headless;
mod session;

use anyhow::Result;
use clap::Parser;
use grid_snake_rendering::{Color, ControlPanelView, Palette, Presentation, RenderingBackend};
use grid_snake_rendering_macroquad::MacroquadBackend;
use tracing_subscriber::EnvFilter;

use self::{
    config::{CliArgs, RunMode, Settings},
    session::{raw_inputs, Session},
};

const CONTROL_PANEL_WIDTH: f32 = 220.0;
const TARGET_GRID_HEIGHT: u32 = 900;

/// Entry point for the Grid Snake command-line interface.
fn main() -> Result<()> {
    init_tracing();

    let settings = Settings::load(CliArgs::parse())?;
    let session = Session::new(settings.game, settings.bindings)?;

    match settings.mode {
        RunMode::Headless { ticks, script } => {
            let summary = headless::run(session, ticks, script.as_deref())?;
            println!("{summary}");
            Ok(())
        }
        RunMode::Windowed => run_windowed(session),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn run_windowed(mut session: Session) -> Result<()> {
    let scene = session
        .scene(Palette::default())
        .with_control_panel(ControlPanelView::new(
            CONTROL_PANEL_WIDTH,
            Color::from_rgb_u8(24, 24, 24),
        ));
    let (width, height) = window_size(scene.columns, scene.rows);
    let presentation = Presentation::new("Grid Snake", Color::opaque(0.0, 0.0, 0.0), scene);

    MacroquadBackend::new()
        .with_window_size(width, height)
        .run(presentation, move |dt, input, scene| {
            let inputs = raw_inputs(input);
            let _ = session.step(dt, &inputs);
            session.populate_scene(scene);
        })
}

fn window_size(columns: u32, rows: u32) -> (i32, i32) {
    let cell = (TARGET_GRID_HEIGHT / rows.max(1)).clamp(4, 32);
    let width = columns.saturating_mul(cell) as f32 + CONTROL_PANEL_WIDTH;
    let height = rows.saturating_mul(cell);
    (width as i32, i32::try_from(height).unwrap_or(i32::MAX))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_fits_default_grid() {
        assert_eq!(window_size(40, 60), (40 * 15 + 220, 900));
    }

    #[test]
    fn small_grids_get_capped_cells() {
        assert_eq!(window_size(10, 10), (10 * 32 + 220, 320));
    }
}
