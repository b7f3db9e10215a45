//! Display backends
//!
//! The session draws once per step, strictly after the move has been applied,
//! so every frame shows a settled field state. The backend is chosen at
//! construction from a closed set of display modes.

pub mod tui;

use crate::game::FieldState;
use anyhow::Result;

pub use tui::TuiRenderer;

/// Display backend consulted once per step
pub trait Render {
    /// Draw the field after the current step's move has been applied
    fn draw(&mut self, field: &FieldState, points: u32, step_n: u32) -> Result<()>;
}

/// Recognized display modes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayMode {
    /// No output at all
    None,
    /// Terminal UI drawn to the alternate screen
    Terminal,
}

impl DisplayMode {
    /// Build the backend for this mode
    ///
    /// Terminal setup failures surface here, before any step executes.
    pub fn renderer(self) -> Result<Box<dyn Render>> {
        match self {
            DisplayMode::None => Ok(Box::new(NullRenderer)),
            DisplayMode::Terminal => Ok(Box::new(TuiRenderer::new()?)),
        }
    }
}

/// Backend that draws nothing
pub struct NullRenderer;

impl Render for NullRenderer {
    fn draw(&mut self, _field: &FieldState, _points: u32, _step_n: u32) -> Result<()> {
        Ok(())
    }
}
