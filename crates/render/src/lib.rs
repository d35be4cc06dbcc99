//! Presentation of render snapshots.
//!
//! Renderers never touch the sampling state; they receive one
//! [`RenderSnapshot`] per tick and keep whatever they need to redraw.

pub mod chart;
pub mod export;
pub mod json;
pub mod meter;
pub mod terminal;

pub use json::JsonRenderer;
pub use terminal::{TerminalGuard, TerminalRenderer};

use memtrack_core::{RenderSnapshot, Result};
use memtrack_theme::Theme;
use std::path::{Path, PathBuf};

/// Every front end (terminal, JSON lines, …) implements this trait.
pub trait Renderer {
    /// Present a freshly sampled snapshot.
    fn render(&mut self, snapshot: &RenderSnapshot) -> Result<()>;

    /// Switch palettes and redraw the last snapshot with them.
    fn apply_theme(&mut self, theme: &Theme) -> Result<()>;

    /// Reflect the sampler's pause state (e.g. the Pause/Resume hint).
    fn set_paused(&mut self, paused: bool) -> Result<()>;

    /// Save the current chart. `target` may be a directory or a file path;
    /// returns the file written.
    fn export_graph(&self, target: &Path) -> Result<PathBuf>;

    /// Show a one-off status message, such as where a graph was saved.
    fn notify(&mut self, _message: &str) -> Result<()> {
        Ok(())
    }
}
