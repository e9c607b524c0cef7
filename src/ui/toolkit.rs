//! The seam between the application and whatever draws it.
//!
//! The application only ever talks to a [`Toolkit`]: it loads fonts and
//! images through it, hands it a per-frame callback, and releases everything
//! it acquired once the loop returns.

use std::future::Future;
use std::path::Path;

use thiserror::Error;

use crate::config::AppConfig;
use crate::core::element::{Dimensions, FontId, ImageHandle};
use crate::core::layout::{CellMetrics, Ui};
use crate::core::render::RenderCommandArray;
use crate::core::theme::Theme;

/// Window, theme and input settings handed to [`Toolkit::init`].
#[derive(Debug, Clone, PartialEq)]
pub struct ToolkitConfig {
    pub window_width: u32,
    pub window_height: u32,
    pub window_title: String,
    pub theme: Theme,
    pub metrics: CellMetrics,
    /// Key bindings used by the run loop.
    pub keys: AppConfig,
}

#[derive(Debug, Error)]
pub enum ToolkitError {
    #[error("toolkit initialisation failed: {0}")]
    Init(#[source] std::io::Error),
    #[error("terminal I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Rendering/layout backend.
///
/// Loading never fails from the caller's point of view: an unreadable font
/// falls back to the default face and an unreadable image to a placeholder.
pub trait Toolkit: Sized {
    fn init(config: &ToolkitConfig) -> Result<Self, ToolkitError>;

    fn load_font(&mut self, path: &Path, size: u16) -> FontId;

    fn load_image(&mut self, path: &Path) -> ImageHandle;

    /// Source dimensions of a loaded image (`0 × 0` for placeholders).
    fn image_dimensions(&self, image: ImageHandle) -> Dimensions;

    /// Drive the event/render loop, calling `update(ui, dt)` once per frame
    /// until the user closes the window.
    fn run<F>(&mut self, update: F) -> impl Future<Output = Result<(), ToolkitError>>
    where
        F: FnMut(&mut Ui, f32) -> RenderCommandArray;

    fn unload_font(&mut self, font: FontId);

    fn unload_image(&mut self, image: ImageHandle);

    /// Release the toolkit context itself.
    fn cleanup(self);
}
