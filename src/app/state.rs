//! Application context — every handle acquired at start-up, owned in one
//! place and released in one place.

use crate::config::{LandingConfig, LayoutStrategy};
use crate::core::element::{Dimensions, FontId, ImageHandle};
use crate::core::grid::Grid;
use crate::core::project::{Project, PROJECTS};
use crate::ui::toolkit::Toolkit;

/// Point size the title face is loaded at.
pub const TITLE_FONT_SIZE: u16 = 24;
/// Point size the body face is loaded at.
pub const BODY_FONT_SIZE: u16 = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FontSet {
    pub title: FontId,
    pub body: FontId,
}

/// An image handle together with its source size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoadedImage {
    pub handle: ImageHandle,
    pub dimensions: Dimensions,
}

impl LoadedImage {
    fn load<T: Toolkit>(toolkit: &mut T, path: &std::path::Path) -> Self {
        let handle = toolkit.load_image(path);
        Self {
            handle,
            dimensions: toolkit.image_dimensions(handle),
        }
    }
}

/// One card: a static project record plus its thumbnail.
#[derive(Debug, Clone, Copy)]
pub struct ProjectCard {
    pub project: &'static Project,
    pub image: LoadedImage,
}

#[derive(Debug)]
pub struct AppContext {
    pub fonts: FontSet,
    pub logo: LoadedImage,
    pub cards: Vec<ProjectCard>,
    /// Present only for [`LayoutStrategy::Grid`].
    pub grid: Option<Grid>,
    pub layout: LayoutStrategy,
}

impl AppContext {
    /// Acquire fonts, logo, grid helper and project thumbnails, in that
    /// order.
    pub fn load<T: Toolkit>(toolkit: &mut T, config: &LandingConfig) -> Self {
        let fonts = FontSet {
            title: toolkit.load_font(&config.title_font_path(), TITLE_FONT_SIZE),
            body: toolkit.load_font(&config.body_font_path(), BODY_FONT_SIZE),
        };
        let logo = LoadedImage::load(toolkit, &config.logo_path());

        let mut grid = match config.layout {
            LayoutStrategy::Grid => Some(Grid::new(config.grid.clone())),
            LayoutStrategy::Row => None,
        };

        let mut cards = Vec::with_capacity(PROJECTS.len());
        for (i, project) in PROJECTS.iter().enumerate() {
            let path = project.image_path(&config.assets_dir);
            tracing::info!(path = %path.display(), "loading image");
            let image = LoadedImage::load(toolkit, &path);
            cards.push(ProjectCard { project, image });
            if let Some(grid) = grid.as_mut() {
                grid.add_item(0.0, 0.0, i);
            }
        }

        Self {
            fonts,
            logo,
            cards,
            grid,
            layout: config.layout,
        }
    }

    /// Release everything [`AppContext::load`] acquired.  Consumes the
    /// context, so nothing can be released twice.
    pub fn release<T: Toolkit>(mut self, toolkit: &mut T) {
        drop(self.grid.take());
        toolkit.unload_font(self.fonts.title);
        toolkit.unload_font(self.fonts.body);
        toolkit.unload_image(self.logo.handle);
        for card in &self.cards {
            toolkit.unload_image(card.image.handle);
        }
        tracing::debug!(images = self.cards.len() + 1, "assets released");
    }
}
