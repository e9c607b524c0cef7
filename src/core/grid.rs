//! Responsive card grid.
//!
//! The grid is bound to a named container.  Each pass it reads that
//! container's width from the previous frame, works out how many columns of
//! fixed-size cells fit, and emits the cells as rows.  Callers draw the
//! contents of every cell through a per-item callback.

use super::element::{AlignX, AlignY, ElementDecl, ElementId, LayoutDirection, Padding, Sizing};
use super::layout::Ui;

/// Sizing rules for grid cells.
#[derive(Debug, Clone, PartialEq)]
pub struct GridConfig {
    pub min_width: f32,
    pub max_width: f32,
    pub min_height: f32,
    pub max_height: f32,
    /// Width ÷ height used to derive the cell height from its width.
    pub aspect_ratio: f32,
    pub gap: f32,
    /// Fixed column count; `0` fits as many columns as the width allows.
    pub columns: usize,
    pub padding: f32,
    /// Extra room left below the last row.
    pub extra_height: f32,
    /// Name of the element whose width drives the placement.
    pub container: String,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            min_width: 400.0,
            max_width: 500.0,
            min_height: 450.0,
            max_height: 500.0,
            aspect_ratio: 1.33,
            gap: 30.0,
            columns: 0,
            padding: 20.0,
            extra_height: 200.0,
            container: "GridContainer".to_string(),
        }
    }
}

/// One registered item.  A zero width/height means "use the cell size".
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridItem {
    pub key: usize,
    pub width: f32,
    pub height: f32,
}

/// Result of fitting the grid into a container width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridPlacement {
    pub columns: usize,
    pub rows: usize,
    pub item_width: f32,
    pub item_height: f32,
    pub content_width: f32,
    pub content_height: f32,
}

#[derive(Debug)]
pub struct Grid {
    config: GridConfig,
    items: Vec<GridItem>,
    placement: Option<GridPlacement>,
    /// Whether a row element is currently open.
    row_open: bool,
    rendered: usize,
    /// Set when the grid is dropped.
    #[cfg(test)]
    pub(crate) dropped: Option<std::rc::Rc<std::cell::Cell<bool>>>,
}

impl Grid {
    pub fn new(config: GridConfig) -> Self {
        tracing::debug!(container = %config.container, columns = config.columns, "grid created");
        Self {
            config,
            items: Vec::new(),
            placement: None,
            row_open: false,
            rendered: 0,
            #[cfg(test)]
            dropped: None,
        }
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn add_item(&mut self, width: f32, height: f32, key: usize) {
        self.items.push(GridItem { key, width, height });
    }

    /// Placement of the last pass, if any.
    #[cfg(test)]
    pub fn placement(&self) -> Option<GridPlacement> {
        self.placement
    }

    /// Fit the registered items into `container_width`.
    pub fn placement_for(&self, container_width: f32) -> GridPlacement {
        let c = &self.config;
        let n = self.items.len();
        let avail = (container_width - 2.0 * c.padding).max(0.0);

        let mut columns = if c.columns > 0 {
            c.columns
        } else {
            let per_column = c.min_width + c.gap;
            if per_column > 0.0 {
                ((avail + c.gap) / per_column).floor().max(1.0) as usize
            } else {
                1
            }
        };
        if n > 0 {
            columns = columns.min(n);
        }

        let gaps = c.gap * (columns - 1) as f32;
        let item_width = ((avail - gaps) / columns as f32)
            .min(c.max_width)
            .max(c.min_width);
        let aspect = if c.aspect_ratio > 0.0 { c.aspect_ratio } else { 1.0 };
        let item_height = (item_width / aspect).min(c.max_height).max(c.min_height);
        let rows = n.div_ceil(columns);

        let content_width = columns as f32 * item_width + gaps + 2.0 * c.padding;
        let content_height = rows as f32 * item_height
            + c.gap * rows.saturating_sub(1) as f32
            + 2.0 * c.padding
            + c.extra_height;

        GridPlacement {
            columns,
            rows,
            item_width,
            item_height,
            content_width,
            content_height,
        }
    }

    /// Open the grid for this frame.  Must be paired with [`Grid::end`].
    pub fn begin(&mut self, ui: &mut Ui) {
        let width = ui
            .element_bounds(ElementId::named(&self.config.container))
            .map(|b| b.width)
            .unwrap_or_else(|| ui.viewport().width);
        let placement = self.placement_for(width);
        if self.placement.map(|p| p.columns) != Some(placement.columns) {
            tracing::debug!(
                columns = placement.columns,
                rows = placement.rows,
                item_width = placement.item_width,
                item_height = placement.item_height,
                "grid placement changed"
            );
        }
        self.placement = Some(placement);
        self.row_open = false;
        self.rendered = 0;

        ui.open_element(
            ElementDecl::new()
                .size(Sizing::Fixed(placement.content_width), Sizing::fit())
                .padding(Padding {
                    left: self.config.padding,
                    right: self.config.padding,
                    top: self.config.padding,
                    bottom: self.config.padding + self.config.extra_height,
                })
                .gap(self.config.gap)
                .direction(LayoutDirection::TopToBottom),
        );
    }

    /// Emit the cell for item `index` and draw it with `draw(ui, key)`.
    pub fn render_item(&mut self, ui: &mut Ui, index: usize, draw: impl FnOnce(&mut Ui, usize)) {
        let (Some(placement), Some(item)) = (self.placement, self.items.get(index).copied()) else {
            tracing::warn!(index, "grid item rendered outside a pass or not registered");
            return;
        };

        if self.rendered % placement.columns == 0 {
            self.close_row(ui);
            ui.open_element(ElementDecl::new().gap(self.config.gap));
            self.row_open = true;
        }

        let width = if item.width > 0.0 { item.width } else { placement.item_width };
        let height = if item.height > 0.0 { item.height } else { placement.item_height };
        ui.element(
            ElementDecl::new()
                .fixed(width, height)
                .align(AlignX::Center, AlignY::Top),
            |ui| draw(ui, item.key),
        );
        self.rendered += 1;
    }

    /// Close the grid opened by [`Grid::begin`].
    pub fn end(&mut self, ui: &mut Ui) {
        if self.placement.is_none() {
            return;
        }
        self.close_row(ui);
        ui.close_element();
    }

    fn close_row(&mut self, ui: &mut Ui) {
        if self.row_open {
            ui.close_element();
            self.row_open = false;
        }
    }
}

impl Drop for Grid {
    fn drop(&mut self) {
        tracing::debug!(container = %self.config.container, "grid destroyed");
        #[cfg(test)]
        if let Some(flag) = &self.dropped {
            flag.set(true);
        }
    }
}
