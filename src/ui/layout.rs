//! Layout helpers — split the terminal area into regions.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

use crate::core::element::Dimensions;
use crate::core::layout::CellMetrics;

/// Page area on top, one-line status bar at the bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppLayout {
    pub page_area: Rect,
    pub status_area: Rect,
}

impl AppLayout {
    /// Compute the layout from the full terminal area.
    pub fn from_area(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(3),    // page (takes all remaining space)
                Constraint::Length(1), // status bar
            ])
            .split(area);

        Self {
            page_area: chunks[0],
            status_area: chunks[1],
        }
    }

    /// Size of the page area in layout pixels.
    pub fn viewport(&self, metrics: CellMetrics) -> Dimensions {
        Dimensions::new(
            f32::from(self.page_area.width) * metrics.width,
            f32::from(self.page_area.height) * metrics.height,
        )
    }
}
