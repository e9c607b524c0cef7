//! Output of a layout pass: an ordered list of draw commands plus the
//! interactive regions for hit-testing.

use super::element::{Dimensions, ElementId, ImageHandle, TextConfig, UserData};
use super::theme::Color;

/// A point in layout pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned box in layout pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoundingBox {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl BoundingBox {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Half-open containment: the right and bottom edges are outside.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x < self.right() && p.y >= self.y && p.y < self.bottom()
    }

    pub fn intersects(&self, other: &BoundingBox) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollAxis {
    Horizontal,
    Vertical,
}

/// One draw instruction.  Backends execute these strictly in order.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderCommand {
    Rectangle {
        id: ElementId,
        bounds: BoundingBox,
        color: Color,
        corner_radius: f32,
    },
    Border {
        id: ElementId,
        bounds: BoundingBox,
        color: Color,
        width: f32,
        corner_radius: f32,
    },
    /// A single wrapped line of text.
    Text {
        id: ElementId,
        bounds: BoundingBox,
        text: String,
        config: TextConfig,
    },
    Image {
        id: ElementId,
        bounds: BoundingBox,
        image: ImageHandle,
        source: Dimensions,
    },
    /// Clip everything until the matching `ScissorEnd` to `bounds`.
    ScissorStart { id: ElementId, bounds: BoundingBox },
    ScissorEnd { id: ElementId },
    Scrollbar {
        id: ElementId,
        bounds: BoundingBox,
        axis: ScrollAxis,
        /// Total content length along `axis`.
        content: f32,
        /// Current scroll offset along `axis`.
        offset: f32,
        hovered: bool,
    },
}

/// An element carrying user data, with its on-screen box.
#[derive(Debug, Clone, PartialEq)]
pub struct HitTarget {
    pub id: ElementId,
    pub bounds: BoundingBox,
    pub user_data: UserData,
    /// Innermost scroll container holding this element, if any.
    pub scroll_parent: Option<ElementId>,
}

/// Everything a backend needs to draw one frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderCommandArray {
    pub commands: Vec<RenderCommand>,
    pub hit_targets: Vec<HitTarget>,
}

impl RenderCommandArray {
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RenderCommand> {
        self.commands.iter()
    }

    /// All text lines in draw order, concatenated per command.
    #[cfg(test)]
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            RenderCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}
