//! Declaration types for the immediate-mode element tree.
//!
//! A page is described every frame as nested [`ElementDecl`]s and text runs.
//! These types only *describe* layout; the math lives in
//! [`crate::core::layout`].

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use super::theme::Color;

// ───────────────────────────────────────── handles ───────────

/// Toolkit-issued font identifier.  The toolkit owns the face; callers
/// only hold the id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FontId(pub u16);

/// Toolkit-issued image handle.  References a decoded image owned by the
/// toolkit; dropping the handle does not free anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImageHandle(pub u32);

/// Width × height in layout pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Dimensions {
    pub width: f32,
    pub height: f32,
}

impl Dimensions {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

// ───────────────────────────────────────── ids ───────────────

/// Stable element identity, used to carry hover, scroll and bounds data from
/// one frame to the next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementId(pub u64);

impl ElementId {
    /// Id for an explicitly named element (e.g. `"GridContainer"`).
    pub fn named(name: &str) -> Self {
        let mut h = DefaultHasher::new();
        name.hash(&mut h);
        Self(h.finish())
    }

    /// Id for an anonymous element: derived from its parent and its
    /// position among the parent's children.
    pub fn child(parent: ElementId, index: usize) -> Self {
        let mut h = DefaultHasher::new();
        parent.0.hash(&mut h);
        index.hash(&mut h);
        Self(h.finish())
    }
}

// ───────────────────────────────────────── layout config ─────

/// Sizing rule along one axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Sizing {
    /// Wrap the content, clamped to `[min, max]`.
    Fit { min: f32, max: f32 },
    /// Take all remaining space in the parent, clamped to `[min, max]`.
    Grow { min: f32, max: f32 },
    /// Exactly this many pixels.
    Fixed(f32),
}

impl Sizing {
    pub const fn fit() -> Self {
        Sizing::Fit { min: 0.0, max: f32::MAX }
    }

    pub const fn grow() -> Self {
        Sizing::Grow { min: 0.0, max: f32::MAX }
    }

    pub(crate) fn bounds(self) -> (f32, f32) {
        match self {
            Sizing::Fit { min, max } | Sizing::Grow { min, max } => (min, max),
            Sizing::Fixed(v) => (v, v),
        }
    }

    pub(crate) fn is_grow(self) -> bool {
        matches!(self, Sizing::Grow { .. })
    }
}

impl Default for Sizing {
    fn default() -> Self {
        Sizing::fit()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Padding {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl Padding {
    pub const fn all(v: f32) -> Self {
        Self { left: v, right: v, top: v, bottom: v }
    }

    pub fn horizontal(&self) -> f32 {
        self.left + self.right
    }

    pub fn vertical(&self) -> f32 {
        self.top + self.bottom
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LayoutDirection {
    #[default]
    LeftToRight,
    TopToBottom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AlignX {
    #[default]
    Left,
    Center,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AlignY {
    #[default]
    Top,
    Center,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LayoutConfig {
    pub width: Sizing,
    pub height: Sizing,
    pub padding: Padding,
    pub child_gap: f32,
    pub direction: LayoutDirection,
    pub align_x: AlignX,
    pub align_y: AlignY,
}

// ───────────────────────────────────────── decorations ───────

/// Uniform border drawn on top of the element and its children.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Border {
    pub color: Color,
    pub width: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScrollConfig {
    pub horizontal: bool,
    pub vertical: bool,
}

impl ScrollConfig {
    pub fn any(&self) -> bool {
        self.horizontal || self.vertical
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImageConfig {
    pub image: ImageHandle,
    pub source: Dimensions,
}

/// Arbitrary per-element data the toolkit acts on during input dispatch.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UserData {
    /// Show a "pointer" affordance while hovered.
    pub cursor_pointer: bool,
    /// Opened on pointer release / keyboard activation.
    pub link: Option<String>,
}

/// Text style for a run of text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextConfig {
    pub color: Color,
    pub font_size: u16,
    pub font_id: FontId,
}

// ───────────────────────────────────────── element ───────────

/// Full declaration of one element for the current frame.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ElementDecl {
    pub id: Option<ElementId>,
    pub layout: LayoutConfig,
    pub background: Color,
    pub corner_radius: f32,
    pub border: Option<Border>,
    pub image: Option<ImageConfig>,
    pub scroll: ScrollConfig,
    pub user_data: Option<UserData>,
}

impl ElementDecl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(self, name: &str) -> Self {
        self.element_id(ElementId::named(name))
    }

    pub fn element_id(mut self, id: ElementId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn size(mut self, width: Sizing, height: Sizing) -> Self {
        self.layout.width = width;
        self.layout.height = height;
        self
    }

    pub fn fixed(self, width: f32, height: f32) -> Self {
        self.size(Sizing::Fixed(width), Sizing::Fixed(height))
    }

    pub fn padding(mut self, padding: Padding) -> Self {
        self.layout.padding = padding;
        self
    }

    pub fn gap(mut self, gap: f32) -> Self {
        self.layout.child_gap = gap;
        self
    }

    pub fn direction(mut self, direction: LayoutDirection) -> Self {
        self.layout.direction = direction;
        self
    }

    pub fn align(mut self, x: AlignX, y: AlignY) -> Self {
        self.layout.align_x = x;
        self.layout.align_y = y;
        self
    }

    pub fn background(mut self, color: Color) -> Self {
        self.background = color;
        self
    }

    pub fn corner_radius(mut self, radius: f32) -> Self {
        self.corner_radius = radius;
        self
    }

    pub fn border(mut self, color: Color, width: f32) -> Self {
        self.border = Some(Border { color, width });
        self
    }

    pub fn image(mut self, image: ImageHandle, source: Dimensions) -> Self {
        self.image = Some(ImageConfig { image, source });
        self
    }

    pub fn scroll(mut self, horizontal: bool, vertical: bool) -> Self {
        self.scroll = ScrollConfig { horizontal, vertical };
        self
    }

    pub fn user_data(mut self, data: UserData) -> Self {
        self.user_data = Some(data);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_ids_are_stable_and_distinct() {
        assert_eq!(ElementId::named("GridContainer"), ElementId::named("GridContainer"));
        assert_ne!(ElementId::named("GridContainer"), ElementId::named("Root"));
    }

    #[test]
    fn child_ids_depend_on_parent_and_index() {
        let root = ElementId::named("Root");
        let other = ElementId::named("Other");
        assert_eq!(ElementId::child(root, 2), ElementId::child(root, 2));
        assert_ne!(ElementId::child(root, 2), ElementId::child(root, 3));
        assert_ne!(ElementId::child(root, 2), ElementId::child(other, 2));
    }

    #[test]
    fn builder_sets_fixed_sizes() {
        let decl = ElementDecl::new().fixed(400.0, 420.0).gap(20.0);
        assert_eq!(decl.layout.width, Sizing::Fixed(400.0));
        assert_eq!(decl.layout.height, Sizing::Fixed(420.0));
        assert_eq!(decl.layout.child_gap, 20.0);
        assert!(decl.user_data.is_none());
    }
}
