//! Immediate-mode layout context.
//!
//! ## Architecture
//!
//! * **Declaration** (`begin_layout`, `open_element`, `close_element`,
//!   `element`, `text`) — the page rebuilds its whole tree every frame into
//!   a flat node arena.
//! * **Layout** (`end_layout`) — widths first (fit bottom-up, grow
//!   top-down), then text wrapping at the final widths, then heights the
//!   same way, then positions with padding, gaps, alignment and scroll.
//! * **Emission** — a depth-first walk producing a [`RenderCommandArray`].
//! * **Frame memory** — element bounds, hit targets and scroll extents of
//!   the last finished pass.  Hover, click and scroll queries read these,
//!   so they always describe what is currently on screen.

use std::collections::HashMap;

use super::element::{
    AlignX, AlignY, Dimensions, ElementDecl, ElementId, LayoutDirection, ScrollConfig, Sizing,
    TextConfig, UserData,
};
use super::render::{BoundingBox, HitTarget, Point, RenderCommand, RenderCommandArray, ScrollAxis};
use super::theme::Theme;

/// Pixel size of one terminal cell.  Text is measured in whole cells.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellMetrics {
    pub width: f32,
    pub height: f32,
}

impl Default for CellMetrics {
    /// A typical 1:2 terminal cell.
    fn default() -> Self {
        Self { width: 8.0, height: 16.0 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    X,
    Y,
}

#[derive(Debug)]
enum NodeKind {
    Element(ElementDecl),
    Text {
        text: String,
        config: TextConfig,
        lines: Vec<String>,
    },
}

#[derive(Debug)]
struct Node {
    id: ElementId,
    kind: NodeKind,
    children: Vec<usize>,
    size: Dimensions,
    pos: Point,
    scroll_parent: Option<ElementId>,
}

/// Visible box and content size of one scroll container.
#[derive(Debug, Clone, Copy, PartialEq)]
struct ScrollExtent {
    id: ElementId,
    /// Enclosing scroll container, if any.
    parent: Option<ElementId>,
    bounds: BoundingBox,
    content: Dimensions,
    config: ScrollConfig,
}

impl ScrollExtent {
    fn max_offset(&self) -> Point {
        Point::new(
            (self.content.width - self.bounds.width).max(0.0),
            (self.content.height - self.bounds.height).max(0.0),
        )
    }
}

#[derive(Debug, Default)]
struct FrameSnapshot {
    bounds: HashMap<ElementId, BoundingBox>,
    scroll_parents: HashMap<ElementId, ElementId>,
    hit_targets: Vec<HitTarget>,
    /// Every element carrying user data, on screen or not, in tree order.
    focusables: Vec<HitTarget>,
    /// Depth-first order: outermost container first.
    scroll: Vec<ScrollExtent>,
}

/// Per-frame layout context plus the input state that feeds hover, click
/// and scroll.
pub struct Ui {
    viewport: Dimensions,
    metrics: CellMetrics,
    theme: Theme,
    pointer: Option<Point>,
    pressed: Option<ElementId>,
    focus: Option<ElementId>,
    scroll_offsets: HashMap<ElementId, Point>,
    previous: FrameSnapshot,
    pending_scroll: Vec<ScrollExtent>,
    nodes: Vec<Node>,
    open: Vec<usize>,
    frames: u64,
}

const ROOT_NAME: &str = "__layout_root";

impl Ui {
    pub fn new(viewport: Dimensions, metrics: CellMetrics, theme: Theme) -> Self {
        Self {
            viewport,
            metrics,
            theme,
            pointer: None,
            pressed: None,
            focus: None,
            scroll_offsets: HashMap::new(),
            previous: FrameSnapshot::default(),
            pending_scroll: Vec::new(),
            nodes: Vec::new(),
            open: Vec::new(),
            frames: 0,
        }
    }

    pub fn viewport(&self) -> Dimensions {
        self.viewport
    }

    pub fn set_viewport(&mut self, viewport: Dimensions) {
        self.viewport = viewport;
    }

    pub fn metrics(&self) -> CellMetrics {
        self.metrics
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Number of completed layout passes.
    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    // ── declaration ─────────────────────────────────────────────

    /// Start a new pass.  Anything declared by a previous unfinished pass is
    /// discarded.
    pub fn begin_layout(&mut self) {
        self.nodes.clear();
        self.open.clear();
        self.pending_scroll.clear();
        let root = ElementDecl::new()
            .fixed(self.viewport.width, self.viewport.height)
            .direction(LayoutDirection::TopToBottom);
        self.nodes.push(Node {
            id: ElementId::named(ROOT_NAME),
            kind: NodeKind::Element(root),
            children: Vec::new(),
            size: Dimensions::default(),
            pos: Point::default(),
            scroll_parent: None,
        });
        self.open.push(0);
    }

    pub fn open_element(&mut self, decl: ElementDecl) {
        if self.open.is_empty() {
            self.begin_layout();
        }
        let id = decl.id.unwrap_or_else(|| self.next_child_id());
        let idx = self.push_node(id, NodeKind::Element(decl));
        self.open.push(idx);
    }

    pub fn close_element(&mut self) {
        if self.open.len() > 1 {
            self.open.pop();
        } else {
            tracing::warn!("close_element called without a matching open_element");
        }
    }

    /// Declare an element and its children in one go.
    pub fn element(&mut self, decl: ElementDecl, children: impl FnOnce(&mut Ui)) {
        self.open_element(decl);
        children(self);
        self.close_element();
    }

    pub fn text(&mut self, text: &str, config: TextConfig) {
        if self.open.is_empty() {
            self.begin_layout();
        }
        let id = self.next_child_id();
        self.push_node(
            id,
            NodeKind::Text {
                text: text.to_string(),
                config,
                lines: Vec::new(),
            },
        );
    }

    /// Is the currently open element under the pointer (or focused)?
    #[cfg(test)]
    pub fn hovered(&self) -> bool {
        self.open
            .last()
            .is_some_and(|&idx| self.is_hovered(self.nodes[idx].id))
    }

    pub fn is_hovered(&self, id: ElementId) -> bool {
        if self.focus == Some(id) {
            return true;
        }
        match (self.pointer, self.previous.bounds.get(&id)) {
            (Some(p), Some(b)) => {
                b.contains(p) && self.unclipped(self.previous.scroll_parents.get(&id).copied(), p)
            }
            _ => false,
        }
    }

    /// Bounds of `id` as laid out in the last finished pass.
    pub fn element_bounds(&self, id: ElementId) -> Option<BoundingBox> {
        self.previous.bounds.get(&id).copied()
    }

    /// Finish the pass: compute layout and return the draw list.
    pub fn end_layout(&mut self) -> RenderCommandArray {
        if self.nodes.is_empty() {
            self.begin_layout();
        }
        if self.open.len() > 1 {
            tracing::warn!(unclosed = self.open.len() - 1, "closing unbalanced elements");
        }
        self.open.clear();

        self.compute_layout();

        let mut out = RenderCommandArray::default();
        let mut focusables = Vec::new();
        let viewport = BoundingBox::new(0.0, 0.0, self.viewport.width, self.viewport.height);
        self.emit(0, viewport, &mut out, &mut focusables);

        let bounds = self
            .nodes
            .iter()
            .map(|n| (n.id, BoundingBox::new(n.pos.x, n.pos.y, n.size.width, n.size.height)))
            .collect();
        let scroll_parents = self
            .nodes
            .iter()
            .filter_map(|n| n.scroll_parent.map(|sp| (n.id, sp)))
            .collect();
        self.previous = FrameSnapshot {
            bounds,
            scroll_parents,
            hit_targets: out.hit_targets.clone(),
            focusables,
            scroll: std::mem::take(&mut self.pending_scroll),
        };
        if let Some(focus) = self.focus {
            if !self.previous.focusables.iter().any(|t| t.id == focus) {
                self.focus = None;
            }
        }
        self.frames += 1;
        tracing::trace!(nodes = self.nodes.len(), commands = out.len(), "layout pass");
        out
    }

    fn next_child_id(&self) -> ElementId {
        let parent = self.open.last().copied().unwrap_or(0);
        let node = &self.nodes[parent];
        ElementId::child(node.id, node.children.len())
    }

    fn push_node(&mut self, id: ElementId, kind: NodeKind) -> usize {
        let idx = self.nodes.len();
        self.nodes.push(Node {
            id,
            kind,
            children: Vec::new(),
            size: Dimensions::default(),
            pos: Point::default(),
            scroll_parent: None,
        });
        if let Some(&parent) = self.open.last() {
            self.nodes[parent].children.push(idx);
        }
        idx
    }

    // ── input ───────────────────────────────────────────────────

    pub fn pointer(&self) -> Option<Point> {
        self.pointer
    }

    pub fn set_pointer(&mut self, pointer: Option<Point>) {
        self.pointer = pointer;
    }

    /// Topmost interactive element under `p` that is not clipped away by
    /// its scroll container.
    pub fn target_at(&self, p: Point) -> Option<&HitTarget> {
        self.previous
            .hit_targets
            .iter()
            .rev()
            .find(|t| t.bounds.contains(p) && self.unclipped(t.scroll_parent, p))
    }

    /// Is `p` inside every scroll container from `scroll_parent` outwards?
    fn unclipped(&self, mut scroll_parent: Option<ElementId>, p: Point) -> bool {
        while let Some(sp) = scroll_parent {
            let Some(extent) = self.previous.scroll.iter().find(|e| e.id == sp) else {
                return true;
            };
            if !extent.bounds.contains(p) {
                return false;
            }
            scroll_parent = extent.parent;
        }
        true
    }

    fn focusable(&self, id: ElementId) -> Option<&HitTarget> {
        self.previous.focusables.iter().find(|t| t.id == id)
    }

    /// Record a pointer press.
    pub fn press(&mut self, p: Point) {
        self.pointer = Some(p);
        self.pressed = self.target_at(p).map(|t| t.id);
    }

    /// Record a pointer release.  Yields the target's user data when the
    /// release lands on the element that received the press.
    pub fn release(&mut self, p: Point) -> Option<UserData> {
        self.pointer = Some(p);
        let pressed = self.pressed.take()?;
        let target = self.target_at(p)?;
        (target.id == pressed).then(|| target.user_data.clone())
    }

    /// Focused target if any, otherwise the one under the pointer.
    pub fn hovered_target(&self) -> Option<&HitTarget> {
        if let Some(t) = self.focus.and_then(|f| self.focusable(f)) {
            return Some(t);
        }
        self.pointer.and_then(|p| self.target_at(p))
    }

    #[cfg(test)]
    pub fn focused(&self) -> Option<ElementId> {
        self.focus
    }

    pub fn clear_focus(&mut self) {
        self.focus = None;
    }

    pub fn focus_next(&mut self) {
        self.step_focus(true);
    }

    pub fn focus_prev(&mut self) {
        self.step_focus(false);
    }

    /// User data of the focused element, for keyboard activation.
    pub fn activate(&self) -> Option<UserData> {
        self.focusable(self.focus?).map(|t| t.user_data.clone())
    }

    /// Cycle through linked elements, including those scrolled or culled
    /// out of view.
    fn step_focus(&mut self, forward: bool) {
        let links: Vec<&HitTarget> = self
            .previous
            .focusables
            .iter()
            .filter(|t| t.user_data.link.is_some())
            .collect();
        if links.is_empty() {
            self.focus = None;
            return;
        }
        let current = self
            .focus
            .and_then(|f| links.iter().position(|t| t.id == f));
        let next = match (current, forward) {
            (None, true) => 0,
            (None, false) => links.len() - 1,
            (Some(i), true) => (i + 1) % links.len(),
            (Some(i), false) => (i + links.len() - 1) % links.len(),
        };
        let target = links[next].clone();
        self.focus = Some(target.id);
        self.scroll_into_view(&target);
    }

    /// Adjust each enclosing scroll container, innermost first, until
    /// `target` is inside all of them.
    fn scroll_into_view(&mut self, target: &HitTarget) {
        let margin = self.metrics.height;
        let mut rect = target.bounds;
        let mut scroll_parent = target.scroll_parent;
        while let Some(sp) = scroll_parent {
            let Some(extent) = self.previous.scroll.iter().find(|e| e.id == sp).copied() else {
                return;
            };
            let mut delta = Point::default();
            if extent.config.vertical {
                if rect.y < extent.bounds.y {
                    delta.y = rect.y - extent.bounds.y - margin;
                } else if rect.bottom() > extent.bounds.bottom() {
                    delta.y = rect.bottom() - extent.bounds.bottom() + margin;
                }
            }
            if extent.config.horizontal {
                if rect.x < extent.bounds.x {
                    delta.x = rect.x - extent.bounds.x - margin;
                } else if rect.right() > extent.bounds.right() {
                    delta.x = rect.right() - extent.bounds.right() + margin;
                }
            }
            let before = self.scroll_offset(extent.id);
            self.apply_scroll(&extent, delta);
            let after = self.scroll_offset(extent.id);
            rect.x -= after.x - before.x;
            rect.y -= after.y - before.y;
            scroll_parent = extent.parent;
        }
    }

    /// Scroll by `delta` pixels (positive = reveal content further
    /// right/down).  With a pointer position the innermost container under
    /// it is used, otherwise the outermost one that scrolls on the requested
    /// axis.  Returns `true` if an offset changed.
    pub fn scroll_by(&mut self, at: Option<Point>, delta: Point) -> bool {
        let wants = |e: &&ScrollExtent| {
            (delta.x != 0.0 && e.config.horizontal) || (delta.y != 0.0 && e.config.vertical)
        };
        let under_pointer = at.and_then(|p| {
            self.previous
                .scroll
                .iter()
                .filter(wants)
                .filter(|e| e.bounds.contains(p))
                .last()
        });
        let extent = under_pointer.or_else(|| self.previous.scroll.iter().find(wants)).copied();
        match extent {
            Some(extent) => self.apply_scroll(&extent, delta),
            None => false,
        }
    }

    /// Current offset of a scroll container.
    pub fn scroll_offset(&self, id: ElementId) -> Point {
        self.scroll_offsets.get(&id).copied().unwrap_or_default()
    }

    fn apply_scroll(&mut self, extent: &ScrollExtent, delta: Point) -> bool {
        let max = extent.max_offset();
        let current = self.scroll_offset(extent.id);
        let mut next = current;
        if extent.config.horizontal {
            next.x = (current.x + delta.x).clamp(0.0, max.x);
        }
        if extent.config.vertical {
            next.y = (current.y + delta.y).clamp(0.0, max.y);
        }
        self.scroll_offsets.insert(extent.id, next);
        next != current
    }

    // ── layout ──────────────────────────────────────────────────

    fn compute_layout(&mut self) {
        self.fit_size(0, Axis::X);
        self.grow_children(0, Axis::X);
        self.wrap_text();
        self.fit_size(0, Axis::Y);
        self.grow_children(0, Axis::Y);
        self.place(0, Point::default(), None);
    }

    fn size_of(&self, i: usize, axis: Axis) -> f32 {
        match axis {
            Axis::X => self.nodes[i].size.width,
            Axis::Y => self.nodes[i].size.height,
        }
    }

    fn set_size(&mut self, i: usize, axis: Axis, v: f32) {
        match axis {
            Axis::X => self.nodes[i].size.width = v,
            Axis::Y => self.nodes[i].size.height = v,
        }
    }

    fn sizing(&self, i: usize, axis: Axis) -> Sizing {
        match &self.nodes[i].kind {
            NodeKind::Element(decl) => match axis {
                Axis::X => decl.layout.width,
                Axis::Y => decl.layout.height,
            },
            NodeKind::Text { .. } => Sizing::fit(),
        }
    }

    /// Bottom-up content size.  Scroll containers do not grow with their
    /// content along a scrolling axis.
    fn fit_size(&mut self, i: usize, axis: Axis) -> f32 {
        let children = self.nodes[i].children.clone();
        let child_sizes: Vec<f32> = children.iter().map(|&c| self.fit_size(c, axis)).collect();

        let size = match &self.nodes[i].kind {
            NodeKind::Text { text, lines, .. } => match axis {
                Axis::X => longest_line(text) as f32 * self.metrics.width,
                Axis::Y => lines.len().max(1) as f32 * self.metrics.height,
            },
            NodeKind::Element(decl) => {
                let layout = &decl.layout;
                let pad = padding_along(decl, axis);
                let scrolls = scrolls_along(&decl.scroll, axis);
                let content = if scrolls || child_sizes.is_empty() {
                    0.0
                } else if main_axis(layout.direction) == axis {
                    child_sizes.iter().sum::<f32>() + gaps(layout.child_gap, child_sizes.len())
                } else {
                    child_sizes.iter().copied().fold(0.0, f32::max)
                };
                match self.sizing(i, axis) {
                    Sizing::Fixed(v) => v,
                    sizing => {
                        let (min, max) = sizing.bounds();
                        clamp_soft(content + pad, min, max)
                    }
                }
            }
        };
        self.set_size(i, axis, size);
        size
    }

    /// Top-down: hand remaining space to `Grow` children.
    fn grow_children(&mut self, i: usize, axis: Axis) {
        let (layout, scroll, pad) = match &self.nodes[i].kind {
            NodeKind::Element(decl) => (decl.layout, decl.scroll, padding_along(decl, axis)),
            NodeKind::Text { .. } => return,
        };
        let children = self.nodes[i].children.clone();
        if children.is_empty() {
            return;
        }
        let inner = (self.size_of(i, axis) - pad).max(0.0);
        let scrolls = scrolls_along(&scroll, axis);

        if main_axis(layout.direction) == axis {
            let used: f32 = children.iter().map(|&c| self.size_of(c, axis)).sum::<f32>()
                + gaps(layout.child_gap, children.len());
            let mut remaining = inner - used;
            let mut growable: Vec<usize> = children
                .iter()
                .copied()
                .filter(|&c| self.sizing(c, axis).is_grow())
                .collect();
            while remaining > 0.01 && !growable.is_empty() {
                let share = remaining / growable.len() as f32;
                let mut saturated = Vec::new();
                for &c in &growable {
                    let (_, max) = self.sizing(c, axis).bounds();
                    let current = self.size_of(c, axis);
                    let next = (current + share).min(max);
                    remaining -= next - current;
                    self.set_size(c, axis, next);
                    if next >= max {
                        saturated.push(c);
                    }
                }
                if saturated.is_empty() {
                    break;
                }
                growable.retain(|c| !saturated.contains(c));
            }
        } else {
            for &c in &children {
                // Cross-axis grow takes the parent's inner size, even below
                // the content size.
                if let Sizing::Grow { min, max } = self.sizing(c, axis) {
                    self.set_size(c, axis, clamp_soft(inner, min, max));
                }
            }
        }

        // Text never overflows its parent horizontally unless the parent
        // scrolls that way.
        if axis == Axis::X && !scrolls {
            for &c in &children {
                if matches!(self.nodes[c].kind, NodeKind::Text { .. }) && self.nodes[c].size.width > inner {
                    self.nodes[c].size.width = inner;
                }
            }
        }

        for &c in &children {
            self.grow_children(c, axis);
        }
    }

    fn wrap_text(&mut self) {
        let cell_w = self.metrics.width;
        for node in &mut self.nodes {
            let width = node.size.width;
            if let NodeKind::Text { text, lines, .. } = &mut node.kind {
                let max_chars = ((width / cell_w).floor() as usize).max(1);
                *lines = wrap(text, max_chars);
            }
        }
    }

    fn place(&mut self, i: usize, origin: Point, scroll_parent: Option<ElementId>) {
        self.nodes[i].pos = origin;
        self.nodes[i].scroll_parent = scroll_parent;
        let (layout, scroll) = match &self.nodes[i].kind {
            NodeKind::Element(decl) => (decl.layout, decl.scroll),
            NodeKind::Text { .. } => return,
        };
        let id = self.nodes[i].id;
        let size = self.nodes[i].size;
        let children = self.nodes[i].children.clone();
        let pad = layout.padding;
        let inner_w = size.width - pad.horizontal();
        let inner_h = size.height - pad.vertical();
        let gap_total = gaps(layout.child_gap, children.len());

        let (content_w, content_h) = match layout.direction {
            LayoutDirection::LeftToRight => (
                children.iter().map(|&c| self.nodes[c].size.width).sum::<f32>() + gap_total,
                children.iter().map(|&c| self.nodes[c].size.height).fold(0.0, f32::max),
            ),
            LayoutDirection::TopToBottom => (
                children.iter().map(|&c| self.nodes[c].size.width).fold(0.0, f32::max),
                children.iter().map(|&c| self.nodes[c].size.height).sum::<f32>() + gap_total,
            ),
        };

        let offset = if scroll.any() {
            let extent = ScrollExtent {
                id,
                parent: scroll_parent,
                bounds: BoundingBox::new(origin.x, origin.y, size.width, size.height),
                content: Dimensions::new(content_w + pad.horizontal(), content_h + pad.vertical()),
                config: scroll,
            };
            let max = extent.max_offset();
            let stored = self.scroll_offset(id);
            let clamped = Point::new(
                if scroll.horizontal { stored.x.clamp(0.0, max.x) } else { 0.0 },
                if scroll.vertical { stored.y.clamp(0.0, max.y) } else { 0.0 },
            );
            self.scroll_offsets.insert(id, clamped);
            self.pending_scroll.push(extent);
            clamped
        } else {
            Point::default()
        };
        let child_scroll_parent = if scroll.any() { Some(id) } else { scroll_parent };

        let mut cursor = match layout.direction {
            LayoutDirection::LeftToRight => pad.left + align_x(layout.align_x, inner_w - content_w),
            LayoutDirection::TopToBottom => pad.top + align_y(layout.align_y, inner_h - content_h),
        };
        for c in children {
            let cs = self.nodes[c].size;
            let (x, y) = match layout.direction {
                LayoutDirection::LeftToRight => {
                    (cursor, pad.top + align_y(layout.align_y, inner_h - cs.height))
                }
                LayoutDirection::TopToBottom => {
                    (pad.left + align_x(layout.align_x, inner_w - cs.width), cursor)
                }
            };
            let child_origin = Point::new(origin.x + x - offset.x, origin.y + y - offset.y);
            self.place(c, child_origin, child_scroll_parent);
            cursor += match layout.direction {
                LayoutDirection::LeftToRight => cs.width,
                LayoutDirection::TopToBottom => cs.height,
            } + layout.child_gap;
        }
    }

    // ── emission ────────────────────────────────────────────────

    fn emit(
        &self,
        i: usize,
        viewport: BoundingBox,
        out: &mut RenderCommandArray,
        focusables: &mut Vec<HitTarget>,
    ) {
        let node = &self.nodes[i];
        let bounds = BoundingBox::new(node.pos.x, node.pos.y, node.size.width, node.size.height);
        match &node.kind {
            NodeKind::Text { lines, config, .. } => {
                for (n, line) in lines.iter().enumerate() {
                    let line_box = BoundingBox::new(
                        bounds.x,
                        bounds.y + n as f32 * self.metrics.height,
                        line.chars().count() as f32 * self.metrics.width,
                        self.metrics.height,
                    );
                    if line.is_empty() || !line_box.intersects(&viewport) {
                        continue;
                    }
                    out.commands.push(RenderCommand::Text {
                        id: node.id,
                        bounds: line_box,
                        text: line.clone(),
                        config: *config,
                    });
                }
            }
            NodeKind::Element(decl) => {
                let visible = bounds.intersects(&viewport);
                if visible && !decl.background.is_transparent() {
                    out.commands.push(RenderCommand::Rectangle {
                        id: node.id,
                        bounds,
                        color: decl.background,
                        corner_radius: decl.corner_radius,
                    });
                }
                if let (true, Some(image)) = (visible, decl.image) {
                    out.commands.push(RenderCommand::Image {
                        id: node.id,
                        bounds,
                        image: image.image,
                        source: image.source,
                    });
                }
                if let Some(data) = &decl.user_data {
                    let target = HitTarget {
                        id: node.id,
                        bounds,
                        user_data: data.clone(),
                        scroll_parent: node.scroll_parent,
                    };
                    if visible {
                        out.hit_targets.push(target.clone());
                    }
                    focusables.push(target);
                }
                if decl.scroll.any() {
                    out.commands.push(RenderCommand::ScissorStart { id: node.id, bounds });
                }
                for &c in &node.children {
                    self.emit(c, viewport, out, focusables);
                }
                if decl.scroll.any() {
                    out.commands.push(RenderCommand::ScissorEnd { id: node.id });
                    self.emit_scrollbars(node.id, bounds, decl.scroll, out);
                }
                if let (true, Some(border)) = (visible, decl.border) {
                    out.commands.push(RenderCommand::Border {
                        id: node.id,
                        bounds,
                        color: border.color,
                        width: border.width,
                        corner_radius: decl.corner_radius,
                    });
                }
            }
        }
    }

    fn emit_scrollbars(
        &self,
        id: ElementId,
        bounds: BoundingBox,
        scroll: ScrollConfig,
        out: &mut RenderCommandArray,
    ) {
        let Some(extent) = self.pending_scroll.iter().find(|e| e.id == id) else {
            return;
        };
        let offset = self.scroll_offset(id);
        if scroll.vertical && extent.content.height > bounds.height {
            let lane = BoundingBox::new(
                bounds.right() - self.metrics.width,
                bounds.y,
                self.metrics.width,
                bounds.height,
            );
            out.commands.push(RenderCommand::Scrollbar {
                id,
                bounds,
                axis: ScrollAxis::Vertical,
                content: extent.content.height,
                offset: offset.y,
                hovered: self.pointer.is_some_and(|p| lane.contains(p)),
            });
        }
        if scroll.horizontal && extent.content.width > bounds.width {
            let lane = BoundingBox::new(
                bounds.x,
                bounds.bottom() - self.metrics.height,
                bounds.width,
                self.metrics.height,
            );
            out.commands.push(RenderCommand::Scrollbar {
                id,
                bounds,
                axis: ScrollAxis::Horizontal,
                content: extent.content.width,
                offset: offset.x,
                hovered: self.pointer.is_some_and(|p| lane.contains(p)),
            });
        }
    }
}

// ─── helpers ────────────────────────────────────────────────────

fn main_axis(direction: LayoutDirection) -> Axis {
    match direction {
        LayoutDirection::LeftToRight => Axis::X,
        LayoutDirection::TopToBottom => Axis::Y,
    }
}

fn padding_along(decl: &ElementDecl, axis: Axis) -> f32 {
    match axis {
        Axis::X => decl.layout.padding.horizontal(),
        Axis::Y => decl.layout.padding.vertical(),
    }
}

fn scrolls_along(scroll: &ScrollConfig, axis: Axis) -> bool {
    match axis {
        Axis::X => scroll.horizontal,
        Axis::Y => scroll.vertical,
    }
}

fn gaps(gap: f32, count: usize) -> f32 {
    gap * count.saturating_sub(1) as f32
}

/// Like `f32::clamp` but tolerates `min > max` (min wins).
fn clamp_soft(v: f32, min: f32, max: f32) -> f32 {
    v.min(max).max(min)
}

fn align_x(align: AlignX, free: f32) -> f32 {
    if free <= 0.0 {
        return 0.0;
    }
    match align {
        AlignX::Left => 0.0,
        AlignX::Center => free / 2.0,
    }
}

fn align_y(align: AlignY, free: f32) -> f32 {
    if free <= 0.0 {
        return 0.0;
    }
    match align {
        AlignY::Top => 0.0,
        AlignY::Center => free / 2.0,
    }
}

fn longest_line(text: &str) -> usize {
    text.split('\n').map(|l| l.chars().count()).max().unwrap_or(0)
}

/// Greedy word wrap to `max_chars` per line.  Explicit newlines are kept;
/// words longer than a line are split hard.
pub fn wrap(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        let mut line = String::new();
        let mut len = 0usize;
        for word in paragraph.split_whitespace() {
            let mut chars: Vec<char> = word.chars().collect();
            let needed = if len == 0 { chars.len() } else { len + 1 + chars.len() };
            if len > 0 && needed > max_chars {
                lines.push(std::mem::take(&mut line));
                len = 0;
            }
            while chars.len() > max_chars {
                let rest = chars.split_off(max_chars);
                lines.push(chars.into_iter().collect());
                chars = rest;
            }
            if len > 0 {
                line.push(' ');
                len += 1;
            }
            len += chars.len();
            line.extend(chars);
        }
        lines.push(line);
    }
    lines
}
