//! Terminal backend — paints a [`RenderCommandArray`] into a ratatui
//! [`Buffer`].
//!
//! Layout pixels map onto cells through [`CellMetrics`].  Images are drawn
//! with `▀` half-blocks (two pixel rows per cell), borders with box-drawing
//! glyphs, fonts as plain or bold text.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use image::RgbaImage;
use ratatui::buffer::{Buffer, Cell};
use ratatui::layout::{Position, Rect};
use ratatui::style::{Color, Modifier, Style};

use crate::core::element::{Dimensions, FontId, ImageHandle};
use crate::core::layout::CellMetrics;
use crate::core::render::{BoundingBox, RenderCommand, RenderCommandArray, ScrollAxis};
use crate::core::theme::Theme;

use super::theme::{
    placeholder_style, scrollbar_thumb_style, scrollbar_track_style, to_color,
};

// ───────────────────────────────────────── fonts ─────────────

/// A loaded face.  Terminals cannot change typeface, only weight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontFace {
    pub path: PathBuf,
    pub size: u16,
    pub bold: bool,
}

impl FontFace {
    pub fn from_path(path: &Path, size: u16) -> Self {
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        let bold = ["bold", "black", "heavy"].iter().any(|w| stem.contains(w));
        Self {
            path: path.to_path_buf(),
            size,
            bold,
        }
    }
}

/// Faces by id.  `FontId(0)` is the built-in regular face and always
/// present.
#[derive(Debug)]
pub struct FontRegistry {
    faces: HashMap<FontId, FontFace>,
    next: u16,
}

impl Default for FontRegistry {
    fn default() -> Self {
        Self {
            faces: HashMap::new(),
            next: 1,
        }
    }
}

impl FontRegistry {
    pub fn insert(&mut self, face: FontFace) -> FontId {
        let id = FontId(self.next);
        self.next = self.next.wrapping_add(1).max(1);
        self.faces.insert(id, face);
        id
    }

    pub fn remove(&mut self, id: FontId) -> Option<FontFace> {
        self.faces.remove(&id)
    }

    pub fn get(&self, id: FontId) -> Option<&FontFace> {
        self.faces.get(&id)
    }

    pub fn is_bold(&self, id: FontId) -> bool {
        self.get(id).is_some_and(|f| f.bold)
    }

    pub fn len(&self) -> usize {
        self.faces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }
}

// ───────────────────────────────────────── images ────────────

#[derive(Debug)]
struct StoredImage {
    path: PathBuf,
    /// `None` when the file could not be decoded.
    pixels: Option<Arc<RgbaImage>>,
    /// Resized copies keyed by target pixel size.
    scaled: HashMap<(u32, u32), Arc<RgbaImage>>,
}

#[derive(Debug, Default)]
pub struct ImageStore {
    images: HashMap<ImageHandle, StoredImage>,
    next: u32,
}

impl ImageStore {
    pub fn insert(&mut self, path: &Path, pixels: Option<RgbaImage>) -> ImageHandle {
        let handle = ImageHandle(self.next);
        self.next = self.next.wrapping_add(1);
        self.images.insert(
            handle,
            StoredImage {
                path: path.to_path_buf(),
                pixels: pixels.map(Arc::new),
                scaled: HashMap::new(),
            },
        );
        handle
    }

    /// Returns the path the image was loaded from, if the handle was live.
    pub fn remove(&mut self, handle: ImageHandle) -> Option<PathBuf> {
        self.images.remove(&handle).map(|img| img.path)
    }

    pub fn dimensions(&self, handle: ImageHandle) -> Dimensions {
        self.images
            .get(&handle)
            .and_then(|img| img.pixels.as_ref())
            .map(|p| Dimensions::new(p.width() as f32, p.height() as f32))
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Source pixels resized to fit `max_w × max_h`, preserving aspect.
    fn fitted(&mut self, handle: ImageHandle, max_w: u32, max_h: u32) -> Option<Arc<RgbaImage>> {
        use image::imageops::FilterType;

        let img = self.images.get_mut(&handle)?;
        let src = img.pixels.as_ref()?;
        if max_w == 0 || max_h == 0 || src.width() == 0 || src.height() == 0 {
            return None;
        }
        let src_w = f64::from(src.width());
        let src_h = f64::from(src.height());
        let scale = (f64::from(max_w) / src_w).min(f64::from(max_h) / src_h);
        let fit_w = (src_w * scale).round().max(1.0) as u32;
        let fit_h = (src_h * scale).round().max(1.0) as u32;

        if let Some(cached) = img.scaled.get(&(fit_w, fit_h)) {
            return Some(Arc::clone(cached));
        }
        let resized = Arc::new(image::imageops::resize(&**src, fit_w, fit_h, FilterType::Triangle));
        tracing::debug!(path = %img.path.display(), fit_w, fit_h, "scaled image");
        img.scaled.insert((fit_w, fit_h), Arc::clone(&resized));
        Some(resized)
    }
}

// ───────────────────────────────────────── painter ───────────

/// Cell rectangle relative to the page origin; may extend past any edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CellRect {
    x: i32,
    y: i32,
    width: i32,
    height: i32,
}

impl CellRect {
    fn right(&self) -> i32 {
        self.x + self.width
    }

    fn bottom(&self) -> i32 {
        self.y + self.height
    }

    fn intersect(&self, other: &CellRect) -> CellRect {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        CellRect {
            x,
            y,
            width: (self.right().min(other.right()) - x).max(0),
            height: (self.bottom().min(other.bottom()) - y).max(0),
        }
    }

    fn contains(&self, col: i32, row: i32) -> bool {
        col >= self.x && col < self.right() && row >= self.y && row < self.bottom()
    }
}

/// Paints one frame.  Holds the scissor stack for the duration of a
/// [`Painter::paint`] call.
pub struct Painter<'a> {
    area: Rect,
    metrics: CellMetrics,
    theme: &'a Theme,
    fonts: &'a FontRegistry,
    images: &'a mut ImageStore,
    clip: Vec<CellRect>,
}

impl<'a> Painter<'a> {
    pub fn new(
        area: Rect,
        metrics: CellMetrics,
        theme: &'a Theme,
        fonts: &'a FontRegistry,
        images: &'a mut ImageStore,
    ) -> Self {
        Self {
            area,
            metrics,
            theme,
            fonts,
            images,
            clip: Vec::new(),
        }
    }

    pub fn paint(&mut self, commands: &RenderCommandArray, buf: &mut Buffer) {
        self.clip.clear();
        self.clip.push(CellRect {
            x: 0,
            y: 0,
            width: i32::from(self.area.width),
            height: i32::from(self.area.height),
        });

        for command in commands.iter() {
            match command {
                RenderCommand::Rectangle { bounds, color, .. } => {
                    if color.is_transparent() {
                        continue;
                    }
                    let rect = self.cells(bounds);
                    let bg = to_color(*color);
                    self.fill(buf, rect, |cell| {
                        cell.set_char(' ').set_bg(bg);
                    });
                }
                RenderCommand::Border { bounds, color, corner_radius, .. } => {
                    self.border(buf, self.cells(bounds), to_color(*color), *corner_radius > 0.0);
                }
                RenderCommand::Text { bounds, text, config, .. } => {
                    let mut style = Style::default().fg(to_color(config.color));
                    if self.fonts.is_bold(config.font_id) {
                        style = style.add_modifier(Modifier::BOLD);
                    }
                    let rect = self.cells(bounds);
                    for (i, ch) in text.chars().enumerate() {
                        if let Some(cell) = self.cell(buf, rect.x + i as i32, rect.y) {
                            cell.set_char(ch).set_style(style);
                        }
                    }
                }
                RenderCommand::Image { bounds, image, .. } => {
                    self.image(buf, self.cells(bounds), *image);
                }
                RenderCommand::ScissorStart { bounds, .. } => {
                    let rect = self.cells(bounds);
                    let top = self.current_clip();
                    self.clip.push(top.intersect(&rect));
                }
                RenderCommand::ScissorEnd { .. } => {
                    if self.clip.len() > 1 {
                        self.clip.pop();
                    }
                }
                RenderCommand::Scrollbar { bounds, axis, content, offset, hovered, .. } => {
                    self.scrollbar(buf, bounds, *axis, *content, *offset, *hovered);
                }
            }
        }
    }

    fn current_clip(&self) -> CellRect {
        self.clip.last().copied().unwrap_or(CellRect {
            x: 0,
            y: 0,
            width: 0,
            height: 0,
        })
    }

    /// Pixel box → cell box, rounding edges to the nearest cell boundary.
    fn cells(&self, b: &BoundingBox) -> CellRect {
        let x0 = (b.x / self.metrics.width).round() as i32;
        let y0 = (b.y / self.metrics.height).round() as i32;
        let x1 = (b.right() / self.metrics.width).round() as i32;
        let y1 = (b.bottom() / self.metrics.height).round() as i32;
        CellRect {
            x: x0,
            y: y0,
            width: (x1 - x0).max(0),
            height: (y1 - y0).max(0),
        }
    }

    /// Mutable cell at a page-relative position, if it survives clipping.
    fn cell<'b>(&self, buf: &'b mut Buffer, col: i32, row: i32) -> Option<&'b mut Cell> {
        if !self.current_clip().contains(col, row) {
            return None;
        }
        let x = u16::try_from(col).ok()?.checked_add(self.area.x)?;
        let y = u16::try_from(row).ok()?.checked_add(self.area.y)?;
        buf.cell_mut(Position::new(x, y))
    }

    fn fill(&self, buf: &mut Buffer, rect: CellRect, mut f: impl FnMut(&mut Cell)) {
        let visible = rect.intersect(&self.current_clip());
        for row in visible.y..visible.bottom() {
            for col in visible.x..visible.right() {
                if let Some(cell) = self.cell(buf, col, row) {
                    f(cell);
                }
            }
        }
    }

    fn border(&self, buf: &mut Buffer, rect: CellRect, fg: Color, rounded: bool) {
        if rect.width < 2 || rect.height < 2 {
            return;
        }
        let (tl, tr, bl, br) = if rounded {
            ('╭', '╮', '╰', '╯')
        } else {
            ('┌', '┐', '└', '┘')
        };
        let (left, right, top, bottom) = (rect.x, rect.right() - 1, rect.y, rect.bottom() - 1);
        let mut put = |col: i32, row: i32, ch: char| {
            if let Some(cell) = self.cell(buf, col, row) {
                cell.set_char(ch).set_fg(fg);
            }
        };
        for col in left + 1..right {
            put(col, top, '─');
            put(col, bottom, '─');
        }
        for row in top + 1..bottom {
            put(left, row, '│');
            put(right, row, '│');
        }
        put(left, top, tl);
        put(right, top, tr);
        put(left, bottom, bl);
        put(right, bottom, br);
    }

    fn image(&mut self, buf: &mut Buffer, rect: CellRect, handle: ImageHandle) {
        if rect.width <= 0 || rect.height <= 0 {
            return;
        }
        // Each column = 1 px wide, each row = 2 px tall.
        let Some(rgba) = self
            .images
            .fitted(handle, rect.width as u32, rect.height as u32 * 2)
        else {
            let style = placeholder_style(self.theme);
            self.fill(buf, rect, |cell| {
                cell.set_char('░').set_style(style);
            });
            return;
        };

        let (iw, ih) = (rgba.width() as i32, rgba.height() as i32);
        // Centre within the element box.
        let col_offset = (rect.width - iw).max(0) / 2;
        let row_offset = (rect.height - (ih + 1) / 2).max(0) / 2;

        for row in 0..(ih + 1) / 2 {
            let yt = row * 2;
            let yb = yt + 1;
            for col in 0..iw {
                let Some(cell) = self.cell(buf, rect.x + col_offset + col, rect.y + row_offset + row) else {
                    continue;
                };
                let t = rgba.get_pixel(col as u32, yt as u32);
                let fg = Color::Rgb(t[0], t[1], t[2]);
                let bg = if yb < ih {
                    let b = rgba.get_pixel(col as u32, yb as u32);
                    Color::Rgb(b[0], b[1], b[2])
                } else {
                    cell.bg
                };
                cell.set_char('▀').set_fg(fg).set_bg(bg);
            }
        }
    }

    fn scrollbar(
        &self,
        buf: &mut Buffer,
        bounds: &BoundingBox,
        axis: ScrollAxis,
        content: f32,
        offset: f32,
        hovered: bool,
    ) {
        let rect = self.cells(bounds);
        let (len, visible) = match axis {
            ScrollAxis::Vertical => (rect.height, bounds.height),
            ScrollAxis::Horizontal => (rect.width, bounds.width),
        };
        if content <= visible || len < 2 {
            return;
        }
        let h = f64::from(len);
        let thumb_sz = ((f64::from(visible) / f64::from(content)) * h).ceil().max(1.0) as i32;
        let max_off = f64::from(content - visible);
        let thumb_pos = ((f64::from(offset) / max_off) * (h - f64::from(thumb_sz))).round() as i32;

        let thumb = scrollbar_thumb_style(self.theme, hovered);
        let track = scrollbar_track_style(self.theme);
        for i in 0..len {
            let is_thumb = i >= thumb_pos && i < thumb_pos + thumb_sz;
            let (col, row, track_ch) = match axis {
                ScrollAxis::Vertical => (rect.right() - 1, rect.y + i, '│'),
                ScrollAxis::Horizontal => (rect.x + i, rect.bottom() - 1, '─'),
            };
            let (ch, style) = if is_thumb { ('█', thumb) } else { (track_ch, track) };
            if let Some(cell) = self.cell(buf, col, row) {
                cell.set_char(ch).set_style(style);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::element::{ElementId, TextConfig};
    use crate::core::theme::Color as Rgba;

    const METRICS: CellMetrics = CellMetrics { width: 10.0, height: 20.0 };

    fn paint(commands: Vec<RenderCommand>, fonts: &FontRegistry, images: &mut ImageStore) -> Buffer {
        let area = Rect::new(0, 0, 20, 10);
        let mut buf = Buffer::empty(area);
        let theme = Theme::naox();
        let out = RenderCommandArray { commands, hit_targets: Vec::new() };
        Painter::new(area, METRICS, &theme, fonts, images).paint(&out, &mut buf);
        buf
    }

    fn id() -> ElementId {
        ElementId::named("test")
    }

    fn text(s: &str, x: f32, y: f32, font_id: FontId) -> RenderCommand {
        RenderCommand::Text {
            id: id(),
            bounds: BoundingBox::new(x, y, s.chars().count() as f32 * 10.0, 20.0),
            text: s.to_string(),
            config: TextConfig { color: Rgba::rgb(255, 0, 0), font_size: 16, font_id },
        }
    }

    #[test]
    fn font_weight_comes_from_file_stem() {
        assert!(FontFace::from_path(Path::new("assets/Roboto-Bold.ttf"), 24).bold);
        assert!(FontFace::from_path(Path::new("Inter-BLACK.otf"), 24).bold);
        assert!(!FontFace::from_path(Path::new("assets/Roboto-Regular.ttf"), 16).bold);
    }

    #[test]
    fn rectangle_fills_cells_with_background() {
        let fonts = FontRegistry::default();
        let mut images = ImageStore::default();
        let buf = paint(
            vec![RenderCommand::Rectangle {
                id: id(),
                bounds: BoundingBox::new(10.0, 20.0, 30.0, 40.0),
                color: Rgba::rgb(1, 2, 3),
                corner_radius: 0.0,
            }],
            &fonts,
            &mut images,
        );
        assert_eq!(buf[(1, 1)].bg, Color::Rgb(1, 2, 3));
        assert_eq!(buf[(3, 2)].bg, Color::Rgb(1, 2, 3));
        assert_eq!(buf[(4, 1)].bg, Color::Reset);
        assert_eq!(buf[(1, 3)].bg, Color::Reset);
    }

    #[test]
    fn text_keeps_background_and_uses_bold_face() {
        let mut fonts = FontRegistry::default();
        let bold = fonts.insert(FontFace::from_path(Path::new("Roboto-Bold.ttf"), 24));
        let mut images = ImageStore::default();
        let buf = paint(
            vec![
                RenderCommand::Rectangle {
                    id: id(),
                    bounds: BoundingBox::new(0.0, 0.0, 200.0, 20.0),
                    color: Rgba::rgb(9, 9, 9),
                    corner_radius: 0.0,
                },
                text("Hi", 0.0, 0.0, bold),
                text("yo", 0.0, 20.0, FontId(0)),
            ],
            &fonts,
            &mut images,
        );
        assert_eq!(buf[(0, 0)].symbol(), "H");
        assert_eq!(buf[(1, 0)].symbol(), "i");
        assert_eq!(buf[(0, 0)].fg, Color::Rgb(255, 0, 0));
        assert_eq!(buf[(0, 0)].bg, Color::Rgb(9, 9, 9));
        assert!(buf[(0, 0)].modifier.contains(Modifier::BOLD));
        assert!(!buf[(0, 1)].modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn scissor_clips_children() {
        let fonts = FontRegistry::default();
        let mut images = ImageStore::default();
        let buf = paint(
            vec![
                RenderCommand::ScissorStart { id: id(), bounds: BoundingBox::new(0.0, 0.0, 30.0, 40.0) },
                text("abcdef", 0.0, 0.0, FontId(0)),
                text("hidden", 0.0, 60.0, FontId(0)),
                RenderCommand::ScissorEnd { id: id() },
                text("after", 0.0, 80.0, FontId(0)),
            ],
            &fonts,
            &mut images,
        );
        assert_eq!(buf[(2, 0)].symbol(), "c");
        assert_eq!(buf[(3, 0)].symbol(), " ");
        assert_eq!(buf[(0, 3)].symbol(), " ");
        assert_eq!(buf[(0, 4)].symbol(), "a");
    }

    #[test]
    fn rounded_border_uses_arc_corners() {
        let fonts = FontRegistry::default();
        let mut images = ImageStore::default();
        let buf = paint(
            vec![RenderCommand::Border {
                id: id(),
                bounds: BoundingBox::new(0.0, 0.0, 50.0, 60.0),
                color: Rgba::rgb(0, 255, 255),
                width: 2.0,
                corner_radius: 12.0,
            }],
            &fonts,
            &mut images,
        );
        assert_eq!(buf[(0, 0)].symbol(), "╭");
        assert_eq!(buf[(4, 0)].symbol(), "╮");
        assert_eq!(buf[(0, 2)].symbol(), "╰");
        assert_eq!(buf[(4, 2)].symbol(), "╯");
        assert_eq!(buf[(2, 0)].symbol(), "─");
        assert_eq!(buf[(0, 1)].symbol(), "│");
        assert_eq!(buf[(0, 0)].fg, Color::Rgb(0, 255, 255));
    }

    #[test]
    fn missing_image_paints_placeholder() {
        let fonts = FontRegistry::default();
        let mut images = ImageStore::default();
        let handle = images.insert(Path::new("assets/projects/missing.png"), None);
        assert_eq!(images.dimensions(handle), Dimensions::default());
        let buf = paint(
            vec![RenderCommand::Image {
                id: id(),
                bounds: BoundingBox::new(0.0, 0.0, 30.0, 20.0),
                image: handle,
                source: Dimensions::default(),
            }],
            &fonts,
            &mut images,
        );
        assert_eq!(buf[(0, 0)].symbol(), "░");
        assert_eq!(buf[(2, 0)].symbol(), "░");
        assert_eq!(buf[(3, 0)].symbol(), " ");
    }

    #[test]
    fn image_is_drawn_with_half_blocks_and_cached() {
        let fonts = FontRegistry::default();
        let mut images = ImageStore::default();
        // 4×4 image: red top half, blue bottom half.
        let pixels = RgbaImage::from_fn(4, 4, |_, y| {
            if y < 2 {
                image::Rgba([255, 0, 0, 255])
            } else {
                image::Rgba([0, 0, 255, 255])
            }
        });
        let handle = images.insert(Path::new("logo.png"), Some(pixels));
        assert_eq!(images.dimensions(handle), Dimensions::new(4.0, 4.0));

        let command = RenderCommand::Image {
            id: id(),
            bounds: BoundingBox::new(0.0, 0.0, 40.0, 40.0),
            image: handle,
            source: Dimensions::new(4.0, 4.0),
        };
        let buf = paint(vec![command.clone()], &fonts, &mut images);
        // 4 columns × 2 rows → 4×4 px budget, drawn unscaled.
        assert_eq!(buf[(0, 0)].symbol(), "▀");
        assert_eq!(buf[(0, 0)].fg, Color::Rgb(255, 0, 0));
        assert_eq!(buf[(0, 0)].bg, Color::Rgb(255, 0, 0));
        assert_eq!(buf[(0, 1)].fg, Color::Rgb(0, 0, 255));
        assert_eq!(buf[(3, 1)].bg, Color::Rgb(0, 0, 255));

        paint(vec![command], &fonts, &mut images);
        assert_eq!(images.images[&handle].scaled.len(), 1);
    }

    #[test]
    fn scrollbar_thumb_tracks_offset() {
        let fonts = FontRegistry::default();
        let mut images = ImageStore::default();
        let scrollbar = |offset: f32| RenderCommand::Scrollbar {
            id: id(),
            bounds: BoundingBox::new(0.0, 0.0, 100.0, 200.0),
            axis: ScrollAxis::Vertical,
            content: 400.0,
            offset,
            hovered: false,
        };
        let top = paint(vec![scrollbar(0.0)], &fonts, &mut images);
        assert_eq!(top[(9, 0)].symbol(), "█");
        assert_eq!(top[(9, 4)].symbol(), "█");
        assert_eq!(top[(9, 5)].symbol(), "│");

        let bottom = paint(vec![scrollbar(200.0)], &fonts, &mut images);
        assert_eq!(bottom[(9, 0)].symbol(), "│");
        assert_eq!(bottom[(9, 9)].symbol(), "█");
        assert_eq!(bottom[(9, 9)].fg, to_color(Theme::naox().scrollbar_thumb));
    }

    #[test]
    fn registries_hand_out_fresh_ids() {
        let mut fonts = FontRegistry::default();
        let a = fonts.insert(FontFace::from_path(Path::new("a.ttf"), 16));
        let b = fonts.insert(FontFace::from_path(Path::new("b.ttf"), 16));
        assert_ne!(a, b);
        assert_ne!(a, FontId(0));
        assert!(fonts.remove(a).is_some());
        assert!(fonts.remove(a).is_none());
        assert_eq!(fonts.len(), 1);

        let mut images = ImageStore::default();
        let h = images.insert(Path::new("x.png"), None);
        assert_eq!(images.remove(h), Some(PathBuf::from("x.png")));
        assert_eq!(images.len(), 0);
    }
}
