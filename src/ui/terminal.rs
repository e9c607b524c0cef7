//! Terminal toolkit — crossterm input, ratatui output.
//!
//! The TUI is drawn on the alternate screen through **stderr**, so stdout
//! stays free for `--list-assets` / `--print-config` output.

use std::io::{self, stderr, Stderr};
use std::path::Path;
use std::time::{Duration, Instant};

use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle},
};
use ratatui::{backend::CrosstermBackend, layout::Rect, widgets::Paragraph, Terminal};

use crate::app::event::{spawn_event_reader, AppEvent};
use crate::app::handler::{self, Outcome};
use crate::config::AppConfig;
use crate::core::element::{Dimensions, FontId, ImageHandle};
use crate::core::layout::{CellMetrics, Ui};
use crate::core::render::RenderCommandArray;
use crate::core::theme::Theme;
use crate::shell::browser;

use super::backend::{FontFace, FontRegistry, ImageStore, Painter};
use super::layout::AppLayout;
use super::theme::{status_bar_style, status_link_style};
use super::toolkit::{Toolkit, ToolkitConfig, ToolkitError};

const TICK_RATE: Duration = Duration::from_millis(100);
/// How long a status message stays in the status bar.
const STATUS_TTL: Duration = Duration::from_secs(4);

type Term = Terminal<CrosstermBackend<Stderr>>;

pub struct TerminalToolkit {
    terminal: Term,
    theme: Theme,
    metrics: CellMetrics,
    keys: AppConfig,
    fonts: FontRegistry,
    images: ImageStore,
    restored: bool,
}

fn setup_terminal(title: &str) -> io::Result<Term> {
    enable_raw_mode()?;
    let mut stderr_handle = stderr();
    execute!(stderr_handle, EnterAlternateScreen, EnableMouseCapture, SetTitle(title))?;
    Terminal::new(CrosstermBackend::new(stderr()))
}

impl TerminalToolkit {
    fn restore(&mut self) -> io::Result<()> {
        if self.restored {
            return Ok(());
        }
        self.restored = true;
        disable_raw_mode()?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
        self.terminal.show_cursor()
    }

    fn draw(
        &mut self,
        ui: &Ui,
        commands: &RenderCommandArray,
        layout: AppLayout,
        status: Option<&str>,
    ) -> Result<(), ToolkitError> {
        let theme = self.theme;
        let metrics = self.metrics;
        let fonts = &self.fonts;
        let images = &mut self.images;

        let link = ui
            .hovered_target()
            .filter(|t| t.user_data.cursor_pointer)
            .and_then(|t| t.user_data.link.clone());
        let (text, style) = match (link, status) {
            (Some(url), _) => (format!("↗ {url}"), status_link_style(&theme)),
            (None, Some(msg)) => (msg.to_string(), status_bar_style(&theme)),
            (None, None) => (self.keys.status_bar_hint(), status_bar_style(&theme)),
        };

        self.terminal.draw(|frame| {
            Painter::new(layout.page_area, metrics, &theme, fonts, images)
                .paint(commands, frame.buffer_mut());
            frame.render_widget(Paragraph::new(text).style(style), layout.status_area);
        })?;
        Ok(())
    }
}

impl Toolkit for TerminalToolkit {
    fn init(config: &ToolkitConfig) -> Result<Self, ToolkitError> {
        let terminal = match setup_terminal(&config.window_title) {
            Ok(terminal) => terminal,
            Err(e) => {
                let _ = disable_raw_mode();
                let _ = execute!(stderr(), LeaveAlternateScreen, DisableMouseCapture);
                return Err(ToolkitError::Init(e));
            }
        };
        tracing::info!(
            title = %config.window_title,
            width = config.window_width,
            height = config.window_height,
            "terminal toolkit ready"
        );
        Ok(Self {
            terminal,
            theme: config.theme,
            metrics: config.metrics,
            keys: config.keys.clone(),
            fonts: FontRegistry::default(),
            images: ImageStore::default(),
            restored: false,
        })
    }

    fn load_font(&mut self, path: &Path, size: u16) -> FontId {
        if !path.is_file() {
            tracing::warn!(path = %path.display(), "font not found, using the default face");
            return FontId::default();
        }
        let face = FontFace::from_path(path, size);
        let bold = face.bold;
        let id = self.fonts.insert(face);
        tracing::debug!(path = %path.display(), size, bold, id = id.0, "font loaded");
        id
    }

    fn load_image(&mut self, path: &Path) -> ImageHandle {
        let pixels = match image::open(path) {
            Ok(img) => Some(img.to_rgba8()),
            Err(e) => {
                tracing::warn!(path = %path.display(), "image unavailable, drawing a placeholder: {e}");
                None
            }
        };
        self.images.insert(path, pixels)
    }

    fn image_dimensions(&self, image: ImageHandle) -> Dimensions {
        self.images.dimensions(image)
    }

    async fn run<F>(&mut self, mut update: F) -> Result<(), ToolkitError>
    where
        F: FnMut(&mut Ui, f32) -> RenderCommandArray,
    {
        let size = self.terminal.size()?;
        let mut layout = AppLayout::from_area(Rect::new(0, 0, size.width, size.height));
        let mut ui = Ui::new(layout.viewport(self.metrics), self.metrics, self.theme);
        let mut events = spawn_event_reader(TICK_RATE);

        let mut last_frame = Instant::now();
        let mut status: Option<(String, Instant)> = None;
        let mut dirty = true;
        // Lay out twice after start-up and resizes: containers read their
        // size from the previous pass.
        let mut settle = true;

        loop {
            if dirty {
                let now = Instant::now();
                let dt = now.duration_since(last_frame).as_secs_f32();
                last_frame = now;

                let mut commands = update(&mut ui, dt);
                if settle {
                    commands = update(&mut ui, 0.0);
                    settle = false;
                }
                let message = status.as_ref().map(|(m, _)| m.as_str());
                self.draw(&ui, &commands, layout, message)?;
                dirty = false;
            }

            let Some(event) = events.recv().await else {
                tracing::warn!("event reader stopped");
                break;
            };

            let outcome = match event {
                AppEvent::Key(key) => handler::handle_key(&mut ui, &self.keys, key),
                AppEvent::Mouse(mouse) => handler::handle_mouse(&mut ui, mouse, layout.page_area),
                AppEvent::Resize(w, h) => {
                    layout = AppLayout::from_area(Rect::new(0, 0, w, h));
                    ui.set_viewport(layout.viewport(self.metrics));
                    tracing::debug!(w, h, "terminal resized");
                    settle = true;
                    Outcome::Redraw
                }
                AppEvent::Tick => {
                    if status.as_ref().is_some_and(|(_, since)| since.elapsed() >= STATUS_TTL) {
                        status = None;
                        Outcome::Redraw
                    } else {
                        Outcome::Continue
                    }
                }
            };

            match outcome {
                Outcome::Continue => {}
                Outcome::Redraw => dirty = true,
                Outcome::OpenLink(url) => {
                    let message = if browser::open_link(&url) {
                        format!("Opening {url}")
                    } else {
                        format!("Could not open {url}")
                    };
                    status = Some((message, Instant::now()));
                    dirty = true;
                }
                Outcome::Quit => break,
            }
        }

        tracing::debug!(frames = ui.frame_count(), "run loop finished");
        Ok(())
    }

    fn unload_font(&mut self, font: FontId) {
        if font == FontId::default() {
            return;
        }
        if self.fonts.remove(font).is_none() {
            tracing::warn!(id = font.0, "unload of unknown font");
        }
    }

    fn unload_image(&mut self, image: ImageHandle) {
        match self.images.remove(image) {
            Some(path) => tracing::debug!(path = %path.display(), "image unloaded"),
            None => tracing::warn!(handle = image.0, "unload of unknown image"),
        }
    }

    fn cleanup(mut self) {
        if !self.fonts.is_empty() || !self.images.is_empty() {
            tracing::warn!(
                fonts = self.fonts.len(),
                images = self.images.len(),
                "resources still loaded at cleanup"
            );
        }
        if let Err(e) = self.restore() {
            tracing::error!("could not restore the terminal: {e}");
        }
    }
}

impl Drop for TerminalToolkit {
    fn drop(&mut self) {
        let _ = self.restore();
    }
}
