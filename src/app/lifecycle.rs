//! Start-up, run loop and teardown.
//!
//! `Uninitialized → Running → Terminated`.  Everything acquired on the way
//! in is released on the way out, whether the loop ended normally or not.

use thiserror::Error;

use crate::config::LandingConfig;
use crate::ui::toolkit::{Toolkit, ToolkitConfig, ToolkitError};

use super::page;
use super::state::AppContext;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Uninitialized,
    Running,
    Terminated,
}

#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error("could not initialise the toolkit")]
    Init(#[source] ToolkitError),
    #[error("run loop failed")]
    Run(#[source] ToolkitError),
}

#[derive(Debug)]
pub struct Lifecycle {
    phase: Phase,
}

impl Default for Lifecycle {
    fn default() -> Self {
        Self::new()
    }
}

impl Lifecycle {
    pub fn new() -> Self {
        Self { phase: Phase::Uninitialized }
    }

    #[cfg(test)]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    fn enter(&mut self, next: Phase) {
        tracing::info!(from = ?self.phase, to = ?next, "lifecycle");
        self.phase = next;
    }

    /// Drive the page with the toolkit produced by `init`.
    pub async fn run_with<T, I>(&mut self, config: &LandingConfig, init: I) -> Result<(), LifecycleError>
    where
        T: Toolkit,
        I: FnOnce(&ToolkitConfig) -> Result<T, ToolkitError>,
    {
        let mut toolkit = match init(&config.toolkit_config()) {
            Ok(toolkit) => toolkit,
            Err(e) => {
                tracing::error!("toolkit initialisation failed: {e}");
                self.enter(Phase::Terminated);
                return Err(LifecycleError::Init(e));
            }
        };

        let mut ctx = AppContext::load(&mut toolkit, config);
        self.enter(Phase::Running);

        let result = toolkit
            .run(|ui, dt| page::render(ui, &mut ctx, dt))
            .await;

        ctx.release(&mut toolkit);
        toolkit.cleanup();
        self.enter(Phase::Terminated);

        result.map_err(|e| {
            tracing::error!("run loop failed: {e}");
            LifecycleError::Run(e)
        })
    }
}

/// Run the landing page on toolkit `T`.
pub async fn run<T: Toolkit>(config: &LandingConfig) -> Result<(), LifecycleError> {
    Lifecycle::new().run_with(config, T::init).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::path::{Path, PathBuf};
    use std::rc::Rc;

    use crate::config::LayoutStrategy;
    use crate::core::element::{Dimensions, FontId, ImageHandle};
    use crate::core::layout::{CellMetrics, Ui};
    use crate::core::render::RenderCommandArray;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        LoadFont(PathBuf, u16),
        LoadImage(PathBuf),
        Frame { commands: usize },
        UnloadFont(FontId),
        UnloadImage(ImageHandle),
        Cleanup,
    }

    type Log = Rc<RefCell<Vec<Call>>>;

    struct RecordingToolkit {
        log: Log,
        next_font: u16,
        next_image: u32,
        frames: usize,
        fail_run: bool,
    }

    impl RecordingToolkit {
        fn factory(log: &Log, fail_run: bool) -> impl FnOnce(&ToolkitConfig) -> Result<Self, ToolkitError> {
            let log = Rc::clone(log);
            move |_: &ToolkitConfig| {
                Ok(Self {
                    log,
                    next_font: 0,
                    next_image: 0,
                    frames: 2,
                    fail_run,
                })
            }
        }
    }

    impl Toolkit for RecordingToolkit {
        fn init(_config: &ToolkitConfig) -> Result<Self, ToolkitError> {
            Err(ToolkitError::Init(std::io::Error::other("use factory")))
        }

        fn load_font(&mut self, path: &Path, size: u16) -> FontId {
            self.log.borrow_mut().push(Call::LoadFont(path.to_path_buf(), size));
            self.next_font += 1;
            FontId(self.next_font - 1)
        }

        fn load_image(&mut self, path: &Path) -> ImageHandle {
            self.log.borrow_mut().push(Call::LoadImage(path.to_path_buf()));
            self.next_image += 1;
            ImageHandle(self.next_image - 1)
        }

        fn image_dimensions(&self, _image: ImageHandle) -> Dimensions {
            Dimensions::new(100.0, 40.0)
        }

        async fn run<F>(&mut self, mut update: F) -> Result<(), ToolkitError>
        where
            F: FnMut(&mut Ui, f32) -> RenderCommandArray,
        {
            let mut ui = Ui::new(Dimensions::new(1440.0, 900.0), CellMetrics::default(), Default::default());
            for _ in 0..self.frames {
                let out = update(&mut ui, 0.016);
                self.log.borrow_mut().push(Call::Frame { commands: out.len() });
            }
            if self.fail_run {
                return Err(ToolkitError::Io(std::io::Error::other("terminal went away")));
            }
            Ok(())
        }

        fn unload_font(&mut self, font: FontId) {
            self.log.borrow_mut().push(Call::UnloadFont(font));
        }

        fn unload_image(&mut self, image: ImageHandle) {
            self.log.borrow_mut().push(Call::UnloadImage(image));
        }

        fn cleanup(self) {
            self.log.borrow_mut().push(Call::Cleanup);
        }
    }

    fn expected_startup() -> Vec<Call> {
        let mut calls = vec![
            Call::LoadFont(PathBuf::from("assets/Roboto-Bold.ttf"), 24),
            Call::LoadFont(PathBuf::from("assets/Roboto-Regular.ttf"), 16),
            Call::LoadImage(PathBuf::from("assets/logo.png")),
        ];
        for name in ["carousel", "quest", "inner_breeze", "traveltint", "lyra", "rocks"] {
            calls.push(Call::LoadImage(PathBuf::from(format!("assets/projects/{name}.png"))));
        }
        calls
    }

    fn expected_teardown() -> Vec<Call> {
        let mut calls = vec![Call::UnloadFont(FontId(0)), Call::UnloadFont(FontId(1))];
        calls.extend((0..7).map(|i| Call::UnloadImage(ImageHandle(i))));
        calls.push(Call::Cleanup);
        calls
    }

    fn split(log: &Log) -> (Vec<Call>, usize, Vec<Call>) {
        let calls = log.borrow().clone();
        let first_frame = calls
            .iter()
            .position(|c| matches!(c, Call::Frame { .. }))
            .unwrap_or(calls.len());
        let last_frame = calls
            .iter()
            .rposition(|c| matches!(c, Call::Frame { .. }))
            .map_or(first_frame, |i| i + 1);
        (
            calls[..first_frame].to_vec(),
            last_frame - first_frame,
            calls[last_frame..].to_vec(),
        )
    }

    #[tokio::test]
    async fn loads_before_first_frame_and_releases_in_order() {
        let log: Log = Rc::default();
        let mut lifecycle = Lifecycle::new();
        let result = lifecycle
            .run_with(&LandingConfig::default(), RecordingToolkit::factory(&log, false))
            .await;
        assert!(result.is_ok());
        assert_eq!(lifecycle.phase(), Phase::Terminated);

        let (startup, frames, teardown) = split(&log);
        assert_eq!(startup, expected_startup());
        assert_eq!(frames, 2);
        assert_eq!(teardown, expected_teardown());
        assert!(log.borrow().iter().any(|c| matches!(c, Call::Frame { commands } if *commands > 0)));
    }

    #[tokio::test]
    async fn run_failure_still_tears_everything_down() {
        let log: Log = Rc::default();
        let mut lifecycle = Lifecycle::new();
        let result = lifecycle
            .run_with(&LandingConfig::default(), RecordingToolkit::factory(&log, true))
            .await;
        assert!(matches!(result, Err(LifecycleError::Run(ToolkitError::Io(_)))));
        assert_eq!(lifecycle.phase(), Phase::Terminated);
        let (_, _, teardown) = split(&log);
        assert_eq!(teardown, expected_teardown());
    }

    #[tokio::test]
    async fn init_failure_loads_nothing() {
        let log: Log = Rc::default();
        let mut lifecycle = Lifecycle::new();
        let result = lifecycle
            .run_with(&LandingConfig::default(), |_: &ToolkitConfig| -> Result<RecordingToolkit, ToolkitError> {
                Err(ToolkitError::Init(std::io::Error::other("no tty")))
            })
            .await;
        assert!(matches!(result, Err(LifecycleError::Init(_))));
        assert_eq!(lifecycle.phase(), Phase::Terminated);
        assert!(log.borrow().is_empty());
    }

    #[tokio::test]
    async fn row_layout_uses_the_same_assets() {
        let log: Log = Rc::default();
        let config = LandingConfig { layout: LayoutStrategy::Row, ..LandingConfig::default() };
        Lifecycle::new()
            .run_with(&config, RecordingToolkit::factory(&log, false))
            .await
            .expect("row layout runs");
        let (startup, frames, teardown) = split(&log);
        assert_eq!(startup, expected_startup());
        assert_eq!(frames, 2);
        assert_eq!(teardown, expected_teardown());
    }

    #[tokio::test]
    async fn assets_dir_prefixes_every_path() {
        let log: Log = Rc::default();
        let config = LandingConfig { assets_dir: PathBuf::from("/opt/naox"), ..LandingConfig::default() };
        Lifecycle::new()
            .run_with(&config, RecordingToolkit::factory(&log, false))
            .await
            .expect("runs");
        let calls = log.borrow();
        assert!(calls.iter().all(|c| match c {
            Call::LoadFont(p, _) | Call::LoadImage(p) => p.starts_with("/opt/naox"),
            _ => true,
        }));
    }
}
