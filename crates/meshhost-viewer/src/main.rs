use anyhow::{Context, Result};
use winit::dpi::LogicalSize;
use winit::event::{ElementState, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::WindowId;

use meshhost_engine::core::{AppControl, HostApp, HostCtx};
use meshhost_engine::logging::{init_logging, LoggingConfig};
use meshhost_engine::surface::{HostedSurface, SurfaceConfig};
use meshhost_engine::time::TimeStep;
use meshhost_engine::window::{Runtime, RuntimeConfig};

#[cfg(feature = "native")]
type Library = meshhost_engine::ffi::NativeLibrary;
#[cfg(not(feature = "native"))]
type Library = meshhost_engine::ffi::RecordingLibrary;

#[cfg(feature = "native")]
fn library() -> Library {
    Library::new()
}

#[cfg(not(feature = "native"))]
fn library() -> Library {
    Library::dry_run()
}

/// Selects the animation time step: `fixed` (default) or `measured`.
const TIME_STEP_ENV: &str = "MESHHOST_TIME_STEP";

fn time_step_from_env() -> TimeStep {
    match std::env::var(TIME_STEP_ENV).as_deref() {
        Ok("measured") => TimeStep::measured(),
        Ok("fixed") | Err(_) => TimeStep::default(),
        Ok(other) => {
            log::warn!("unknown {TIME_STEP_ENV}={other:?}; using fixed step");
            TimeStep::default()
        }
    }
}

/// Camera angle range understood by the renderer (percent of a half turn).
const ANGLE_MIN: f32 = 0.0;
const ANGLE_MAX: f32 = 100.0;
const ANGLE_STEP: f32 = 5.0;

struct Viewer {
    library: Option<Library>,
    config: SurfaceConfig,
    surface: Option<HostedSurface<Library>>,
    angle: f32,
}

impl Viewer {
    fn new(library: Library, config: SurfaceConfig) -> Self {
        Self {
            library: Some(library),
            config,
            surface: None,
            angle: 0.0,
        }
    }

    fn nudge_angle(&mut self, delta: f32) {
        let Some(surface) = &self.surface else {
            return;
        };
        self.angle = (self.angle + delta).clamp(ANGLE_MIN, ANGLE_MAX);
        if let Err(e) = surface.set_horizontal_angle(self.angle) {
            log::warn!("{e}");
        }
        log::info!("horizontal angle {}", self.angle);
    }
}

impl HostApp for Viewer {
    fn on_start(&mut self, ctx: &mut HostCtx<'_>) -> Result<()> {
        let library = self.library.take().context("viewer surface already started")?;
        let surface =
            HostedSurface::initialize(ctx.parent, &self.config, library, ctx.windows, ctx.frames)
                .context("failed to host mesh surface")?;
        surface.set_horizontal_angle(self.angle)?;
        self.surface = Some(surface);
        Ok(())
    }

    fn on_window_event(
        &mut self,
        _ctx: &mut HostCtx<'_>,
        _window_id: WindowId,
        event: &WindowEvent,
    ) -> AppControl {
        let WindowEvent::KeyboardInput { event, .. } = event else {
            return AppControl::Continue;
        };
        if event.state != ElementState::Pressed {
            return AppControl::Continue;
        }

        match event.physical_key {
            PhysicalKey::Code(KeyCode::ArrowLeft) => self.nudge_angle(-ANGLE_STEP),
            PhysicalKey::Code(KeyCode::ArrowRight) => self.nudge_angle(ANGLE_STEP),
            PhysicalKey::Code(KeyCode::Escape) => return AppControl::Exit,
            _ => {}
        }
        AppControl::Continue
    }

    fn on_exit(&mut self, ctx: &mut HostCtx<'_>) {
        if let Some(surface) = self.surface.as_mut() {
            surface.teardown(ctx.windows, ctx.frames);
        }
    }
}

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    #[cfg(not(feature = "native"))]
    log::info!("built without `native`; renderer calls are logged, not executed");

    let surface = SurfaceConfig::default().with_time_step(time_step_from_env());
    log::debug!("animation time step {:?}", surface.time_step);
    let runtime = RuntimeConfig {
        title: "meshhost viewer".to_string(),
        initial_size: LogicalSize::new(f64::from(surface.width), f64::from(surface.height)),
        ..RuntimeConfig::default()
    };

    Runtime::run(runtime, Viewer::new(library(), surface))
}
