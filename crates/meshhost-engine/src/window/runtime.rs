use std::time::{Duration, Instant};

use anyhow::{Context, Result};

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::core::{AppControl, HostApp, HostCtx};
use crate::frame::FrameNotifier;
use crate::handle::NativeWindowHandle;
use crate::time::{FramePacer, DEFAULT_FRAME_INTERVAL};

use super::winit_host::{native_handles, WindowTable, WinitWindowHost};

/// Parent window configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,

    /// Minimum spacing between frame notifications.
    pub frame_interval: Duration,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "meshhost".to_string(),
            initial_size: LogicalSize::new(1024.0, 1024.0),
            frame_interval: DEFAULT_FRAME_INTERVAL,
        }
    }
}

/// Entry point for the host runtime.
///
/// Owns the winit event loop and the parent window, fires the frame notifier
/// on every parent redraw and requests one redraw per frame interval.
pub struct Runtime;

impl Runtime {
    pub fn run<A>(config: RuntimeConfig, app: A) -> Result<()>
    where
        A: HostApp + 'static,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = HostState::new(config, app);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        state.failure.take().map_or(Ok(()), Err)
    }
}

struct HostState<A>
where
    A: HostApp + 'static,
{
    config: RuntimeConfig,
    app: A,

    windows: WindowTable,
    frames: FrameNotifier,
    pacer: FramePacer,
    parent: Option<(WindowId, NativeWindowHandle)>,

    started: bool,
    stopped: bool,
    failure: Option<anyhow::Error>,
}

impl<A> HostState<A>
where
    A: HostApp + 'static,
{
    fn new(config: RuntimeConfig, app: A) -> Self {
        let pacer = FramePacer::new(config.frame_interval);
        Self {
            config,
            app,
            windows: WindowTable::new(),
            frames: FrameNotifier::new(),
            pacer,
            parent: None,
            started: false,
            stopped: false,
            failure: None,
        }
    }

    fn with_ctx<R>(
        &mut self,
        event_loop: &ActiveEventLoop,
        f: impl FnOnce(&mut A, &mut HostCtx<'_>) -> R,
    ) -> Option<R> {
        let (_, parent) = self.parent?;
        let mut host = WinitWindowHost::new(event_loop, &mut self.windows);
        let mut ctx = HostCtx {
            parent,
            windows: &mut host,
            frames: &mut self.frames,
        };
        Some(f(&mut self.app, &mut ctx))
    }

    fn parent_window(&self) -> Option<&Window> {
        let (_, handle) = self.parent?;
        self.windows.get(&handle)
    }

    fn create_parent(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size);

        let window = event_loop
            .create_window(attrs)
            .context("failed to create parent window")?;
        let (handle, _) = native_handles(&window)
            .context("parent window has no native handle on this platform")?;

        log::debug!("parent window {handle:?} created");
        self.parent = Some((window.id(), handle));
        window.request_redraw();
        self.windows.insert(handle, window);
        Ok(())
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        log::error!("{err:#}");
        self.failure = Some(err);
        self.shutdown(event_loop);
    }

    /// Runs `on_exit`, drops child windows before the parent, leaves the loop.
    fn shutdown(&mut self, event_loop: &ActiveEventLoop) {
        if self.stopped {
            return;
        }
        self.stopped = true;

        if self.started {
            self.with_ctx(event_loop, |app, ctx| app.on_exit(ctx));
        }

        if let Some((_, parent)) = self.parent {
            self.windows.retain(|handle, _| *handle == parent);
        }
        self.windows.clear();
        event_loop.exit();
    }
}

impl<A> ApplicationHandler for HostState<A>
where
    A: HostApp + 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.started || self.stopped {
            return;
        }

        if let Err(e) = self.create_parent(event_loop) {
            self.fail(event_loop, e);
            return;
        }

        self.started = true;
        let result = self
            .with_ctx(event_loop, |app, ctx| app.on_start(ctx))
            .unwrap_or(Ok(()));
        if let Err(e) = result {
            self.fail(event_loop, e.context("host app failed to start"));
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.stopped {
            return;
        }

        // Every parent redraw is one frame notification; sleep between them.
        if self.pacer.ready_for_frame(Instant::now()) {
            if let Some(parent) = self.parent_window() {
                parent.request_redraw();
            }
        }
        match self.pacer.next_deadline() {
            Some(deadline) => event_loop.set_control_flow(ControlFlow::WaitUntil(deadline)),
            None => event_loop.set_control_flow(ControlFlow::Wait),
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        if self.stopped {
            return;
        }

        let is_parent = self.parent.is_some_and(|(id, _)| id == window_id);
        match &event {
            WindowEvent::CloseRequested if is_parent => {
                self.shutdown(event_loop);
                return;
            }
            WindowEvent::RedrawRequested if is_parent => self.frames.notify(),
            _ => {}
        }

        let control = self.with_ctx(event_loop, |app, ctx| {
            app.on_window_event(ctx, window_id, &event)
        });
        if control == Some(AppControl::Exit) {
            self.shutdown(event_loop);
        }
    }

    fn exiting(&mut self, event_loop: &ActiveEventLoop) {
        self.shutdown(event_loop);
    }
}
