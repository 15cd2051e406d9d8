use std::rc::Rc;

use crate::driver::RenderDriver;
use crate::error::SurfaceError;
use crate::ffi::RendererLibrary;
use crate::frame::{FrameSource, Subscription};
use crate::handle::{ModuleHandle, NativeWindowHandle};

use super::{SurfaceConfig, WindowHost};

/// A renderer embedded in a child window of `parent`, ticked once per frame.
///
/// Construction is all-or-nothing: if any step of [`initialize`](Self::initialize)
/// fails, everything created so far is released and nothing stays subscribed.
pub struct HostedSurface<L: RendererLibrary + 'static> {
    parent: NativeWindowHandle,
    window: NativeWindowHandle,
    driver: Rc<RenderDriver<L>>,
    subscription: Option<Subscription>,
    torn_down: bool,
}

impl<L: RendererLibrary + 'static> HostedSurface<L> {
    /// Creates the child window, binds the renderer, resolves its node and
    /// subscribes the per-frame tick.
    pub fn initialize(
        parent: NativeWindowHandle,
        config: &SurfaceConfig,
        library: L,
        windows: &mut dyn WindowHost,
        frames: &mut dyn FrameSource,
    ) -> Result<Self, SurfaceError> {
        if !parent.is_valid() {
            return Err(SurfaceError::WindowCreation { parent });
        }

        let window = windows.create_child_window(parent, config);
        if !window.is_valid() {
            return Err(SurfaceError::WindowCreation { parent });
        }
        log::debug!(
            "child window {window:?} created under {parent:?} ({}x{}, {:?})",
            config.width,
            config.height,
            config.style
        );

        let driver = Rc::new(RenderDriver::new(library, config.time_step));
        let module = windows.module_handle(window);
        if let Err(e) = bind_driver(&driver, window, module) {
            windows.destroy_window(window);
            return Err(e);
        }

        let tick = Rc::clone(&driver);
        let subscription = frames.subscribe(Box::new(move || {
            if let Err(e) = tick.on_tick() {
                log::trace!("frame skipped: {e}");
            }
        }));

        log::info!(
            "hosted surface ready: window {window:?}, renderer {:?}",
            driver.renderer()
        );

        Ok(Self {
            parent,
            window,
            driver,
            subscription: Some(subscription),
            torn_down: false,
        })
    }

    /// Unsubscribes the tick, releases the renderer and destroys the window.
    ///
    /// Safe to call more than once; later calls do nothing.
    pub fn teardown(&mut self, windows: &mut dyn WindowHost, frames: &mut dyn FrameSource) {
        if self.torn_down {
            return;
        }
        self.torn_down = true;

        if let Some(subscription) = self.subscription.take() {
            frames.unsubscribe(subscription);
        }
        if let Err(e) = self.driver.release() {
            log::warn!("surface teardown: {e}");
        }
        windows.destroy_window(self.window);
        log::info!("hosted surface {:?} under {:?} torn down", self.window, self.parent);
    }

    pub fn set_horizontal_angle(&self, angle: f32) -> Result<(), SurfaceError> {
        self.driver.set_horizontal_angle(angle)
    }

    pub fn window(&self) -> NativeWindowHandle {
        self.window
    }

    pub fn driver(&self) -> &RenderDriver<L> {
        &self.driver
    }

    pub fn is_live(&self) -> bool {
        !self.torn_down
    }
}

impl<L: RendererLibrary + 'static> Drop for HostedSurface<L> {
    fn drop(&mut self) {
        if !self.torn_down {
            // The frame callback keeps the driver alive; releasing turns it into a no-op.
            log::warn!("hosted surface {:?} dropped without teardown", self.window);
            let _ = self.driver.release();
        }
    }
}

fn bind_driver<L: RendererLibrary>(
    driver: &RenderDriver<L>,
    window: NativeWindowHandle,
    module: ModuleHandle,
) -> Result<(), SurfaceError> {
    driver.bind(window, module)?;
    if let Err(e) = driver.resolve_node() {
        let _ = driver.release();
        return Err(e);
    }
    Ok(())
}
