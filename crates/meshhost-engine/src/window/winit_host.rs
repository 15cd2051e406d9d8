use std::collections::HashMap;

use raw_window_handle::HasWindowHandle;
use winit::dpi::{PhysicalPosition, PhysicalSize};
use winit::event_loop::ActiveEventLoop;
use winit::window::Window;

use crate::handle::{ModuleHandle, NativeWindowHandle};
use crate::surface::{SurfaceConfig, WindowHost, WindowStyle};

/// Every window the runtime owns, keyed by native handle.
pub(crate) type WindowTable = HashMap<NativeWindowHandle, Window>;

/// Native window and module handles of a winit window.
pub(crate) fn native_handles(window: &Window) -> Option<(NativeWindowHandle, ModuleHandle)> {
    let raw = window.window_handle().ok()?.as_raw();
    let handle = NativeWindowHandle::from_raw_window_handle(raw)?;
    Some((handle, ModuleHandle::from_raw_window_handle(raw)))
}

/// [`WindowHost`] backed by winit, valid for one event-loop callback.
pub struct WinitWindowHost<'a> {
    event_loop: &'a ActiveEventLoop,
    windows: &'a mut WindowTable,
}

impl<'a> WinitWindowHost<'a> {
    pub(crate) fn new(event_loop: &'a ActiveEventLoop, windows: &'a mut WindowTable) -> Self {
        Self { event_loop, windows }
    }
}

impl WindowHost for WinitWindowHost<'_> {
    fn create_child_window(
        &mut self,
        parent: NativeWindowHandle,
        config: &SurfaceConfig,
    ) -> NativeWindowHandle {
        let Some(parent_window) = self.windows.get(&parent) else {
            log::error!("unknown parent window {parent:?}");
            return NativeWindowHandle::INVALID;
        };
        let parent_raw = match parent_window.window_handle() {
            Ok(h) => h.as_raw(),
            Err(e) => {
                log::error!("parent window {parent:?} has no raw handle: {e}");
                return NativeWindowHandle::INVALID;
            }
        };

        let style = config.style;
        let mut attrs = Window::default_attributes()
            .with_title("")
            .with_inner_size(PhysicalSize::new(config.width, config.height))
            .with_position(PhysicalPosition::new(config.x, config.y))
            .with_visible(style.contains(WindowStyle::VISIBLE))
            .with_decorations(style.contains(WindowStyle::BORDER))
            .with_resizable(false);

        if style.contains(WindowStyle::CHILD) {
            // SAFETY: the parent lives in the same table and is only dropped
            // after every child on shutdown.
            attrs = unsafe { attrs.with_parent_window(Some(parent_raw)) };
        }
        if style.contains(WindowStyle::VSCROLL) {
            log::debug!("VSCROLL has no winit equivalent; ignored");
        }

        let window = match self.event_loop.create_window(attrs) {
            Ok(w) => w,
            Err(e) => {
                log::error!("failed to create child window: {e}");
                return NativeWindowHandle::INVALID;
            }
        };

        let Some((handle, _)) = native_handles(&window) else {
            log::error!("child window has no native handle on this platform");
            return NativeWindowHandle::INVALID;
        };
        self.windows.insert(handle, window);
        handle
    }

    fn destroy_window(&mut self, window: NativeWindowHandle) {
        if self.windows.remove(&window).is_none() {
            log::warn!("destroy of unknown window {window:?}");
        }
    }

    fn module_handle(&self, window: NativeWindowHandle) -> ModuleHandle {
        self.windows
            .get(&window)
            .and_then(native_handles)
            .map(|(_, module)| module)
            .unwrap_or(ModuleHandle::INVALID)
    }
}
