use crate::handle::{ModuleHandle, NativeWindowHandle};

use super::SurfaceConfig;

/// Host windowing capability used to create the surface's child window.
pub trait WindowHost {
    /// Creates a child of `parent` described by `config` (style, size and
    /// position). Returns [`NativeWindowHandle::INVALID`] on failure, the way
    /// the native window APIs return null.
    fn create_child_window(
        &mut self,
        parent: NativeWindowHandle,
        config: &SurfaceConfig,
    ) -> NativeWindowHandle;

    /// Reclaims a window created by [`create_child_window`](Self::create_child_window).
    fn destroy_window(&mut self, window: NativeWindowHandle);

    /// Module/instance handle the renderer should be created with.
    fn module_handle(&self, window: NativeWindowHandle) -> ModuleHandle;
}
