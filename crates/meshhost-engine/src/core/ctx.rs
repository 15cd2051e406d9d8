use crate::frame::FrameSource;
use crate::handle::NativeWindowHandle;
use crate::surface::WindowHost;

/// Host capabilities handed to [`HostApp`](super::HostApp) callbacks.
///
/// Borrowed for the duration of one callback.
pub struct HostCtx<'a> {
    /// The top-level window surfaces are embedded in.
    pub parent: NativeWindowHandle,
    pub windows: &'a mut dyn WindowHost,
    pub frames: &'a mut dyn FrameSource,
}
