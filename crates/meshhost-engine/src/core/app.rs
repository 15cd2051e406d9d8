use anyhow::Result;
use winit::event::WindowEvent;
use winit::window::WindowId;

use super::ctx::HostCtx;

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application contract driven by [`Runtime`](crate::window::Runtime).
pub trait HostApp {
    /// Called once, after the parent window exists. Surfaces are built here.
    ///
    /// An error ends the event loop.
    fn on_start(&mut self, ctx: &mut HostCtx<'_>) -> Result<()>;

    /// Called for every window event, after the runtime's own handling.
    fn on_window_event(
        &mut self,
        ctx: &mut HostCtx<'_>,
        window_id: WindowId,
        event: &WindowEvent,
    ) -> AppControl {
        let _ = (ctx, window_id, event);
        AppControl::Continue
    }

    /// Called once before the event loop exits. Surfaces tear down here.
    fn on_exit(&mut self, ctx: &mut HostCtx<'_>);
}
