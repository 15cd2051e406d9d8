//! Surface host.
//!
//! Embeds the external renderer in a native child window: creates the window,
//! binds a [`RenderDriver`](crate::driver::RenderDriver) to it and subscribes
//! the driver's tick to the host's per-frame notification.

mod config;
mod host;
mod hosted;

pub use config::{SurfaceConfig, WindowStyle};
pub use host::WindowHost;
pub use hosted::HostedSurface;
