//! meshhost engine crate.
//!
//! Embeds an external native mesh renderer in a child window and drives it
//! once per presented frame.
//!
//! - [`surface::HostedSurface`] owns the child window and the frame subscription
//! - [`driver::RenderDriver`] owns the renderer handle and the animation timer
//! - [`ffi::RendererLibrary`] is the six-function boundary to the renderer
//! - [`window::Runtime`] is a winit host that fires frame notifications

pub mod core;
pub mod driver;
pub mod error;
pub mod ffi;
pub mod frame;
pub mod handle;
pub mod surface;
pub mod time;
pub mod window;

pub mod logging;

pub use error::SurfaceError;
