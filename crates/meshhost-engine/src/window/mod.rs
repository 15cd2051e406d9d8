//! Window + runtime loop.
//!
//! Owns the `winit` EventLoop, the parent window and every child window
//! created for hosted surfaces.

mod runtime;
mod winit_host;

pub use runtime::{Runtime, RuntimeConfig};
pub use winit_host::WinitWindowHost;
