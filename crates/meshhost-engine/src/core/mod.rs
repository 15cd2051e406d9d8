//! Application contract between the host runtime and user code.

mod app;
mod ctx;

pub use app::{AppControl, HostApp};
pub use ctx::HostCtx;
