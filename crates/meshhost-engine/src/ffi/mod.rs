//! Foreign renderer boundary.
//!
//! The external mesh library is reached only through six exported functions.
//! [`RendererLibrary`] mirrors that surface one method per export so the driver
//! can run against the real DLL ([`NativeLibrary`], `native` feature) or an
//! in-process double ([`RecordingLibrary`]).

#[cfg(feature = "native")]
mod native;
mod recording;

#[cfg(feature = "native")]
pub use native::NativeLibrary;
pub use recording::{LibraryCall, RecordingLibrary};

use crate::handle::{ModuleHandle, NativeWindowHandle, NodeHandle, RendererHandle};

/// The six entry points exported by the renderer library.
///
/// Implementations may assume every `RendererHandle`/`NodeHandle` they receive
/// was produced by the same implementation and has not been destroyed; the
/// render driver upholds this. None of the calls report failure except by
/// returning a null handle from the two constructors.
pub trait RendererLibrary {
    /// `create_vulkan_mesh(hwnd, hinstance)`.
    fn create_renderer(&self, window: NativeWindowHandle, module: ModuleHandle) -> RendererHandle;

    /// `destroy_vulkan_mesh(mesh)`. Not idempotent on the library side.
    fn destroy_renderer(&self, renderer: RendererHandle);

    /// `draw_vulkan_mesh(mesh)`.
    fn draw(&self, renderer: RendererHandle);

    /// `set_horizontal_angle(mesh, angle)`.
    fn set_horizontal_angle(&self, renderer: RendererHandle, angle: f32);

    /// `get_xue(mesh)`: the library's single animated node.
    fn primary_node(&self, renderer: RendererHandle) -> NodeHandle;

    /// `set_rotation_on_node(node, x, y, z)`.
    fn set_node_rotation(&self, node: NodeHandle, x: f32, y: f32, z: f32);
}
