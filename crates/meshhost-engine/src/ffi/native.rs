use std::ffi::c_void;

use crate::handle::{ModuleHandle, NativeWindowHandle, NodeHandle, RendererHandle};

use super::RendererLibrary;

#[link(name = "mesh.dx12")]
unsafe extern "C" {
    fn create_vulkan_mesh(hwnd: *mut c_void, hinstance: *mut c_void) -> *mut c_void;
    fn draw_vulkan_mesh(mesh: *mut c_void);
    fn destroy_vulkan_mesh(mesh: *mut c_void);
    fn set_horizontal_angle(mesh: *mut c_void, angle: f32);
    fn get_xue(mesh: *mut c_void) -> *mut c_void;
    fn set_rotation_on_node(node: *mut c_void, x: f32, y: f32, z: f32);
}

/// The linked `mesh.dx12` library.
///
/// Stateless; every call goes straight through to the exported symbol.
#[derive(Debug, Default, Clone, Copy)]
pub struct NativeLibrary;

impl NativeLibrary {
    pub fn new() -> Self {
        Self
    }
}

// SAFETY (all methods): handles passed back into the library are only ever
// ones it returned and that the render driver has not yet destroyed. The
// window handle is a live child window owned by the surface host.
impl RendererLibrary for NativeLibrary {
    fn create_renderer(&self, window: NativeWindowHandle, module: ModuleHandle) -> RendererHandle {
        RendererHandle::from_ptr(unsafe { create_vulkan_mesh(window.as_ptr(), module.as_ptr()) })
    }

    fn destroy_renderer(&self, renderer: RendererHandle) {
        unsafe { destroy_vulkan_mesh(renderer.as_ptr()) }
    }

    fn draw(&self, renderer: RendererHandle) {
        unsafe { draw_vulkan_mesh(renderer.as_ptr()) }
    }

    fn set_horizontal_angle(&self, renderer: RendererHandle, angle: f32) {
        unsafe { set_horizontal_angle(renderer.as_ptr(), angle) }
    }

    fn primary_node(&self, renderer: RendererHandle) -> NodeHandle {
        NodeHandle::from_ptr(unsafe { get_xue(renderer.as_ptr()) })
    }

    fn set_node_rotation(&self, node: NodeHandle, x: f32, y: f32, z: f32) {
        unsafe { set_rotation_on_node(node.as_ptr(), x, y, z) }
    }
}
