//! Typed opaque handles.
//!
//! Every identifier that crosses the foreign boundary gets its own wrapper so a
//! window handle can never be passed where a renderer handle is expected.
//! Each type has exactly one invalid value, [`INVALID`](RendererHandle::INVALID),
//! which is also the null pointer the external library returns on failure.

use std::ffi::c_void;
use std::fmt;

use raw_window_handle::RawWindowHandle;

macro_rules! opaque_handle {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash)]
        pub struct $name(usize);

        impl $name {
            /// The null handle.
            pub const INVALID: Self = Self(0);

            pub const fn from_raw(raw: usize) -> Self {
                Self(raw)
            }

            pub fn from_ptr(ptr: *mut c_void) -> Self {
                Self(ptr as usize)
            }

            pub const fn raw(self) -> usize {
                self.0
            }

            pub fn as_ptr(self) -> *mut c_void {
                self.0 as *mut c_void
            }

            pub const fn is_valid(self) -> bool {
                self.0 != 0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                if self.is_valid() {
                    write!(f, concat!(stringify!($name), "({:#x})"), self.0)
                } else {
                    f.write_str(concat!(stringify!($name), "(INVALID)"))
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{:#x}", self.0)
            }
        }
    };
}

opaque_handle!(
    /// A native window created by the host windowing system.
    NativeWindowHandle
);

opaque_handle!(
    /// Module/instance identifier handed to the renderer at creation
    /// (`HINSTANCE` on Windows, null elsewhere).
    ModuleHandle
);

opaque_handle!(
    /// A renderer instance owned by the external library.
    RendererHandle
);

opaque_handle!(
    /// The primary animated scene node of a renderer.
    ///
    /// Only meaningful while the renderer it came from is alive.
    NodeHandle
);

impl NativeWindowHandle {
    /// Extracts the platform window identifier from a `raw-window-handle`.
    ///
    /// Returns `None` for platforms without a stable integer/pointer id.
    pub fn from_raw_window_handle(raw: RawWindowHandle) -> Option<Self> {
        let id = match raw {
            RawWindowHandle::Win32(h) => h.hwnd.get() as usize,
            RawWindowHandle::Xlib(h) => h.window as usize,
            RawWindowHandle::Xcb(h) => h.window.get() as usize,
            RawWindowHandle::Wayland(h) => h.surface.as_ptr() as usize,
            RawWindowHandle::AppKit(h) => h.ns_view.as_ptr() as usize,
            _ => return None,
        };
        Some(Self(id)).filter(|h| h.is_valid())
    }
}

impl ModuleHandle {
    /// The module handle recorded alongside a window, if the platform has one.
    pub fn from_raw_window_handle(raw: RawWindowHandle) -> Self {
        match raw {
            RawWindowHandle::Win32(h) => h
                .hinstance
                .map(|i| Self(i.get() as usize))
                .unwrap_or(Self::INVALID),
            _ => Self::INVALID,
        }
    }
}
