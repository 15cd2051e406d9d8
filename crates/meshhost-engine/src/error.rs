use std::fmt;

use crate::driver::DriverState;
use crate::handle::{NativeWindowHandle, RendererHandle};

/// Failure while hosting a surface or driving its renderer.
///
/// Creation failures are terminal for the surface being built. `InvalidState`
/// is a contract violation by the caller (e.g. ticking an unbound driver).
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceError {
    /// The host returned a null window when asked for a child of `parent`.
    WindowCreation { parent: NativeWindowHandle },
    /// The external library returned a null renderer for `window`.
    RendererInit { window: NativeWindowHandle },
    /// The renderer exposed no primary node.
    NodeResolution { renderer: RendererHandle },
    /// `operation` is not allowed while the driver is in `state`.
    InvalidState {
        operation: &'static str,
        state: DriverState,
    },
}

impl SurfaceError {
    pub(crate) fn invalid_state(operation: &'static str, state: DriverState) -> Self {
        Self::InvalidState { operation, state }
    }
}

impl fmt::Display for SurfaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WindowCreation { parent } => {
                write!(f, "failed to create child window under parent {parent}")
            }
            Self::RendererInit { window } => {
                write!(f, "renderer library returned a null renderer for window {window}")
            }
            Self::NodeResolution { renderer } => {
                write!(f, "renderer {renderer} exposes no primary node")
            }
            Self::InvalidState { operation, state } => {
                write!(f, "`{operation}` is invalid while the render driver is {state}")
            }
        }
    }
}

impl std::error::Error for SurfaceError {}
