//! Render driver.
//!
//! Owns one renderer instance of the external library and drives it once per
//! frame. Lifecycle: `Unbound -> Bound -> Released`; nothing leaves `Released`.
//!
//! Every operation takes `&self` so the driver can be shared between the
//! surface that owns it and the frame callback that ticks it. State lives in
//! `Cell`s, which also makes the driver `!Sync`; the marker field makes it
//! `!Send`. All calls must come from the thread that created the window.

use std::cell::Cell;
use std::fmt;
use std::marker::PhantomData;

use crate::error::SurfaceError;
use crate::ffi::RendererLibrary;
use crate::handle::{ModuleHandle, NativeWindowHandle, NodeHandle, RendererHandle};
use crate::time::{FrameClock, FrameTime, TimeStep};

/// Divisor turning the animation timer into the node's Y rotation.
const ROTATION_DIVISOR: f32 = 360.0;

/// Lifecycle phase of a [`RenderDriver`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DriverState {
    Unbound,
    Bound,
    Released,
}

impl fmt::Display for DriverState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Unbound => "unbound",
            Self::Bound => "bound",
            Self::Released => "released",
        })
    }
}

/// Y-axis rotation the node receives for a timer value.
pub fn rotation_for(elapsed: f32) -> f32 {
    elapsed / ROTATION_DIVISOR
}

pub struct RenderDriver<L: RendererLibrary> {
    library: L,
    state: Cell<DriverState>,
    renderer: Cell<RendererHandle>,
    node: Cell<NodeHandle>,
    clock: Cell<FrameClock>,
    _not_send: PhantomData<*const ()>,
}

impl<L: RendererLibrary> RenderDriver<L> {
    pub fn new(library: L, step: TimeStep) -> Self {
        Self {
            library,
            state: Cell::new(DriverState::Unbound),
            renderer: Cell::new(RendererHandle::INVALID),
            node: Cell::new(NodeHandle::INVALID),
            clock: Cell::new(FrameClock::new(step)),
            _not_send: PhantomData,
        }
    }

    pub fn state(&self) -> DriverState {
        self.state.get()
    }

    pub fn renderer(&self) -> RendererHandle {
        self.renderer.get()
    }

    pub fn node(&self) -> NodeHandle {
        self.node.get()
    }

    /// Current animation timer value.
    pub fn elapsed(&self) -> f32 {
        self.clock.get().elapsed()
    }

    /// Creates the renderer for `window`. Calls the library exactly once.
    pub fn bind(
        &self,
        window: NativeWindowHandle,
        module: ModuleHandle,
    ) -> Result<RendererHandle, SurfaceError> {
        self.expect_state("bind", DriverState::Unbound)?;

        let renderer = self.library.create_renderer(window, module);
        if !renderer.is_valid() {
            return Err(SurfaceError::RendererInit { window });
        }

        self.renderer.set(renderer);
        self.state.set(DriverState::Bound);
        log::debug!("renderer {renderer:?} bound to window {window:?}");
        Ok(renderer)
    }

    /// Looks up the library's primary animated node.
    pub fn resolve_node(&self) -> Result<NodeHandle, SurfaceError> {
        self.expect_state("resolve_node", DriverState::Bound)?;

        let renderer = self.renderer.get();
        let node = self.library.primary_node(renderer);
        if !node.is_valid() {
            return Err(SurfaceError::NodeResolution { renderer });
        }

        self.node.set(node);
        log::debug!("renderer {renderer:?} primary node {node:?}");
        Ok(node)
    }

    /// Advances the timer, rotates the node about Y and draws one frame.
    ///
    /// Outside `Bound` (or before the node is resolved) this makes no external
    /// call. Failures inside the library are not observable here.
    pub fn on_tick(&self) -> Result<FrameTime, SurfaceError> {
        self.expect_state("on_tick", DriverState::Bound)?;

        let node = self.node.get();
        if !node.is_valid() {
            return Err(SurfaceError::invalid_state("on_tick", self.state()));
        }

        let mut clock = self.clock.get();
        let ft = clock.tick();
        self.clock.set(clock);

        let angle = rotation_for(ft.elapsed);
        log::trace!("tick {} rotation {angle}", ft.frame_index);
        self.library.set_node_rotation(node, 0.0, angle, 0.0);

        // The rotation call may have re-entered and released us.
        let renderer = self.renderer.get();
        if renderer.is_valid() {
            self.library.draw(renderer);
        }
        Ok(ft)
    }

    /// Sets the camera angle. Independent of the animation timer.
    pub fn set_horizontal_angle(&self, angle: f32) -> Result<(), SurfaceError> {
        self.expect_state("set_horizontal_angle", DriverState::Bound)?;
        self.library.set_horizontal_angle(self.renderer.get(), angle);
        Ok(())
    }

    /// Destroys the renderer.
    ///
    /// The `Released` state and the null handle are stored before the library
    /// is called, so anything running during or after the destroy call sees a
    /// released driver. Releasing twice is a no-op.
    pub fn release(&self) -> Result<(), SurfaceError> {
        match self.state.get() {
            DriverState::Unbound => Err(SurfaceError::invalid_state("release", DriverState::Unbound)),
            DriverState::Released => Ok(()),
            DriverState::Bound => {
                let renderer = self.renderer.replace(RendererHandle::INVALID);
                self.node.set(NodeHandle::INVALID);
                self.state.set(DriverState::Released);
                self.library.destroy_renderer(renderer);
                log::debug!("renderer {renderer:?} released");
                Ok(())
            }
        }
    }

    fn expect_state(&self, operation: &'static str, expected: DriverState) -> Result<(), SurfaceError> {
        let state = self.state.get();
        if state == expected {
            Ok(())
        } else {
            Err(SurfaceError::invalid_state(operation, state))
        }
    }
}

impl<L: RendererLibrary> Drop for RenderDriver<L> {
    fn drop(&mut self) {
        if self.state.get() == DriverState::Bound {
            log::warn!("render driver dropped while bound; releasing renderer");
            let _ = self.release();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::{Rc, Weak};

    use crate::ffi::{LibraryCall, RecordingLibrary};

    const WINDOW: NativeWindowHandle = NativeWindowHandle::from_raw(0x40);
    const R: RendererHandle = RendererHandle::from_raw(0x1);
    const N: NodeHandle = NodeHandle::from_raw(0x2);

    fn bound() -> (RenderDriver<RecordingLibrary>, RecordingLibrary) {
        let lib = RecordingLibrary::new();
        let driver = RenderDriver::new(lib.clone(), TimeStep::default());
        driver.bind(WINDOW, ModuleHandle::INVALID).unwrap();
        driver.resolve_node().unwrap();
        lib.clear();
        (driver, lib)
    }

    #[test]
    fn bind_then_resolve_reaches_bound() {
        let lib = RecordingLibrary::new();
        let driver = RenderDriver::new(lib.clone(), TimeStep::default());
        assert_eq!(driver.state(), DriverState::Unbound);

        assert_eq!(driver.bind(WINDOW, ModuleHandle::from_raw(0x9)), Ok(R));
        assert_eq!(driver.resolve_node(), Ok(N));
        assert_eq!(driver.state(), DriverState::Bound);
        assert_eq!(
            lib.calls(),
            vec![
                LibraryCall::Create { window: WINDOW, module: ModuleHandle::from_raw(0x9) },
                LibraryCall::PrimaryNode(R),
            ]
        );
    }

    #[test]
    fn null_renderer_is_init_error() {
        let lib = RecordingLibrary::failing_create();
        let driver = RenderDriver::new(lib.clone(), TimeStep::default());

        assert_eq!(
            driver.bind(WINDOW, ModuleHandle::INVALID),
            Err(SurfaceError::RendererInit { window: WINDOW })
        );
        assert_eq!(driver.state(), DriverState::Unbound);
        assert_eq!(lib.calls().len(), 1);
    }

    #[test]
    fn null_node_is_resolution_error() {
        let lib = RecordingLibrary::failing_node();
        let driver = RenderDriver::new(lib, TimeStep::default());
        driver.bind(WINDOW, ModuleHandle::INVALID).unwrap();

        assert_eq!(driver.resolve_node(), Err(SurfaceError::NodeResolution { renderer: R }));
    }

    #[test]
    fn second_bind_is_rejected() {
        let (driver, lib) = bound();
        assert!(matches!(
            driver.bind(WINDOW, ModuleHandle::INVALID),
            Err(SurfaceError::InvalidState { operation: "bind", state: DriverState::Bound })
        ));
        assert!(lib.calls().is_empty());
    }

    #[test]
    fn ticks_rotate_then_draw() {
        let (driver, lib) = bound();
        let n = 5;

        for _ in 0..n {
            driver.on_tick().unwrap();
        }

        assert_eq!(driver.elapsed(), 16.0 * n as f32);
        assert_eq!(lib.count(|c| *c == LibraryCall::Draw(R)), n);

        let calls = lib.calls();
        for (k, pair) in calls.chunks(2).enumerate() {
            let expected = (16.0 * (k + 1) as f32) / 360.0;
            assert_eq!(
                pair,
                [
                    LibraryCall::SetNodeRotation { node: N, x: 0.0, y: expected, z: 0.0 },
                    LibraryCall::Draw(R),
                ]
            );
        }
    }

    #[test]
    fn tick_before_bind_makes_no_calls() {
        let lib = RecordingLibrary::new();
        let driver = RenderDriver::new(lib.clone(), TimeStep::default());

        assert_eq!(
            driver.on_tick(),
            Err(SurfaceError::invalid_state("on_tick", DriverState::Unbound))
        );
        assert_eq!(driver.elapsed(), 0.0);
        assert!(lib.calls().is_empty());
    }

    #[test]
    fn tick_without_node_makes_no_calls() {
        let lib = RecordingLibrary::new();
        let driver = RenderDriver::new(lib.clone(), TimeStep::default());
        driver.bind(WINDOW, ModuleHandle::INVALID).unwrap();
        lib.clear();

        assert!(driver.on_tick().is_err());
        assert!(lib.calls().is_empty());
    }

    #[test]
    fn tick_after_release_makes_no_calls() {
        let (driver, lib) = bound();
        driver.release().unwrap();
        lib.clear();

        assert_eq!(
            driver.on_tick(),
            Err(SurfaceError::invalid_state("on_tick", DriverState::Released))
        );
        assert!(driver.set_horizontal_angle(1.0).is_err());
        assert!(lib.calls().is_empty());
    }

    #[test]
    fn horizontal_angle_is_independent_of_the_timer() {
        let (driver, lib) = bound();

        driver.on_tick().unwrap();
        driver.set_horizontal_angle(42.0).unwrap();
        driver.set_horizontal_angle(7.0).unwrap();
        driver.on_tick().unwrap();

        assert_eq!(driver.elapsed(), 32.0);
        assert_eq!(
            lib.calls(),
            vec![
                LibraryCall::SetNodeRotation { node: N, x: 0.0, y: 16.0 / 360.0, z: 0.0 },
                LibraryCall::Draw(R),
                LibraryCall::SetHorizontalAngle(R, 42.0),
                LibraryCall::SetHorizontalAngle(R, 7.0),
                LibraryCall::SetNodeRotation { node: N, x: 0.0, y: 32.0 / 360.0, z: 0.0 },
                LibraryCall::Draw(R),
            ]
        );
    }

    /// Releases its own driver from inside the rotation call, the way a host
    /// tearing down from a nested frame callback would.
    struct ReleasingLibrary {
        calls: RecordingLibrary,
        driver: Rc<RefCell<Weak<RenderDriver<ReleasingLibrary>>>>,
    }

    impl RendererLibrary for ReleasingLibrary {
        fn create_renderer(&self, window: NativeWindowHandle, module: ModuleHandle) -> RendererHandle {
            self.calls.create_renderer(window, module)
        }

        fn destroy_renderer(&self, renderer: RendererHandle) {
            self.calls.destroy_renderer(renderer);
        }

        fn draw(&self, renderer: RendererHandle) {
            self.calls.draw(renderer);
        }

        fn set_horizontal_angle(&self, renderer: RendererHandle, angle: f32) {
            self.calls.set_horizontal_angle(renderer, angle);
        }

        fn primary_node(&self, renderer: RendererHandle) -> NodeHandle {
            self.calls.primary_node(renderer)
        }

        fn set_node_rotation(&self, node: NodeHandle, x: f32, y: f32, z: f32) {
            self.calls.set_node_rotation(node, x, y, z);
            if let Some(driver) = self.driver.borrow().upgrade() {
                driver.release().unwrap();
            }
        }
    }

    #[test]
    fn release_during_rotation_skips_the_draw() {
        let lib = RecordingLibrary::new();
        let slot = Rc::new(RefCell::new(Weak::new()));
        let driver = Rc::new(RenderDriver::new(
            ReleasingLibrary { calls: lib.clone(), driver: Rc::clone(&slot) },
            TimeStep::default(),
        ));
        *slot.borrow_mut() = Rc::downgrade(&driver);

        driver.bind(WINDOW, ModuleHandle::INVALID).unwrap();
        driver.resolve_node().unwrap();
        lib.clear();

        let ft = driver.on_tick().unwrap();

        assert_eq!(ft.frame_index, 0);
        assert_eq!(driver.state(), DriverState::Released);
        assert!(!driver.renderer().is_valid());
        assert_eq!(lib.count(|c| matches!(c, LibraryCall::Draw(_))), 0);
        assert_eq!(lib.count(|c| *c == LibraryCall::Destroy(R)), 1);
        assert_eq!(
            lib.calls(),
            vec![
                LibraryCall::SetNodeRotation { node: N, x: 0.0, y: 16.0 / 360.0, z: 0.0 },
                LibraryCall::Destroy(R),
            ]
        );

        // The next frame finds the driver released and stays silent.
        assert!(driver.on_tick().is_err());
        assert_eq!(lib.calls().len(), 2);
    }

    #[test]
    fn release_is_idempotent() {
        let (driver, lib) = bound();

        driver.release().unwrap();
        driver.release().unwrap();

        assert_eq!(lib.calls(), vec![LibraryCall::Destroy(R)]);
        assert_eq!(driver.state(), DriverState::Released);
        assert!(!driver.renderer().is_valid());
    }

    #[test]
    fn release_before_bind_is_rejected() {
        let lib = RecordingLibrary::new();
        let driver = RenderDriver::new(lib.clone(), TimeStep::default());

        assert!(driver.release().is_err());
        assert!(lib.calls().is_empty());
    }

    #[test]
    fn drop_releases_a_bound_renderer() {
        let (driver, lib) = bound();
        drop(driver);
        assert_eq!(lib.calls(), vec![LibraryCall::Destroy(R)]);
    }

    #[test]
    fn three_tick_scenario() {
        let lib = RecordingLibrary::new();
        let driver = RenderDriver::new(lib.clone(), TimeStep::default());

        assert_eq!(driver.bind(WINDOW, ModuleHandle::INVALID), Ok(R));
        assert_eq!(driver.resolve_node(), Ok(N));
        for _ in 0..3 {
            driver.on_tick().unwrap();
        }
        driver.release().unwrap();
        let before = lib.calls().len();
        driver.release().unwrap();

        let rotations: Vec<f32> = lib
            .calls()
            .iter()
            .filter_map(|c| match c {
                LibraryCall::SetNodeRotation { node, x, y, z } => {
                    assert_eq!((*node, *x, *z), (N, 0.0, 0.0));
                    Some(*y)
                }
                _ => None,
            })
            .collect();

        assert_eq!(rotations, vec![16.0 / 360.0, 32.0 / 360.0, 48.0 / 360.0]);
        assert_eq!(lib.count(|c| *c == LibraryCall::Draw(R)), 3);
        assert_eq!(lib.count(|c| *c == LibraryCall::Destroy(R)), 1);
        assert_eq!(lib.calls().len(), before);
    }
}
