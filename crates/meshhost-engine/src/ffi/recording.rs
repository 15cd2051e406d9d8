use std::cell::RefCell;
use std::rc::Rc;

use crate::handle::{ModuleHandle, NativeWindowHandle, NodeHandle, RendererHandle};

use super::RendererLibrary;

/// One call made across the renderer boundary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LibraryCall {
    Create {
        window: NativeWindowHandle,
        module: ModuleHandle,
    },
    Destroy(RendererHandle),
    Draw(RendererHandle),
    SetHorizontalAngle(RendererHandle, f32),
    PrimaryNode(RendererHandle),
    SetNodeRotation {
        node: NodeHandle,
        x: f32,
        y: f32,
        z: f32,
    },
}

#[derive(Debug)]
struct Recording {
    calls: Vec<LibraryCall>,
    retain: bool,
    total: u64,
    renderer: RendererHandle,
    node: NodeHandle,
}

/// In-process stand-in for the renderer library.
///
/// Records every call and hands out fixed handles (`0x1` for the renderer,
/// `0x2` for the node by default). Clones share the same log, so a test can
/// keep one clone while the driver owns another.
///
/// [`RecordingLibrary::dry_run`] builds the non-retaining variant used when
/// the native library is not linked: calls are logged at trace and counted,
/// but the log stays empty.
#[derive(Debug, Clone)]
pub struct RecordingLibrary {
    inner: Rc<RefCell<Recording>>,
}

impl RecordingLibrary {
    pub fn new() -> Self {
        Self::with_handles(RendererHandle::from_raw(0x1), NodeHandle::from_raw(0x2))
    }

    /// Returns `renderer` from create and `node` from the node lookup.
    /// Pass an invalid handle to simulate the library returning null.
    pub fn with_handles(renderer: RendererHandle, node: NodeHandle) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Recording {
                calls: Vec::new(),
                retain: true,
                total: 0,
                renderer,
                node,
            })),
        }
    }

    /// Default handles, no call log. Memory use stays flat however long the
    /// host runs.
    pub fn dry_run() -> Self {
        let lib = Self::new();
        lib.inner.borrow_mut().retain = false;
        lib
    }

    /// A library whose create entry point returns null.
    pub fn failing_create() -> Self {
        Self::with_handles(RendererHandle::INVALID, NodeHandle::from_raw(0x2))
    }

    /// A library that creates a renderer but exposes no node.
    pub fn failing_node() -> Self {
        Self::with_handles(RendererHandle::from_raw(0x1), NodeHandle::INVALID)
    }

    pub fn calls(&self) -> Vec<LibraryCall> {
        self.inner.borrow().calls.clone()
    }

    /// Calls made so far, including ones a dry run did not keep.
    pub fn total_calls(&self) -> u64 {
        self.inner.borrow().total
    }

    pub fn clear(&self) {
        self.inner.borrow_mut().calls.clear();
    }

    pub fn count(&self, pred: impl Fn(&LibraryCall) -> bool) -> usize {
        self.inner.borrow().calls.iter().filter(|c| pred(c)).count()
    }

    fn record(&self, call: LibraryCall) {
        log::trace!("renderer library: {call:?}");
        let mut rec = self.inner.borrow_mut();
        rec.total += 1;
        if rec.retain {
            rec.calls.push(call);
        }
    }
}

impl Default for RecordingLibrary {
    fn default() -> Self {
        Self::new()
    }
}

impl RendererLibrary for RecordingLibrary {
    fn create_renderer(&self, window: NativeWindowHandle, module: ModuleHandle) -> RendererHandle {
        self.record(LibraryCall::Create { window, module });
        self.inner.borrow().renderer
    }

    fn destroy_renderer(&self, renderer: RendererHandle) {
        self.record(LibraryCall::Destroy(renderer));
    }

    fn draw(&self, renderer: RendererHandle) {
        self.record(LibraryCall::Draw(renderer));
    }

    fn set_horizontal_angle(&self, renderer: RendererHandle, angle: f32) {
        self.record(LibraryCall::SetHorizontalAngle(renderer, angle));
    }

    fn primary_node(&self, renderer: RendererHandle) -> NodeHandle {
        self.record(LibraryCall::PrimaryNode(renderer));
        self.inner.borrow().node
    }

    fn set_node_rotation(&self, node: NodeHandle, x: f32, y: f32, z: f32) {
        self.record(LibraryCall::SetNodeRotation { node, x, y, z });
    }
}
