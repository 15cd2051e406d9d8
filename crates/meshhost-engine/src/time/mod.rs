//! Time subsystem.
//!
//! One `FrameClock` per render driver; `tick()` once per presented frame.
//! Fixed stepping is the default. `TimeStep::Measured` ties animation speed to
//! wall-clock time instead of the host's frame rate.
//!
//! `FramePacer` spaces the runtime's redraws so a fixed step maps to a steady
//! frame rate.

mod frame_clock;
mod frame_pacer;

pub use frame_clock::{FrameClock, FrameTime, TimeStep, DEFAULT_STEP};
pub use frame_pacer::{FramePacer, DEFAULT_FRAME_INTERVAL};
