//! Per-frame notification.
//!
//! A [`FrameSource`] invokes subscribed callbacks once per presented frame.
//! Subscribing returns a [`Subscription`] token; unsubscribing with it is the
//! only way to stop the callbacks.

mod notifier;

pub use notifier::FrameNotifier;

/// Token identifying one subscribed callback.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Subscription(pub(crate) u64);

/// Callback invoked once per presented frame.
pub type FrameCallback = Box<dyn FnMut()>;

/// Host capability: "call me once per presented frame".
pub trait FrameSource {
    fn subscribe(&mut self, callback: FrameCallback) -> Subscription;

    /// Removes the callback. Returns `false` if the token was not subscribed.
    fn unsubscribe(&mut self, subscription: Subscription) -> bool;
}
