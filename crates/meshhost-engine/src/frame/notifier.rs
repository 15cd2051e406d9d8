use std::cell::RefCell;
use std::rc::Rc;

use super::{FrameCallback, FrameSource, Subscription};

type SharedCallback = Rc<RefCell<FrameCallback>>;

#[derive(Default)]
struct Entries {
    next_id: u64,
    callbacks: Vec<(Subscription, SharedCallback)>,
}

/// In-process [`FrameSource`] fired by the runtime on every redraw.
///
/// Clones share the same subscriber list, so a callback may hold a clone and
/// unsubscribe itself (or anyone else) while being notified.
#[derive(Clone, Default)]
pub struct FrameNotifier {
    entries: Rc<RefCell<Entries>>,
}

impl FrameNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscriber_count(&self) -> usize {
        self.entries.borrow().callbacks.len()
    }

    pub fn is_subscribed(&self, subscription: Subscription) -> bool {
        self.entries
            .borrow()
            .callbacks
            .iter()
            .any(|(s, _)| *s == subscription)
    }

    /// Invokes every subscribed callback once, in subscription order.
    ///
    /// Callbacks removed by an earlier callback in the same pass are skipped.
    /// A callback already running (nested `notify`) is not re-entered.
    pub fn notify(&self) {
        let snapshot: Vec<(Subscription, SharedCallback)> = self.entries.borrow().callbacks.clone();

        for (subscription, callback) in snapshot {
            if !self.is_subscribed(subscription) {
                continue;
            }
            match callback.try_borrow_mut() {
                Ok(mut f) => (*f)(),
                Err(_) => log::trace!("skipping re-entrant frame callback {subscription:?}"),
            }
        }
    }
}

impl FrameSource for FrameNotifier {
    fn subscribe(&mut self, callback: FrameCallback) -> Subscription {
        let mut entries = self.entries.borrow_mut();
        let subscription = Subscription(entries.next_id);
        entries.next_id += 1;
        entries
            .callbacks
            .push((subscription, Rc::new(RefCell::new(callback))));
        subscription
    }

    fn unsubscribe(&mut self, subscription: Subscription) -> bool {
        let mut entries = self.entries.borrow_mut();
        let before = entries.callbacks.len();
        entries.callbacks.retain(|(s, _)| *s != subscription);
        entries.callbacks.len() != before
    }
}
