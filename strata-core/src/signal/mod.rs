// SPDX-License-Identifier: MIT OR Apache-2.0
//! Observable state for single-threaded UI sessions.
//!
//! Everything here is [Rc]-based: signals are shared by cloning the handle and
//! are not meant to cross threads.
//!
//! [Rc]: std::rc::Rc

mod listeners;
mod state;

pub use listeners::ListenerSet;
pub use state::StateSignal;

/// A listener callback receiving a reference to the current value.
pub type Listener<T> = dyn Fn(&T);

/// A value that can be read and observed.
///
/// `subscribe` delivers the current value to the new listener immediately, so
/// observers never miss the initial state.
pub trait Observable<T> {
    /// Clone the current value.
    fn get_value(&self) -> T;

    /// Register a listener and deliver the current value to it right away.
    fn subscribe_value(&self, listener: Box<dyn Fn(&T)>) -> Subscription;
}

impl<T: Clone + 'static> Observable<T> for StateSignal<T> {
    fn get_value(&self) -> T {
        self.get_cloned()
    }

    fn subscribe_value(&self, listener: Box<dyn Fn(&T)>) -> Subscription {
        self.subscribe(listener)
    }
}

/// Handle returned by `subscribe`/`listen`.
///
/// Dropping the handle (or calling [Subscription::unsubscribe]) removes the
/// listener. Use [Subscription::detach] to keep the listener alive for the
/// lifetime of the signal.
#[must_use = "dropping a Subscription immediately removes its listener"]
pub struct Subscription {
    remove: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub(crate) fn new(remove: impl FnOnce() + 'static) -> Self {
        Self {
            remove: Some(Box::new(remove)),
        }
    }

    /// Remove the listener now.
    pub fn unsubscribe(mut self) {
        if let Some(remove) = self.remove.take() {
            remove();
        }
    }

    /// Keep the listener registered until the signal itself is dropped.
    pub fn detach(mut self) {
        self.remove = None;
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(remove) = self.remove.take() {
            remove();
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.remove.is_some())
            .finish()
    }
}
