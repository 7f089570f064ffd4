// SPDX-License-Identifier: MIT OR Apache-2.0
use super::{ListenerSet, Subscription};
use std::cell::{Ref, RefCell};
use std::rc::Rc;

/// Simple signal implementation based on [Rc] and [RefCell] to get/set a value and notify listeners when it changes.
///
/// You can also mutate the inner value, but only in a set scope via [StateSignal::mutate].
/// Listeners receive a snapshot of the value taken after the change, so they
/// are free to read or write the signal again.
pub struct StateSignal<T: Clone + 'static> {
    value: Rc<RefCell<T>>,
    listeners: ListenerSet<T>,
}

impl<T: Clone + 'static> StateSignal<T> {
    /// Creates a new signal with the given value.
    pub fn new(value: T) -> Self {
        Self {
            value: Rc::new(RefCell::new(value)),
            listeners: ListenerSet::new(),
        }
    }

    /// Borrow the current value.
    pub fn get(&self) -> Ref<'_, T> {
        self.value.borrow()
    }

    /// Clone the current value out of the signal.
    pub fn get_cloned(&self) -> T {
        self.value.borrow().clone()
    }

    /// Replace the value and notify listeners.
    pub fn set(&self, value: T) {
        self.mutate(move |old| *old = value);
    }

    /// Mutate the inner value in a set scope. This scope is needed in order to notify listeners of changes.
    pub fn mutate(&self, op: impl FnOnce(&mut T)) {
        op(&mut self.value.borrow_mut());
        self.notify();
    }

    /// Notify listeners with the current value.
    pub fn notify(&self) {
        let snapshot = self.get_cloned();
        self.listeners.notify(&snapshot);
    }

    /// Register a listener for future changes only.
    pub fn listen(&self, listener: impl Fn(&T) + 'static) -> Subscription {
        self.listeners.add(listener)
    }

    /// Register a listener and deliver the current value to it immediately.
    ///
    /// The listener is registered before the initial delivery, so a change made
    /// from inside that first call is observed as well.
    pub fn subscribe(&self, listener: impl Fn(&T) + 'static) -> Subscription {
        let listener = Rc::new(listener);
        let registered = listener.clone();
        let subscription = self.listeners.add(move |value| registered(value));
        let current = self.get_cloned();
        listener(&current);
        subscription
    }

    /// Number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl<T: Clone + 'static> Clone for StateSignal<T> {
    fn clone(&self) -> Self {
        Self {
            value: self.value.clone(),
            listeners: self.listeners.clone(),
        }
    }
}

impl<T: Clone + Default + 'static> Default for StateSignal<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: Clone + std::fmt::Debug + 'static> std::fmt::Debug for StateSignal<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateSignal")
            .field("value", &*self.value.borrow())
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_subscribe_delivers_current_value() {
        let signal = StateSignal::new(String::from("initial"));
        let seen = Rc::new(RefCell::new(Vec::new()));

        let s = seen.clone();
        let _sub = signal.subscribe(move |v: &String| s.borrow_mut().push(v.clone()));
        signal.set(String::from("next"));

        assert_eq!(*seen.borrow(), vec!["initial", "next"]);
    }

    #[test]
    fn test_listen_skips_current_value() {
        let signal = StateSignal::new(1);
        let calls = Rc::new(Cell::new(0));

        let c = calls.clone();
        let _sub = signal.listen(move |_| c.set(c.get() + 1));
        assert_eq!(calls.get(), 0);

        signal.mutate(|v| *v += 1);
        assert_eq!(calls.get(), 1);
        assert_eq!(*signal.get(), 2);
    }

    #[test]
    fn test_clones_share_value_and_listeners() {
        let signal = StateSignal::new(0);
        let other = signal.clone();
        let last = Rc::new(Cell::new(-1));

        let l = last.clone();
        let _sub = signal.listen(move |v| l.set(*v));
        other.set(42);

        assert_eq!(*signal.get(), 42);
        assert_eq!(last.get(), 42);
    }

    #[test]
    fn test_listener_may_read_signal() {
        let signal = StateSignal::new(3);
        let reader = signal.clone();
        let observed = Rc::new(Cell::new(0));

        let o = observed.clone();
        let _sub = signal.listen(move |_| o.set(*reader.get()));
        signal.set(9);

        assert_eq!(observed.get(), 9);
    }
}
