// SPDX-License-Identifier: MIT OR Apache-2.0
use super::{Listener, Subscription};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

struct Registry<T: 'static> {
    next_id: Cell<u64>,
    entries: RefCell<Vec<(u64, Rc<Listener<T>>)>>,
}

/// An ordered set of listeners notified with a borrowed value.
///
/// Listeners are called in registration order. A listener may add or remove
/// listeners while being notified; the change takes effect on the next
/// notification.
pub struct ListenerSet<T: 'static> {
    registry: Rc<Registry<T>>,
}

impl<T: 'static> ListenerSet<T> {
    /// Create an empty listener set.
    pub fn new() -> Self {
        Self {
            registry: Rc::new(Registry {
                next_id: Cell::new(0),
                entries: RefCell::new(Vec::with_capacity(1)),
            }),
        }
    }

    /// Register a listener. It stays registered while the returned
    /// [Subscription] is alive.
    pub fn add(&self, listener: impl Fn(&T) + 'static) -> Subscription {
        let id = self.registry.next_id.get();
        self.registry.next_id.set(id + 1);
        self.registry
            .entries
            .borrow_mut()
            .push((id, Rc::new(listener)));

        let weak = Rc::downgrade(&self.registry);
        Subscription::new(move || {
            if let Some(registry) = weak.upgrade() {
                registry.entries.borrow_mut().retain(|(entry, _)| *entry != id);
            }
        })
    }

    /// Call every listener with `value`.
    pub fn notify(&self, value: &T) {
        let snapshot: Vec<Rc<Listener<T>>> = self
            .registry
            .entries
            .borrow()
            .iter()
            .map(|(_, listener)| listener.clone())
            .collect();

        for listener in snapshot {
            listener(value);
        }
    }

    /// Number of registered listeners.
    pub fn len(&self) -> usize {
        self.registry.entries.borrow().len()
    }

    /// Whether no listener is registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: 'static> Default for ListenerSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: 'static> Clone for ListenerSet<T> {
    fn clone(&self) -> Self {
        Self {
            registry: self.registry.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notify_in_registration_order() {
        let set = ListenerSet::<i32>::new();
        let seen = Rc::new(RefCell::new(Vec::new()));

        let a = seen.clone();
        set.add(move |v| a.borrow_mut().push(("a", *v))).detach();
        let b = seen.clone();
        set.add(move |v| b.borrow_mut().push(("b", *v))).detach();

        set.notify(&7);
        assert_eq!(*seen.borrow(), vec![("a", 7), ("b", 7)]);
    }

    #[test]
    fn test_drop_subscription_removes_listener() {
        let set = ListenerSet::<i32>::new();
        let count = Rc::new(Cell::new(0));

        let c = count.clone();
        let subscription = set.add(move |_| c.set(c.get() + 1));
        set.notify(&1);
        drop(subscription);
        set.notify(&2);

        assert_eq!(count.get(), 1);
        assert!(set.is_empty());
    }

    #[test]
    fn test_unsubscribe_only_removes_own_listener() {
        let set = ListenerSet::<i32>::new();
        let first = set.add(|_| {});
        let second = set.add(|_| {});
        assert_eq!(set.len(), 2);

        first.unsubscribe();
        assert_eq!(set.len(), 1);
        second.detach();
        assert_eq!(set.len(), 1);
    }
}
