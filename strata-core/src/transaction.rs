// SPDX-License-Identifier: MIT OR Apache-2.0
//! Optimistic updates with explicit commit or rollback.
//!
//! ```
//! use strata_core::transaction::Transaction;
//!
//! let mut volume = 3;
//! let mut tx = Transaction::begin(&mut volume);
//! tx.apply(|v| *v = 7);
//! assert_eq!(*tx.current(), 7);
//! tx.rollback();
//! assert_eq!(volume, 3);
//! ```

/// A snapshot of `T` taken before an optimistic change.
///
/// Changes are applied to the target right away, so readers see them while
/// the confirming call is in flight. The transaction must end in
/// [Transaction::commit] or [Transaction::rollback]; a transaction that is
/// dropped without either rolls back.
pub struct Transaction<'a, T: Clone> {
    target: &'a mut T,
    snapshot: Option<T>,
}

impl<'a, T: Clone> Transaction<'a, T> {
    /// Snapshot `target` and start a transaction on it.
    pub fn begin(target: &'a mut T) -> Self {
        let snapshot = Some(target.clone());
        Self { target, snapshot }
    }

    /// Apply a change to the target.
    pub fn apply(&mut self, op: impl FnOnce(&mut T)) {
        op(&mut *self.target);
    }

    /// The target including applied changes.
    pub fn current(&self) -> &T {
        &*self.target
    }

    /// Keep the applied changes.
    pub fn commit(mut self) {
        self.snapshot = None;
    }

    /// Restore the snapshot taken at [Transaction::begin].
    pub fn rollback(mut self) {
        self.restore();
    }

    fn restore(&mut self) {
        if let Some(snapshot) = self.snapshot.take() {
            *self.target = snapshot;
        }
    }
}

impl<T: Clone> Drop for Transaction<'_, T> {
    fn drop(&mut self) {
        if self.snapshot.is_some() {
            log::debug!("Transaction dropped without commit, rolling back");
            self.restore();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commit_keeps_changes() {
        let mut values = vec![1, 2];
        let mut tx = Transaction::begin(&mut values);
        tx.apply(|v| v.push(3));
        tx.commit();
        assert_eq!(values, vec![1, 2, 3]);
    }

    #[test]
    fn test_rollback_restores_snapshot() {
        let mut values = vec![1, 2];
        let mut tx = Transaction::begin(&mut values);
        tx.apply(|v| v.clear());
        assert!(tx.current().is_empty());
        tx.rollback();
        assert_eq!(values, vec![1, 2]);
    }

    #[test]
    fn test_drop_rolls_back() {
        let mut name = String::from("before");
        {
            let mut tx = Transaction::begin(&mut name);
            tx.apply(|n| n.push_str("-after"));
        }
        assert_eq!(name, "before");
    }
}
