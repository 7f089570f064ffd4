// SPDX-License-Identifier: MIT OR Apache-2.0
use std::cell::Cell;
use std::future::Future;
use std::rc::Rc;
use std::time::Duration;

/// Quiet period used by live-typing entry points unless configured otherwise.
pub const DEFAULT_QUIET_PERIOD: Duration = Duration::from_millis(300);

/// Coalesces bursts of calls into a single invocation after a quiet period.
///
/// Every call to [Debouncer::run] supersedes the calls made before it. Only the
/// most recent call whose quiet period elapses without a newer call runs its
/// work; superseded calls resolve to `None` without running anything.
///
/// Nothing is spawned: the caller awaits the returned future on its own event
/// loop, and dropping it simply abandons the call.
#[derive(Debug, Clone)]
pub struct Debouncer {
    quiet: Duration,
    generation: Rc<Cell<u64>>,
}

impl Debouncer {
    /// Create a debouncer with the given quiet period.
    pub fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            generation: Rc::new(Cell::new(0)),
        }
    }

    /// The configured quiet period.
    pub fn quiet_period(&self) -> Duration {
        self.quiet
    }

    /// Schedule `work` to run after the quiet period, superseding pending calls.
    ///
    /// The call is registered immediately, not on first poll.
    pub fn run<F, Fut, T>(&self, work: F) -> impl Future<Output = Option<T>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = T>,
    {
        let ticket = self.generation.get().wrapping_add(1);
        self.generation.set(ticket);

        let generation = self.generation.clone();
        let quiet = self.quiet;
        async move {
            tokio::time::sleep(quiet).await;
            if generation.get() != ticket {
                log::debug!("Debounced call {} superseded", ticket);
                return None;
            }
            Some(work().await)
        }
    }

    /// Supersede every pending call without scheduling a new one.
    pub fn cancel(&self) {
        self.generation.set(self.generation.get().wrapping_add(1));
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_QUIET_PERIOD)
    }
}
