//! Debounced scheduling for flush actions
//!
//! Delays an action until a quiet period of fixed duration has elapsed since
//! the last trigger; superseded timers never fire.

use std::sync::Mutex;
use std::time::Duration;

use tokio::runtime::{Handle, TryCurrentError};
use tokio::task::JoinHandle;

/// Debounces a zero-argument action behind a fixed delay
///
/// Each [`call`] aborts any previously scheduled timer that has not fired
/// yet and schedules a fresh one, so at most one timer is outstanding at any
/// instant and only the most recent one ever runs its action. A timer that
/// is already past its sleep runs to completion.
///
/// [`call`]: Debouncer::call
#[derive(Debug)]
pub(crate) struct Debouncer {
    delay: Duration,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl Debouncer {
    /// Create a debouncer with the given quiet-period delay
    pub(crate) fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: Mutex::new(None),
        }
    }

    /// Schedule `action` to run after the delay, superseding any previously
    /// scheduled action that has not fired yet
    ///
    /// Requires an ambient tokio runtime; without one the action cannot be
    /// scheduled and the error is returned for the caller to report.
    pub(crate) fn call<F>(&self, action: F) -> Result<(), TryCurrentError>
    where
        F: FnOnce() + Send + 'static,
    {
        let handle = Handle::try_current()?;
        let delay = self.delay;

        if let Ok(mut slot) = self.pending.lock() {
            if let Some(previous) = slot.take() {
                previous.abort();
            }
            *slot = Some(handle.spawn(async move {
                tokio::time::sleep(delay).await;
                action();
            }));
        }

        Ok(())
    }
}
