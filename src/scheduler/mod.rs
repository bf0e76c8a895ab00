// SPDX-License-Identifier: MPL-2.0
//! Timer scheduling for notification expiry.
//!
//! The queue never talks to a clock directly. It asks a [`Scheduler`] to run
//! a callback after a delay and keeps the returned [`CancelToken`] so the
//! callback can be withdrawn when the notification leaves the queue early.
//!
//! # Implementations
//!
//! - [`ManualScheduler`] - virtual clock advanced explicitly, for tests
//! - [`TokioScheduler`] - real timers on the current `tokio` `LocalSet`
//!
//! All schedulers are single-threaded: callbacks run on the thread that
//! drives them and may call back into the queue.

mod manual;
mod runtime;

pub use manual::ManualScheduler;
pub use runtime::TokioScheduler;

use std::rc::Rc;
use std::time::Duration;

/// Callback run once when a scheduled delay elapses.
pub type TimerCallback = Box<dyn FnOnce() + 'static>;

/// Handle identifying one scheduled callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CancelToken(u64);

impl CancelToken {
    /// Wraps a raw token value. Schedulers allocate these.
    #[must_use]
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw token value.
    #[must_use]
    pub fn raw(self) -> u64 {
        self.0
    }
}

/// Runs callbacks after a delay and cancels them on request.
pub trait Scheduler {
    /// Schedules `callback` to run once, `delay` from now.
    fn schedule(&self, delay: Duration, callback: TimerCallback) -> CancelToken;

    /// Cancels a scheduled callback.
    ///
    /// After this returns, the callback is guaranteed not to run. Cancelling
    /// a token that already fired or was already cancelled is a no-op.
    fn cancel(&self, token: CancelToken);
}

impl<S: Scheduler + ?Sized> Scheduler for Rc<S> {
    fn schedule(&self, delay: Duration, callback: TimerCallback) -> CancelToken {
        (**self).schedule(delay, callback)
    }

    fn cancel(&self, token: CancelToken) {
        (**self).cancel(token);
    }
}
