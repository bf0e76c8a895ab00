// SPDX-License-Identifier: MPL-2.0
//! Real-time scheduler backed by `tokio` timers.

use super::{CancelToken, Scheduler, TimerCallback};
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;
use std::time::Duration;
use tokio::task::AbortHandle;

#[derive(Default)]
struct State {
    next_token: u64,
    tasks: HashMap<u64, AbortHandle>,
}

/// Scheduler that runs each callback in its own local `tokio` task.
///
/// Tasks are spawned with [`tokio::task::spawn_local`], so callbacks stay on
/// the UI thread and may hold `!Send` state. Cancelling aborts the task before
/// returning; an aborted task that is not currently running is never polled
/// again, so its callback cannot fire afterwards.
///
/// Dropping the scheduler aborts every pending task.
///
/// # Panics
///
/// [`Scheduler::schedule`] panics when called outside a
/// [`tokio::task::LocalSet`] context.
#[derive(Default)]
pub struct TokioScheduler {
    state: Rc<RefCell<State>>,
}

impl TokioScheduler {
    /// Creates an empty scheduler.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of timers that have neither fired nor been cancelled.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.state.borrow().tasks.len()
    }
}

impl Scheduler for TokioScheduler {
    fn schedule(&self, delay: Duration, callback: TimerCallback) -> CancelToken {
        let token = {
            let mut state = self.state.borrow_mut();
            let token = state.next_token;
            state.next_token += 1;
            token
        };

        let registry = Rc::downgrade(&self.state);
        let handle = tokio::task::spawn_local(async move {
            tokio::time::sleep(delay).await;

            // Claim the slot; a missing entry means the timer was withdrawn.
            let Some(state) = registry.upgrade() else {
                return;
            };
            let claimed = state.borrow_mut().tasks.remove(&token).is_some();
            drop(state);
            if claimed {
                callback();
            }
        });

        self.state
            .borrow_mut()
            .tasks
            .insert(token, handle.abort_handle());
        CancelToken::from_raw(token)
    }

    fn cancel(&self, token: CancelToken) {
        let handle = self.state.borrow_mut().tasks.remove(&token.raw());
        if let Some(handle) = handle {
            handle.abort();
        }
    }
}

impl Drop for TokioScheduler {
    fn drop(&mut self) {
        for (_, handle) in self.state.borrow_mut().tasks.drain() {
            handle.abort();
        }
    }
}

impl fmt::Debug for TokioScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokioScheduler")
            .field("pending", &self.pending())
            .finish()
    }
}
