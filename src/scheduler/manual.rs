// SPDX-License-Identifier: MPL-2.0
//! Virtual-time scheduler.
//!
//! Time only moves when [`ManualScheduler::advance`] is called, which makes
//! expiry behavior reproducible in tests without waiting on a wall clock.

use super::{CancelToken, Scheduler, TimerCallback};
use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::time::Duration;

#[derive(Default)]
struct State {
    /// Virtual time elapsed since creation.
    now: Duration,
    next_token: u64,
    /// Pending callbacks ordered by (deadline, scheduling order).
    timers: BTreeMap<(Duration, u64), TimerCallback>,
    /// Token to deadline, for cancellation.
    deadlines: HashMap<u64, Duration>,
}

/// Deterministic scheduler driven by explicit time advancement.
///
/// # Example
///
/// ```
/// use std::cell::Cell;
/// use std::rc::Rc;
/// use std::time::Duration;
/// use toast_queue::scheduler::{ManualScheduler, Scheduler};
///
/// let scheduler = ManualScheduler::new();
/// let fired = Rc::new(Cell::new(false));
/// let flag = Rc::clone(&fired);
/// scheduler.schedule(Duration::from_millis(100), Box::new(move || flag.set(true)));
///
/// scheduler.advance(Duration::from_millis(99));
/// assert!(!fired.get());
/// scheduler.advance(Duration::from_millis(1));
/// assert!(fired.get());
/// ```
#[derive(Default)]
pub struct ManualScheduler {
    state: RefCell<State>,
}

impl ManualScheduler {
    /// Creates a scheduler at virtual time zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the virtual time elapsed since creation.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.state.borrow().now
    }

    /// Returns the number of callbacks still waiting to fire.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.state.borrow().timers.len()
    }

    /// Moves virtual time forward by `by`, firing every callback that
    /// becomes due, in deadline order.
    ///
    /// Callbacks scheduled by a firing callback also run if their deadline
    /// falls inside the window. Returns how many callbacks fired.
    pub fn advance(&self, by: Duration) -> usize {
        let target = self.now() + by;
        let mut fired = 0;

        loop {
            // Borrow only to pop; the callback may re-enter the scheduler.
            let next = {
                let mut state = self.state.borrow_mut();
                match state.timers.first_key_value() {
                    Some((&(deadline, token), _)) if deadline <= target => {
                        let callback = state.timers.remove(&(deadline, token));
                        state.deadlines.remove(&token);
                        state.now = deadline;
                        callback
                    }
                    _ => None,
                }
            };

            match next {
                Some(callback) => {
                    callback();
                    fired += 1;
                }
                None => break,
            }
        }

        self.state.borrow_mut().now = target;
        fired
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&self, delay: Duration, callback: TimerCallback) -> CancelToken {
        let mut state = self.state.borrow_mut();
        let token = state.next_token;
        state.next_token += 1;
        let deadline = state.now + delay;
        state.timers.insert((deadline, token), callback);
        state.deadlines.insert(token, deadline);
        CancelToken::from_raw(token)
    }

    fn cancel(&self, token: CancelToken) {
        let mut state = self.state.borrow_mut();
        if let Some(deadline) = state.deadlines.remove(&token.raw()) {
            state.timers.remove(&(deadline, token.raw()));
        }
    }
}

impl fmt::Debug for ManualScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("ManualScheduler")
            .field("now", &state.now)
            .field("pending", &state.timers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    fn recorder() -> (Rc<RefCell<Vec<u32>>>, impl Fn(u32) -> TimerCallback) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        let make = move |value: u32| -> TimerCallback {
            let sink = Rc::clone(&sink);
            Box::new(move || sink.borrow_mut().push(value))
        };
        (log, make)
    }

    #[test]
    fn callback_fires_exactly_at_deadline() {
        let scheduler = ManualScheduler::new();
        let fired = Rc::new(Cell::new(0));
        let counter = Rc::clone(&fired);
        scheduler.schedule(
            Duration::from_millis(1000),
            Box::new(move || counter.set(counter.get() + 1)),
        );

        scheduler.advance(Duration::from_millis(999));
        assert_eq!(fired.get(), 0);

        scheduler.advance(Duration::from_millis(1));
        assert_eq!(fired.get(), 1);

        scheduler.advance(Duration::from_secs(10));
        assert_eq!(fired.get(), 1, "callbacks fire once");
    }

    #[test]
    fn callbacks_fire_in_deadline_then_schedule_order() {
        let scheduler = ManualScheduler::new();
        let (log, make) = recorder();

        scheduler.schedule(Duration::from_millis(30), make(3));
        scheduler.schedule(Duration::from_millis(10), make(1));
        scheduler.schedule(Duration::from_millis(10), make(2));

        assert_eq!(scheduler.advance(Duration::from_millis(30)), 3);
        assert_eq!(*log.borrow(), vec![1, 2, 3]);
    }

    #[test]
    fn cancelled_callback_never_fires() {
        let scheduler = ManualScheduler::new();
        let (log, make) = recorder();

        let token = scheduler.schedule(Duration::from_millis(10), make(1));
        scheduler.schedule(Duration::from_millis(10), make(2));
        scheduler.cancel(token);

        assert_eq!(scheduler.pending(), 1);
        scheduler.advance(Duration::from_millis(10));
        assert_eq!(*log.borrow(), vec![2]);
    }

    #[test]
    fn cancel_is_idempotent() {
        let scheduler = ManualScheduler::new();
        let (_log, make) = recorder();
        let token = scheduler.schedule(Duration::from_millis(10), make(1));

        scheduler.cancel(token);
        scheduler.cancel(token);
        scheduler.advance(Duration::from_millis(10));
        scheduler.cancel(token);

        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn nested_schedule_inside_window_fires() {
        let scheduler = Rc::new(ManualScheduler::new());
        let (log, make) = recorder();
        let make = Rc::new(make);

        let inner_scheduler = Rc::clone(&scheduler);
        let inner_make = Rc::clone(&make);
        let outer_sink = Rc::clone(&log);
        scheduler.schedule(
            Duration::from_millis(10),
            Box::new(move || {
                outer_sink.borrow_mut().push(1);
                inner_scheduler.schedule(Duration::from_millis(5), inner_make(2));
            }),
        );

        scheduler.advance(Duration::from_millis(20));
        assert_eq!(*log.borrow(), vec![1, 2]);
        assert_eq!(scheduler.now(), Duration::from_millis(20));
    }

    #[test]
    fn now_tracks_advanced_time() {
        let scheduler = ManualScheduler::new();
        scheduler.advance(Duration::from_millis(250));
        scheduler.advance(Duration::from_millis(250));
        assert_eq!(scheduler.now(), Duration::from_millis(500));
    }
}
