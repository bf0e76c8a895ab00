// SPDX-License-Identifier: MPL-2.0
//! Notification lifecycle management.
//!
//! The `Manager` owns the ordered set of active notifications and the
//! timers that expire them. It caps the active set at
//! [`MaxVisible`](crate::domain::notification::MaxVisible), evicting the
//! oldest entry first, and tells subscribers about every change.
//!
//! All methods take `&self`: listeners and timer callbacks may call back
//! into the manager while it is notifying them.

use super::listeners::{Listener, Registry, Subscription};
use super::notification::{Notification, NotificationId, NotificationRequest};
use crate::config::{Position, QueueConfig};
use crate::diagnostics::DiagnosticsHandle;
use crate::error::InvalidNotificationError;
use crate::scheduler::{CancelToken, Scheduler};
use serde::{Deserialize, Serialize};
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::fmt;
use std::rc::{Rc, Weak};

/// Messages a rendering layer sends back to the manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    /// The user closed the toast.
    Dismiss(NotificationId),
    /// The user pressed the toast's action button.
    ActionPressed(NotificationId),
}

/// Why a notification left the active set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemovalReason {
    /// Explicit `remove` call or dismiss message.
    Dismissed,
    /// Its lifetime elapsed.
    Expired,
    /// Pushed out by a newer notification at capacity.
    Evicted,
    /// Removed by `clear`.
    Cleared,
    /// Its action button was pressed.
    ActionTriggered,
}

impl RemovalReason {
    /// Returns the lowercase name of this reason.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            RemovalReason::Dismissed => "dismissed",
            RemovalReason::Expired => "expired",
            RemovalReason::Evicted => "evicted",
            RemovalReason::Cleared => "cleared",
            RemovalReason::ActionTriggered => "action_triggered",
        }
    }
}

impl fmt::Display for RemovalReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

struct Entry {
    notification: Notification,
    /// Expiry timer; `None` for persistent notifications.
    timer: Option<CancelToken>,
}

#[derive(Default)]
struct State {
    /// Active notifications, oldest first.
    active: VecDeque<Entry>,
    next_id: u64,
}

struct Inner<S: Scheduler + 'static> {
    state: RefCell<State>,
    listeners: Rc<RefCell<Registry>>,
    scheduler: S,
    config: QueueConfig,
    diagnostics: RefCell<Option<DiagnosticsHandle>>,
    /// Set while listeners are being notified.
    emitting: Cell<bool>,
    /// A change happened during the current delivery round.
    dirty: Cell<bool>,
}

/// Clears the emitting flag even if a listener panics.
struct EmitGuard<'a>(&'a Cell<bool>);

impl<'a> EmitGuard<'a> {
    fn enter(flag: &'a Cell<bool>) -> Self {
        flag.set(true);
        Self(flag)
    }
}

impl Drop for EmitGuard<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

/// Manages the active notification queue.
///
/// # Example
///
/// ```
/// use std::rc::Rc;
/// use std::time::Duration;
/// use toast_queue::config::QueueConfig;
/// use toast_queue::notifications::{Manager, NotificationRequest};
/// use toast_queue::scheduler::ManualScheduler;
///
/// let scheduler = Rc::new(ManualScheduler::new());
/// let manager = Manager::new(QueueConfig::new(), Rc::clone(&scheduler));
///
/// let id = manager
///     .add(NotificationRequest::success("Saved").with_lifetime_ms(1000))
///     .unwrap();
/// assert!(manager.contains(id));
///
/// scheduler.advance(Duration::from_millis(1000));
/// assert!(manager.is_empty());
/// ```
pub struct Manager<S: Scheduler + 'static> {
    inner: Rc<Inner<S>>,
}

impl<S: Scheduler + 'static> Manager<S> {
    /// Creates an empty manager that schedules expiry through `scheduler`.
    pub fn new(config: QueueConfig, scheduler: S) -> Self {
        Self {
            inner: Rc::new(Inner {
                state: RefCell::new(State::default()),
                listeners: Rc::new(RefCell::new(Registry::default())),
                scheduler,
                config,
                diagnostics: RefCell::new(None),
                emitting: Cell::new(false),
                dirty: Cell::new(false),
            }),
        }
    }

    /// Sets the diagnostics handle for recording lifecycle events.
    pub fn set_diagnostics(&self, handle: DiagnosticsHandle) {
        *self.inner.diagnostics.borrow_mut() = Some(handle);
    }

    /// Adds a notification at the tail of the queue and returns its id.
    ///
    /// If the queue is at capacity, the oldest notification is evicted
    /// before this returns. Subscribers receive exactly one change event.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidNotificationError::EmptyMessage`] if the message is
    /// empty or whitespace. The queue is left untouched and no change event
    /// is emitted.
    pub fn add(
        &self,
        request: impl Into<NotificationRequest>,
    ) -> Result<NotificationId, InvalidNotificationError> {
        self.inner.add(request.into())
    }

    /// Dismisses a notification by its ID.
    ///
    /// Returns `true` if the notification was found and removed. Unknown
    /// ids are ignored, so a dismissal racing an expiry is harmless.
    pub fn remove(&self, id: NotificationId) -> bool {
        self.inner.remove(id, RemovalReason::Dismissed)
    }

    /// Removes every notification and cancels every pending timer.
    ///
    /// Always emits one change event.
    pub fn clear(&self) {
        self.inner.clear();
    }

    /// Removes every notification matching `predicate`.
    ///
    /// Emits one change event if anything was removed. Returns the number
    /// of notifications removed.
    pub fn remove_where(&self, predicate: impl FnMut(&Notification) -> bool) -> usize {
        self.inner.remove_where(predicate)
    }

    /// Dismisses a notification and runs its attached action.
    ///
    /// The callback runs after subscribers have seen the removal, so it may
    /// add follow-up notifications.
    ///
    /// Returns `false` if the id is unknown or the notification has no action.
    pub fn trigger_action(&self, id: NotificationId) -> bool {
        self.inner.trigger_action(id)
    }

    /// Handles a notification message from the rendering layer.
    pub fn handle_message(&self, message: &Message) {
        match message {
            Message::Dismiss(id) => {
                self.remove(*id);
            }
            Message::ActionPressed(id) => {
                self.trigger_action(*id);
            }
        }
    }

    /// Registers a listener called with the active sequence after every change.
    ///
    /// Dropping the returned [`Subscription`] keeps the listener registered;
    /// call [`Subscription::unsubscribe`] to remove it. Listeners may call
    /// back into the manager. Changes they make restart delivery, so every
    /// listener's last event matches the current queue.
    pub fn subscribe(&self, listener: impl Fn(&[Notification]) + 'static) -> Subscription {
        let listener: Listener = Rc::new(listener);
        let id = self.inner.listeners.borrow_mut().insert(listener);
        Subscription::new(id, &self.inner.listeners)
    }

    /// Returns a snapshot of the active notifications, oldest first.
    #[must_use]
    pub fn active(&self) -> Vec<Notification> {
        self.inner.snapshot()
    }

    /// Returns the active notification with this id, if any.
    #[must_use]
    pub fn get(&self, id: NotificationId) -> Option<Notification> {
        self.inner
            .state
            .borrow()
            .active
            .iter()
            .find(|entry| entry.notification.id() == id)
            .map(|entry| entry.notification.clone())
    }

    /// Returns whether a notification with this id is active.
    #[must_use]
    pub fn contains(&self, id: NotificationId) -> bool {
        self.inner
            .state
            .borrow()
            .active
            .iter()
            .any(|entry| entry.notification.id() == id)
    }

    /// Returns the number of active notifications.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.state.borrow().active.len()
    }

    /// Returns whether there are no active notifications.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.state.borrow().active.is_empty()
    }

    /// Returns the number of expiry timers currently held.
    #[must_use]
    pub fn pending_timers(&self) -> usize {
        self.inner
            .state
            .borrow()
            .active
            .iter()
            .filter(|entry| entry.timer.is_some())
            .count()
    }

    /// Returns the number of registered listeners.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.inner.listeners.borrow().len()
    }

    /// Returns the settings this manager was created with.
    #[must_use]
    pub fn config(&self) -> &QueueConfig {
        &self.inner.config
    }

    /// Returns the presentation hint for the renderer.
    #[must_use]
    pub fn position(&self) -> Position {
        self.inner.config.position
    }

    /// Returns the scheduler driving expiry.
    #[must_use]
    pub fn scheduler(&self) -> &S {
        &self.inner.scheduler
    }
}

impl<S: Scheduler + 'static> Drop for Manager<S> {
    fn drop(&mut self) {
        let entries: Vec<Entry> = self.inner.state.borrow_mut().active.drain(..).collect();
        for entry in entries {
            if let Some(token) = entry.timer {
                self.inner.scheduler.cancel(token);
            }
        }
        self.inner.listeners.borrow_mut().clear();
        tracing::debug!("notification manager torn down");
    }
}

impl<S: Scheduler + 'static> fmt::Debug for Manager<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Manager")
            .field("active", &self.len())
            .field("pending_timers", &self.pending_timers())
            .field("listeners", &self.listener_count())
            .field("config", &self.inner.config)
            .finish()
    }
}

impl<S: Scheduler + 'static> Inner<S> {
    fn add(
        self: &Rc<Self>,
        request: NotificationRequest,
    ) -> Result<NotificationId, InvalidNotificationError> {
        if request.message().trim().is_empty() {
            let err = InvalidNotificationError::EmptyMessage;
            tracing::warn!(reason = err.key(), "rejected notification");
            self.with_diagnostics(|handle| handle.log_rejected(err.key()));
            return Err(err);
        }

        let (notification, evicted) = {
            let mut state = self.state.borrow_mut();
            state.next_id += 1;
            let id = NotificationId::new(state.next_id);
            let notification =
                Notification::activate(id, request, self.config.default_lifetime);
            state.active.push_back(Entry {
                notification: notification.clone(),
                timer: None,
            });

            let mut evicted = Vec::new();
            while state.active.len() > self.config.max_visible.value() {
                if let Some(entry) = state.active.pop_front() {
                    evicted.push(entry);
                }
            }
            (notification, evicted)
        };

        for entry in evicted {
            self.retire(entry, RemovalReason::Evicted);
        }

        let id = notification.id();
        if let Some(delay) = notification.expires_after() {
            let weak = Rc::downgrade(self);
            let token = self
                .scheduler
                .schedule(delay, Box::new(move || Self::expire(&weak, id)));
            let mut state = self.state.borrow_mut();
            if let Some(entry) = state
                .active
                .iter_mut()
                .find(|entry| entry.notification.id() == id)
            {
                entry.timer = Some(token);
            }
        }

        tracing::debug!(
            %id,
            severity = %notification.severity(),
            lifetime_ms = notification.lifetime().as_millis(),
            "notification added"
        );
        self.with_diagnostics(|handle| {
            handle.log_added(id, notification.severity(), notification.lifetime().as_millis());
        });

        self.emit();
        Ok(id)
    }

    /// Expiry timer entry point. A dropped manager or an unknown id is a no-op.
    fn expire(weak: &Weak<Self>, id: NotificationId) {
        if let Some(inner) = weak.upgrade() {
            inner.remove(id, RemovalReason::Expired);
        }
    }

    fn remove(&self, id: NotificationId, reason: RemovalReason) -> bool {
        let entry = {
            let mut state = self.state.borrow_mut();
            let position = state
                .active
                .iter()
                .position(|entry| entry.notification.id() == id);
            position.and_then(|pos| state.active.remove(pos))
        };

        let Some(entry) = entry else {
            return false;
        };

        if reason == RemovalReason::Expired {
            // The firing timer is spent; forget it without cancelling.
            self.log_removal(entry.notification.id(), reason);
        } else {
            self.retire(entry, reason);
        }

        self.emit();
        true
    }

    fn clear(&self) {
        let entries: Vec<Entry> = self.state.borrow_mut().active.drain(..).collect();
        for entry in entries {
            self.retire(entry, RemovalReason::Cleared);
        }
        self.emit();
    }

    fn remove_where(&self, mut predicate: impl FnMut(&Notification) -> bool) -> usize {
        let removed: Vec<Entry> = {
            let mut state = self.state.borrow_mut();
            let (removed, kept): (VecDeque<Entry>, VecDeque<Entry>) = state
                .active
                .drain(..)
                .partition(|entry| predicate(&entry.notification));
            state.active = kept;
            removed.into_iter().collect()
        };

        let count = removed.len();
        for entry in removed {
            self.retire(entry, RemovalReason::Dismissed);
        }
        if count > 0 {
            self.emit();
        }
        count
    }

    fn trigger_action(&self, id: NotificationId) -> bool {
        let action = self
            .state
            .borrow()
            .active
            .iter()
            .find(|entry| entry.notification.id() == id)
            .and_then(|entry| entry.notification.action().cloned());

        let Some(action) = action else {
            return false;
        };

        tracing::debug!(%id, label = action.label(), "notification action triggered");
        self.remove(id, RemovalReason::ActionTriggered);
        action.invoke(id);
        true
    }

    /// Cancels the entry's timer and records why it left.
    fn retire(&self, entry: Entry, reason: RemovalReason) {
        if let Some(token) = entry.timer {
            self.scheduler.cancel(token);
        }
        self.log_removal(entry.notification.id(), reason);
    }

    fn log_removal(&self, id: NotificationId, reason: RemovalReason) {
        tracing::debug!(%id, %reason, "notification removed");
        self.with_diagnostics(|handle| handle.log_removed(id, reason));
    }

    fn with_diagnostics(&self, f: impl FnOnce(&DiagnosticsHandle)) {
        if let Some(handle) = self.diagnostics.borrow().as_ref() {
            f(handle);
        }
    }

    fn snapshot(&self) -> Vec<Notification> {
        self.state
            .borrow()
            .active
            .iter()
            .map(|entry| entry.notification.clone())
            .collect()
    }

    /// Notifies every listener with the current sequence.
    ///
    /// Borrows are released before any listener runs. A change made by a
    /// listener only marks the round dirty; the outermost call then starts
    /// over with a fresh snapshot so no listener is left holding stale state.
    fn emit(&self) {
        if self.emitting.get() {
            self.dirty.set(true);
            return;
        }
        let _guard = EmitGuard::enter(&self.emitting);

        'deliver: loop {
            self.dirty.set(false);
            let snapshot = self.snapshot();
            let listeners = self.listeners.borrow().snapshot();
            for listener in listeners {
                listener(&snapshot);
                if self.dirty.get() {
                    continue 'deliver;
                }
            }
            break;
        }
    }
}
