// SPDX-License-Identifier: MPL-2.0
//! Core notification data structures.
//!
//! This module defines the `Notification` struct, the `NotificationRequest`
//! callers hand to [`Manager::add`](super::Manager::add), and the `Severity`
//! enum used throughout the notification system.

use crate::domain::notification::Lifetime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::rc::Rc;
use std::time::Duration;

/// Unique identifier for a notification.
///
/// Identifiers are allocated by a [`Manager`](super::Manager) from a
/// per-instance counter and are never reused by that manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NotificationId(u64);

impl NotificationId {
    pub(crate) fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw counter value.
    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "toast-{}", self.0)
    }
}

/// Severity level determines visual styling in the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Informational message.
    #[default]
    Info,
    /// Operation completed successfully.
    Success,
    /// Warning that doesn't block operation.
    Warning,
    /// Error requiring attention.
    Error,
}

impl Severity {
    /// Returns the lowercase name of this severity.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Success => "success",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A labelled button attached to a notification (e.g. "Undo").
///
/// The callback receives the id of the notification it was attached to.
#[derive(Clone)]
pub struct Action {
    label: String,
    callback: Rc<dyn Fn(NotificationId)>,
}

impl Action {
    /// Creates an action with the given label and callback.
    pub fn new(label: impl Into<String>, callback: impl Fn(NotificationId) + 'static) -> Self {
        Self {
            label: label.into(),
            callback: Rc::new(callback),
        }
    }

    /// Returns the button label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Runs the callback.
    pub fn invoke(&self, id: NotificationId) {
        (self.callback)(id);
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Action")
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

/// Input to [`Manager::add`](super::Manager::add).
///
/// Severity defaults to [`Severity::Info`]; lifetime defaults to the
/// manager's configured default.
#[derive(Debug, Clone)]
pub struct NotificationRequest {
    message: String,
    severity: Option<Severity>,
    lifetime: Option<Lifetime>,
    action: Option<Action>,
}

impl NotificationRequest {
    /// Creates a request with the given message and all other fields defaulted.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity: None,
            lifetime: None,
            action: None,
        }
    }

    /// Creates an info request.
    pub fn info(message: impl Into<String>) -> Self {
        Self::new(message).with_severity(Severity::Info)
    }

    /// Creates a success request.
    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message).with_severity(Severity::Success)
    }

    /// Creates a warning request.
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(message).with_severity(Severity::Warning)
    }

    /// Creates an error request.
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message).with_severity(Severity::Error)
    }

    /// Sets the severity.
    #[must_use]
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = Some(severity);
        self
    }

    /// Sets an explicit lifetime, overriding the manager default.
    #[must_use]
    pub fn with_lifetime(mut self, lifetime: Lifetime) -> Self {
        self.lifetime = Some(lifetime);
        self
    }

    /// Sets the lifetime in milliseconds. `0` means persistent.
    #[must_use]
    pub fn with_lifetime_ms(self, millis: u64) -> Self {
        self.with_lifetime(Lifetime::from_millis(millis))
    }

    /// Disables auto-expiry.
    #[must_use]
    pub fn persistent(self) -> Self {
        self.with_lifetime(Lifetime::Persistent)
    }

    /// Attaches an action button.
    #[must_use]
    pub fn with_action(
        mut self,
        label: impl Into<String>,
        callback: impl Fn(NotificationId) + 'static,
    ) -> Self {
        self.action = Some(Action::new(label, callback));
        self
    }

    /// Returns the message text.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the explicit severity, if any.
    #[must_use]
    pub fn severity(&self) -> Option<Severity> {
        self.severity
    }

    /// Returns the explicit lifetime, if any.
    #[must_use]
    pub fn lifetime(&self) -> Option<Lifetime> {
        self.lifetime
    }
}

impl From<&str> for NotificationRequest {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

impl From<String> for NotificationRequest {
    fn from(message: String) -> Self {
        Self::new(message)
    }
}

/// An active notification, as delivered to subscribers.
#[derive(Debug, Clone)]
pub struct Notification {
    id: NotificationId,
    severity: Severity,
    message: String,
    lifetime: Lifetime,
    action: Option<Action>,
}

impl Notification {
    /// Builds the active notification from a validated request.
    pub(crate) fn activate(
        id: NotificationId,
        request: NotificationRequest,
        default_lifetime: Lifetime,
    ) -> Self {
        Self {
            id,
            severity: request.severity.unwrap_or_default(),
            message: request.message,
            lifetime: request.lifetime.unwrap_or(default_lifetime),
            action: request.action,
        }
    }

    /// Returns the notification's unique ID.
    #[must_use]
    pub fn id(&self) -> NotificationId {
        self.id
    }

    /// Returns the severity level.
    #[must_use]
    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Returns the message text.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the resolved lifetime.
    #[must_use]
    pub fn lifetime(&self) -> Lifetime {
        self.lifetime
    }

    /// Returns the expiry delay, or `None` if persistent.
    #[must_use]
    pub fn expires_after(&self) -> Option<Duration> {
        self.lifetime.duration()
    }

    /// Returns the attached action, if any.
    #[must_use]
    pub fn action(&self) -> Option<&Action> {
        self.action.as_ref()
    }
}
