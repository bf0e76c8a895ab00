// SPDX-License-Identifier: MPL-2.0
//! `toast_queue` is the state core of a toast notification system.
//!
//! It keeps a bounded, ordered set of active notifications, expires them
//! through a pluggable [`Scheduler`](scheduler::Scheduler), evicts the oldest
//! when capacity is exceeded, and pushes every change to subscribers. The
//! rendering layer stays outside the crate and adapts to the change events.

pub mod config;
pub mod diagnostics;
pub mod domain;
pub mod error;
pub mod notifications;
pub mod scheduler;

pub use error::{Error, InvalidNotificationError, Result};
