// SPDX-License-Identifier: MPL-2.0
//! Toast notification queue.
//!
//! This module provides the framework-independent core of a toast/snackbar
//! system. A rendering layer subscribes to the [`Manager`] and redraws the
//! toast stack from the sequence it receives; it sends user input back as
//! [`NotificationMessage`] values.
//!
//! # Components
//!
//! - `notification` - `Notification`, `NotificationRequest`, `Severity`, `Action`
//! - `manager` - `Manager` for queuing, eviction and expiry
//! - `listeners` - change listener registry and `Subscription` handles
//!
//! # Usage
//!
//! ```
//! use std::rc::Rc;
//! use toast_queue::config::QueueConfig;
//! use toast_queue::notifications::{Manager, NotificationRequest};
//! use toast_queue::scheduler::ManualScheduler;
//!
//! let manager = Manager::new(QueueConfig::new().with_max_visible(2), Rc::new(ManualScheduler::new()));
//! let _subscription = manager.subscribe(|active| {
//!     for toast in active {
//!         println!("[{}] {}", toast.severity(), toast.message());
//!     }
//! });
//!
//! for name in ["A", "B", "C"] {
//!     manager.add(NotificationRequest::new(name).persistent()).unwrap();
//! }
//! let shown: Vec<_> = manager.active().iter().map(|n| n.message().to_string()).collect();
//! assert_eq!(shown, ["B", "C"]);
//! ```

mod listeners;
mod manager;
mod notification;

pub use listeners::{Listener, Subscription};
pub use manager::{Manager, Message as NotificationMessage, RemovalReason};
pub use notification::{Action, Notification, NotificationId, NotificationRequest, Severity};
