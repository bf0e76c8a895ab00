// SPDX-License-Identifier: MPL-2.0
//! Diagnostics for the notification lifecycle.
//!
//! Every add, removal and rejected input can be recorded through a
//! [`DiagnosticsHandle`] attached to a [`Manager`](crate::notifications::Manager).
//! Events are kept in a memory-bounded [`CircularBuffer`] and can be
//! exported as JSON.
//!
//! # Architecture
//!
//! - [`CircularBuffer`]: Generic ring buffer with configurable capacity
//! - [`DiagnosticEvent`]: Timestamped lifecycle event
//! - [`DiagnosticsCollector`]: Channel-fed store with JSON export

mod buffer;
mod collector;
mod events;

pub use buffer::{BufferCapacity, CircularBuffer};
pub use collector::{DiagnosticReport, DiagnosticsCollector, DiagnosticsHandle};
pub use events::{DiagnosticEvent, DiagnosticEventKind};
