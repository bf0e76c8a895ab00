// SPDX-License-Identifier: MPL-2.0
//! Diagnostics collector for aggregating and storing lifecycle events.
//!
//! The collector receives events through a bounded channel and stores them
//! in a circular buffer. Handles are cheap to clone and never block.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use serde::{Deserialize, Serialize};

use super::{BufferCapacity, CircularBuffer, DiagnosticEvent, DiagnosticEventKind};
use crate::error::Result;
use crate::notifications::{NotificationId, RemovalReason, Severity};

/// Default channel capacity for event buffering.
const DEFAULT_CHANNEL_CAPACITY: usize = 100;

/// Handle for sending diagnostic events to the collector.
#[derive(Clone, Debug)]
pub struct DiagnosticsHandle {
    event_tx: Sender<DiagnosticEvent>,
}

impl DiagnosticsHandle {
    /// Records an event. Drops it silently if the channel is full.
    pub fn log(&self, kind: DiagnosticEventKind) {
        let _ = self.event_tx.try_send(DiagnosticEvent::new(kind));
    }

    /// Records a notification becoming active.
    pub fn log_added(&self, id: NotificationId, severity: Severity, lifetime_ms: u64) {
        self.log(DiagnosticEventKind::Added {
            id,
            severity,
            lifetime_ms,
        });
    }

    /// Records a notification leaving the active set.
    pub fn log_removed(&self, id: NotificationId, reason: RemovalReason) {
        self.log(DiagnosticEventKind::Removed { id, reason });
    }

    /// Records a refused `add` call.
    pub fn log_rejected(&self, reason: impl Into<String>) {
        self.log(DiagnosticEventKind::Rejected {
            reason: reason.into(),
        });
    }

    /// Attempts to send an event, returning an error if the channel is full.
    ///
    /// # Errors
    ///
    /// Returns `TrySendError::Full` if the internal channel buffer is full,
    /// or `TrySendError::Disconnected` if the collector has been dropped.
    pub fn try_log(&self, kind: DiagnosticEventKind) -> std::result::Result<(), TrySendError<DiagnosticEvent>> {
        self.event_tx.try_send(DiagnosticEvent::new(kind))
    }
}

/// Serialized form of the collected events.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DiagnosticReport {
    pub collection_started_at: DateTime<Utc>,
    pub generated_at: DateTime<Utc>,
    pub event_count: usize,
    pub events: Vec<DiagnosticEvent>,
}

/// Central collector for diagnostic events.
pub struct DiagnosticsCollector {
    buffer: CircularBuffer<DiagnosticEvent>,
    event_rx: Receiver<DiagnosticEvent>,
    event_tx: Sender<DiagnosticEvent>,
    collection_started_at: DateTime<Utc>,
}

impl DiagnosticsCollector {
    /// Creates a new diagnostics collector with the specified buffer capacity.
    #[must_use]
    pub fn new(capacity: BufferCapacity) -> Self {
        Self::with_channel_capacity(capacity, DEFAULT_CHANNEL_CAPACITY)
    }

    /// Creates a collector with an explicit channel size.
    #[must_use]
    pub fn with_channel_capacity(capacity: BufferCapacity, channel_capacity: usize) -> Self {
        let (event_tx, event_rx) = bounded(channel_capacity.max(1));

        Self {
            buffer: CircularBuffer::new(capacity),
            event_rx,
            event_tx,
            collection_started_at: Utc::now(),
        }
    }

    /// Creates a handle for sending events to this collector.
    #[must_use]
    pub fn handle(&self) -> DiagnosticsHandle {
        DiagnosticsHandle {
            event_tx: self.event_tx.clone(),
        }
    }

    /// Drains the channel into the buffer. Returns how many events were moved.
    ///
    /// Call this periodically (e.g., on each UI tick).
    pub fn process_pending(&mut self) -> usize {
        let mut moved = 0;
        while let Ok(event) = self.event_rx.try_recv() {
            self.buffer.push(event);
            moved += 1;
        }
        moved
    }

    /// Returns the number of events currently stored.
    #[must_use]
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Returns true if no events are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Returns an iterator over all stored events (oldest first).
    pub fn iter(&self) -> impl Iterator<Item = &DiagnosticEvent> {
        self.buffer.iter()
    }

    /// Clears all stored events.
    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    /// Returns the buffer capacity.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buffer.capacity()
    }

    /// Builds a report from the current buffer contents.
    #[must_use]
    pub fn report(&self) -> DiagnosticReport {
        let events: Vec<DiagnosticEvent> = self.buffer.iter().cloned().collect();
        DiagnosticReport {
            collection_started_at: self.collection_started_at,
            generated_at: Utc::now(),
            event_count: events.len(),
            events,
        }
    }

    /// Exports all collected events as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn export_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.report())
    }

    /// Writes the JSON report to `path`, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns `Error::Diagnostics` if serialization fails and `Error::Io`
    /// if the file cannot be written.
    pub fn export_to_file(&self, path: impl AsRef<Path>) -> Result<PathBuf> {
        let path = path.as_ref();
        let json = self.export_json()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        write_atomic(path, &json)?;
        Ok(path.to_path_buf())
    }
}

impl std::fmt::Debug for DiagnosticsCollector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiagnosticsCollector")
            .field("len", &self.buffer.len())
            .field("capacity", &self.buffer.capacity())
            .finish_non_exhaustive()
    }
}

/// Writes content to a file through a temporary sibling, then renames it.
fn write_atomic(path: &Path, content: &str) -> std::io::Result<()> {
    let temp_path = path.with_extension("json.tmp");

    fs::write(&temp_path, content)?;

    if let Err(e) = fs::rename(&temp_path, path) {
        let _ = fs::remove_file(&temp_path);
        return Err(e);
    }

    Ok(())
}
