// SPDX-License-Identifier: MPL-2.0
//! Diagnostic event types for notification lifecycle tracking.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::notifications::{NotificationId, RemovalReason, Severity};

/// A single recorded lifecycle event.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DiagnosticEvent {
    /// When the event was recorded (wall clock).
    pub timestamp: DateTime<Utc>,
    /// The type and data of the event.
    pub kind: DiagnosticEventKind,
}

impl DiagnosticEvent {
    /// Creates a new diagnostic event with the current timestamp.
    #[must_use]
    pub fn new(kind: DiagnosticEventKind) -> Self {
        Self {
            timestamp: Utc::now(),
            kind,
        }
    }

    /// Creates a new diagnostic event with a specific timestamp.
    #[must_use]
    pub fn with_timestamp(kind: DiagnosticEventKind, timestamp: DateTime<Utc>) -> Self {
        Self { timestamp, kind }
    }
}

/// The type and associated data for a diagnostic event.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DiagnosticEventKind {
    /// A notification became active.
    Added {
        id: NotificationId,
        severity: Severity,
        /// Lifetime in milliseconds, `0` for persistent.
        lifetime_ms: u64,
    },
    /// A notification left the active set.
    Removed {
        id: NotificationId,
        reason: RemovalReason,
    },
    /// An `add` call was refused.
    Rejected {
        /// Stable rejection key.
        reason: String,
    },
}
