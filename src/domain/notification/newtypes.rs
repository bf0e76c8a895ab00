// SPDX-License-Identifier: MPL-2.0
//! Notification queue newtypes.
//!
//! This module provides type-safe wrappers for queue settings,
//! ensuring they are always within valid ranges.

use std::time::Duration;

// =============================================================================
// Max Visible Bounds
// =============================================================================

/// Bounds for the number of simultaneously active notifications.
pub mod max_visible_bounds {
    /// Minimum active notifications (the queue always holds at least one).
    pub const MIN: usize = 1;
    /// Maximum active notifications.
    pub const MAX: usize = 100;
    /// Default active notifications.
    pub const DEFAULT: usize = 3;
}

// =============================================================================
// MaxVisible
// =============================================================================

/// Maximum number of notifications the queue keeps active at once.
///
/// This newtype enforces validity at the type level, ensuring the value
/// is always within the valid range (1–100).
///
/// # Example
///
/// ```
/// use toast_queue::domain::notification::MaxVisible;
///
/// assert_eq!(MaxVisible::new(5).value(), 5);
///
/// // Zero is not a usable capacity
/// assert_eq!(MaxVisible::new(0).value(), 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MaxVisible(usize);

impl MaxVisible {
    /// Creates a new limit, clamping to valid range.
    #[must_use]
    pub fn new(value: usize) -> Self {
        Self(value.clamp(max_visible_bounds::MIN, max_visible_bounds::MAX))
    }

    /// Returns the value as usize.
    #[must_use]
    pub fn value(self) -> usize {
        self.0
    }

    /// Returns true if this is the minimum value.
    #[must_use]
    pub fn is_min(self) -> bool {
        self.0 <= max_visible_bounds::MIN
    }

    /// Returns true if this is the maximum value.
    #[must_use]
    pub fn is_max(self) -> bool {
        self.0 >= max_visible_bounds::MAX
    }
}

impl Default for MaxVisible {
    fn default() -> Self {
        Self(max_visible_bounds::DEFAULT)
    }
}

// =============================================================================
// Lifetime
// =============================================================================

/// How long a notification stays active before it expires on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Lifetime {
    /// Stays until dismissed, evicted or cleared.
    #[default]
    Persistent,
    /// Expires this long after activation. Never zero.
    After(Duration),
}

impl Lifetime {
    /// Creates a lifetime from a duration. A zero duration means persistent.
    #[must_use]
    pub fn new(duration: Duration) -> Self {
        if duration.is_zero() {
            Lifetime::Persistent
        } else {
            Lifetime::After(duration)
        }
    }

    /// Creates a lifetime from milliseconds. `0` means persistent.
    #[must_use]
    pub fn from_millis(millis: u64) -> Self {
        Self::new(Duration::from_millis(millis))
    }

    /// Returns the expiry delay, or `None` for persistent notifications.
    #[must_use]
    pub fn duration(self) -> Option<Duration> {
        match self {
            Lifetime::Persistent => None,
            Lifetime::After(duration) => Some(duration),
        }
    }

    /// Returns true if this lifetime never expires on its own.
    #[must_use]
    pub fn is_persistent(self) -> bool {
        matches!(self, Lifetime::Persistent)
    }

    /// Returns the lifetime in milliseconds, `0` for persistent.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)] // u64 millis covers ~584 million years
    pub fn as_millis(self) -> u64 {
        self.duration().map_or(0, |d| d.as_millis() as u64)
    }
}

impl From<Duration> for Lifetime {
    fn from(duration: Duration) -> Self {
        Self::new(duration)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn max_visible_clamps_to_valid_range() {
        assert_eq!(MaxVisible::new(0).value(), max_visible_bounds::MIN);
        assert_eq!(MaxVisible::new(1_000).value(), max_visible_bounds::MAX);
    }

    #[test]
    fn max_visible_default_is_three() {
        assert_eq!(MaxVisible::default().value(), 3);
    }

    #[test]
    fn max_visible_min_max() {
        assert!(MaxVisible::new(1).is_min());
        assert!(MaxVisible::new(100).is_max());
        assert!(!MaxVisible::new(3).is_min());
        assert!(!MaxVisible::new(3).is_max());
    }

    #[test]
    fn zero_lifetime_is_persistent() {
        assert_eq!(Lifetime::from_millis(0), Lifetime::Persistent);
        assert_eq!(Lifetime::new(Duration::ZERO), Lifetime::Persistent);
        assert!(Lifetime::from_millis(0).is_persistent());
    }

    #[test]
    fn finite_lifetime_keeps_duration() {
        let lifetime = Lifetime::from_millis(1500);
        assert_eq!(lifetime.duration(), Some(Duration::from_millis(1500)));
        assert_eq!(lifetime.as_millis(), 1500);
        assert!(!lifetime.is_persistent());
    }

    #[test]
    fn persistent_reports_zero_millis() {
        assert_eq!(Lifetime::Persistent.as_millis(), 0);
        assert!(Lifetime::Persistent.duration().is_none());
    }
}
