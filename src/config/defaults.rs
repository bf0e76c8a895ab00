// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! # Categories
//!
//! - **Queue**: Active notification cap and default lifetime
//! - **Diagnostics**: Lifecycle event buffer sizing

use crate::domain::diagnostics::buffer_capacity_bounds;
use crate::domain::notification::max_visible_bounds;

// ==========================================================================
// Queue Defaults
// ==========================================================================

/// Default number of simultaneously active notifications.
pub const DEFAULT_MAX_VISIBLE: usize = max_visible_bounds::DEFAULT;

/// Minimum number of simultaneously active notifications.
pub const MIN_MAX_VISIBLE: usize = max_visible_bounds::MIN;

/// Maximum number of simultaneously active notifications.
pub const MAX_MAX_VISIBLE: usize = max_visible_bounds::MAX;

/// Default notification lifetime in milliseconds (`0` means persistent).
pub const DEFAULT_LIFETIME_MS: u64 = 5000;

// ==========================================================================
// Diagnostics Defaults
// ==========================================================================

/// Default number of lifecycle events kept by the diagnostics collector.
pub const DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY: usize = buffer_capacity_bounds::DEFAULT;

/// Minimum diagnostics buffer capacity.
pub const MIN_DIAGNOSTICS_BUFFER_CAPACITY: usize = buffer_capacity_bounds::MIN;

/// Maximum diagnostics buffer capacity.
pub const MAX_DIAGNOSTICS_BUFFER_CAPACITY: usize = buffer_capacity_bounds::MAX;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn queue_defaults_are_reasonable() {
        assert_eq!(DEFAULT_MAX_VISIBLE, 3);
        assert_eq!(DEFAULT_LIFETIME_MS, 5000);
        assert!(MIN_MAX_VISIBLE <= DEFAULT_MAX_VISIBLE);
        assert!(DEFAULT_MAX_VISIBLE <= MAX_MAX_VISIBLE);
    }

    #[test]
    fn diagnostics_defaults_within_bounds() {
        assert!(MIN_DIAGNOSTICS_BUFFER_CAPACITY <= DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY);
        assert!(DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY <= MAX_DIAGNOSTICS_BUFFER_CAPACITY);
    }
}
