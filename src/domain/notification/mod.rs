// SPDX-License-Identifier: MPL-2.0
//! Notification queue domain types.
//!
//! - [`MaxVisible`]: Cap on simultaneously active notifications
//! - [`Lifetime`]: Finite expiry delay or persistent

mod newtypes;

pub use newtypes::{max_visible_bounds, Lifetime, MaxVisible};
