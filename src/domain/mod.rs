// SPDX-License-Identifier: MPL-2.0
//! Domain layer - Core value types with ZERO external dependencies.
//!
//! This module contains pure domain types and their bounds. It has no
//! dependencies on external crates (except `std`) so the rules they encode
//! can be tested in isolation.
//!
//! # Modules
//!
//! - [`diagnostics`]: Diagnostics types ([`BufferCapacity`](diagnostics::BufferCapacity))
//! - [`notification`]: Queue types ([`MaxVisible`](notification::MaxVisible),
//!   [`Lifetime`](notification::Lifetime))

pub mod diagnostics;
pub mod notification;
