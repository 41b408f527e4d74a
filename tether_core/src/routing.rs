// Copyright 2026 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! View routing identification.
//!
//! [`RoutingId`] is a stable key for one on-screen view. Hosts assign these;
//! the adapter only uses them to look up the view's delegate.

use core::fmt;

/// Identifies the host view an output surface draws for.
///
/// The value is opaque to core code and is passed through unchanged.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct RoutingId(pub i32);

impl fmt::Debug for RoutingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RoutingId({})", self.0)
    }
}
