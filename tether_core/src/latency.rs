// Copyright 2026 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Latency bookkeeping carried through buffer swaps.

use crate::time::HostTime;

/// Latency information a compositing engine attaches to a buffer swap.
///
/// The adapter does not interpret it beyond logging; presentation happens
/// when the host's draw call returns.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct LatencyInfo {
    /// Engine-assigned frame sequence number.
    pub sequence: u64,
    /// When the input that caused this frame arrived, if known.
    pub input_timestamp: Option<HostTime>,
}

impl LatencyInfo {
    /// Creates latency info for the given frame sequence number.
    #[inline]
    #[must_use]
    pub const fn new(sequence: u64) -> Self {
        Self {
            sequence,
            input_timestamp: None,
        }
    }
}
