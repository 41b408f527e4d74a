// Copyright 2026 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recoverable output-surface errors.
//!
//! Contract violations (wrong thread, hardware draw before initialization,
//! re-initializing a live context) are panics, not values of these types.

use tether_core::gpu::ContextCreationError;

/// Why [`bind_to_client`](crate::SynchronousOutputSurface::bind_to_client)
/// failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum BindError {
    /// A compositing-engine client is already bound to this surface.
    #[error("output surface is already bound to a client")]
    AlreadyBound,
}

/// Why [`initialize_hw_draw`](crate::SynchronousOutputSurface::initialize_hw_draw)
/// failed. The caller must not attempt a hardware draw afterwards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum InitializeError {
    /// The GPU platform could not create a view context.
    #[error("failed to create GPU context for hardware draw")]
    ContextCreation(#[from] ContextCreationError),
}

/// Operations the software output device does not support.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SoftwareDeviceError {
    /// Read-back is not available while drawing synchronously into a host
    /// canvas.
    #[error("copying to a bitmap is not supported by the synchronous software device")]
    Unsupported,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn initialize_error_keeps_source() {
        let err = InitializeError::from(ContextCreationError::Unavailable);
        assert!(err.source().is_some(), "creation error should be the source");
        assert_eq!(
            err.to_string(),
            "failed to create GPU context for hardware draw"
        );
    }
}
